//! Parser façade over OXC.
//!
//! The parser collaborator is consumed, not implemented: this module wraps
//! `oxc_parser` with option handling and error aggregation, and allocates
//! the parsed program into the session's bump allocator so that node
//! references share one lifetime across every file parsed in a run.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::{DocgenError, Result};

/// Parse options for reading source code.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Source type (JavaScript, TypeScript, JSX, TSX).
    pub source_type: SourceType,
}

impl Default for ParseOptions {
    fn default() -> Self {
        // Component sources mix JSX and type annotations freely, so the
        // widest dialect is the default for anonymous input.
        Self {
            source_type: SourceType::tsx(),
        }
    }
}

impl ParseOptions {
    /// Create parse options from a file path (auto-detects source type).
    pub fn from_path(path: &str) -> Self {
        Self {
            source_type: SourceType::from_path(path).unwrap_or(SourceType::tsx()),
        }
    }

    /// Create parse options for JSX.
    pub fn jsx() -> Self {
        Self {
            source_type: SourceType::jsx(),
        }
    }

    /// Create parse options for TypeScript.
    pub fn typescript() -> Self {
        Self {
            source_type: SourceType::ts(),
        }
    }

    /// Create parse options for TSX.
    pub fn tsx() -> Self {
        Self {
            source_type: SourceType::tsx(),
        }
    }
}

/// Parse source text into a program allocated in `allocator`.
///
/// Parser diagnostics are aggregated into a single [`DocgenError::Parse`];
/// the core does not attempt recovery on syntax errors.
pub(crate) fn parse_program<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    options: ParseOptions,
    path: &Path,
) -> Result<&'a Program<'a>> {
    let result = Parser::new(allocator, source, options.source_type).parse();

    if !result.errors.is_empty() {
        let diagnostics: Vec<String> = result
            .errors
            .iter()
            .map(|error| format!("{error:?}"))
            .collect();
        return Err(DocgenError::parse_error(path.to_path_buf(), &diagnostics));
    }

    Ok(allocator.alloc(result.program))
}
