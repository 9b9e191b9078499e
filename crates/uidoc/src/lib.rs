//! Static documentation extraction for UI component sources.
//!
//! `uidoc` parses JavaScript and TypeScript component files with OXC and
//! extracts documentation facts without executing any code: props from
//! runtime validator maps and static type annotations, default values,
//! descriptions from docblocks, public methods, display names, and the
//! modules a prop map composes from.
//!
//! The pipeline has three pluggable stages. A [`Resolver`] decides which
//! definitions in a file get documented, [`Handler`]s each extract one
//! documentation concern into a shared builder, and an [`Importer`] lets
//! value and type resolution follow import statements into other files.
//!
//! ```no_run
//! use uidoc::{Config, Docgen};
//!
//! let source = r#"
//!     export default function Button({ label = "Ok" }: { label?: string }) {
//!         return <button>{label}</button>;
//!     }
//! "#;
//! let docs = Docgen::new(Config::default()).parse_source("Button.tsx", source)?;
//! println!("{}", serde_json::to_string_pretty(&docs)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod arena;
mod builder;
mod component;
mod error;
mod handlers;
mod hoc;
mod importer;
mod jsdoc;
mod model;
mod parser;
mod resolver;
mod scope;
mod session;
mod types;
mod value;

use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_span::SourceType;

pub use crate::builder::DocumentationBuilder;
pub use crate::component::{ComponentShape, Definition};
pub use crate::error::{DocgenError, Result};
pub use crate::handlers::{
    ChildContextTypeHandler, CodeTypeHandler, ComponentDocblockHandler, CompositionHandler,
    ContextTypeHandler, DefaultPropsHandler, DisplayNameHandler, Handler,
    MethodDocumentationHandler, PropDocblockHandler, PropTypeHandler, default_handlers,
};
pub use crate::importer::{FsImporter, Importer, NoopImporter};
pub use crate::model::{
    DefaultValue, Documentation, FunctionArgument, FunctionSignature, MethodDescriptor,
    MethodParameter, MethodReturn, ObjectSignature, ObjectSignatureProperty, PropDescriptor,
    PropTypeDescriptor, PropertyKeyDescriptor, TypeDescriptor, TypeKind,
};
pub use crate::parser::ParseOptions;
pub use crate::resolver::{
    ChainPolicy, ChainResolver, FindAllDefinitions, FindAnnotatedDefinitions,
    FindExportedDefinitions, Resolver,
};
pub use crate::session::{FileContext, FileId, Session};
pub use crate::value::{Value, ValueNode};

/// Path used for sources parsed without one.
const ANONYMOUS_PATH: &str = "unknown.tsx";

/// Extraction configuration: discovery strategy, handler set, import
/// behavior, and dialect override.
pub struct Config {
    /// Finds the definitions to document.
    pub resolver: Box<dyn Resolver>,
    /// Extracts documentation facts, run in order per definition.
    pub handlers: Vec<Box<dyn Handler>>,
    /// Follows imports during value and type resolution.
    pub importer: Box<dyn Importer>,
    /// Dialect override; when unset the dialect is inferred from the file
    /// extension, defaulting to TSX.
    pub source_type: Option<SourceType>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolver: Box::new(FindExportedDefinitions::default()),
            handlers: default_handlers(),
            importer: Box::new(NoopImporter),
            source_type: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("handlers", &self.handlers.len())
            .field("source_type", &self.source_type)
            .finish_non_exhaustive()
    }
}

/// A configured extraction entry point.
#[derive(Debug)]
pub struct Docgen {
    config: Config,
}

impl Docgen {
    /// Creates an entry point from a configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Extracts documentation from in-memory source text. `path` selects
    /// the dialect and labels errors; the file is not read from disk.
    pub fn parse_source(
        &self,
        path: impl AsRef<Path>,
        source: &str,
    ) -> Result<Vec<Documentation>> {
        run(&self.config, path.as_ref().to_path_buf(), source)
    }

    /// Reads a file from disk and extracts its documentation.
    pub fn parse_path(&self, path: impl AsRef<Path>) -> Result<Vec<Documentation>> {
        let path = path.as_ref().to_path_buf();
        let source = std::fs::read_to_string(&path).map_err(|error| DocgenError::Io {
            path: path.clone(),
            error,
        })?;
        run(&self.config, path, source.as_str())
    }
}

/// One-shot extraction from anonymous source text.
pub fn parse(source: &str, config: &Config) -> Result<Vec<Documentation>> {
    run(config, PathBuf::from(ANONYMOUS_PATH), source)
}

fn run(config: &Config, path: PathBuf, source: &str) -> Result<Vec<Documentation>> {
    let allocator = Allocator::default();
    let session = Session::new(&allocator, &*config.importer);

    let options = match config.source_type {
        Some(source_type) => ParseOptions { source_type },
        None => ParseOptions::from_path(&path.to_string_lossy()),
    };
    let file = session.add_file(path.clone(), source, options)?;

    let definitions = config.resolver.resolve(&session, &file)?;
    if definitions.is_empty() {
        return Err(DocgenError::MissingDefinition { path });
    }
    tracing::debug!(
        file = %path.display(),
        definitions = definitions.len(),
        "resolved component definitions"
    );

    let mut documentation = Vec::with_capacity(definitions.len());
    for definition in &definitions {
        let mut builder = DocumentationBuilder::new();
        for handler in &config.handlers {
            handler.handle(&mut builder, &session, definition);
        }
        documentation.push(builder.finalize());
    }
    Ok(documentation)
}
