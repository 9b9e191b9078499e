//! Per-run parse session.
//!
//! A session owns every file parsed for one extraction run. All sources are
//! copied into a single bump allocator, so AST nodes from the entry file and
//! from lazily imported files share one lifetime and values can flow across
//! file boundaries without copying.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use oxc_allocator::Allocator;
use oxc_ast::Comment;
use oxc_ast::ast::Program;
use oxc_span::Span;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::importer::Importer;
use crate::jsdoc;
use crate::parser::{self, ParseOptions};
use crate::scope::ScopeTree;
use crate::value::{TypeRef, Value};

/// Identifies one parsed file within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(u32);

/// One parsed file: source text, program, scopes, and docblock comments.
pub struct FileContext<'a> {
    /// Session-local identity.
    pub id: FileId,
    /// Path the file was parsed under. Anonymous sources get a synthetic
    /// path; the importer only sees paths it created itself.
    pub path: PathBuf,
    /// Source text, owned by the session allocator.
    pub source: &'a str,
    /// Parsed program, allocated in the session allocator.
    pub program: &'a Program<'a>,
    /// Value and type scopes for this file.
    pub scopes: ScopeTree<'a>,
    // Docblock comments keyed by the span start of the node they precede.
    doc_comments: FxHashMap<u32, &'a Comment>,
}

impl<'a> FileContext<'a> {
    /// Source text covered by a span.
    pub fn raw(&self, span: Span) -> &'a str {
        &self.source[span.start as usize..span.end as usize]
    }

    /// The docblock comment body attached to the node starting at
    /// `span_start`, with comment delimiters stripped but gutters intact.
    pub fn docblock_at(&self, span_start: u32) -> Option<&'a str> {
        let comment = self.doc_comments.get(&span_start)?;
        Some(self.raw(comment.content_span()))
    }

    /// The normalized docblock summary attached to the node starting at
    /// `span_start`.
    pub fn doc_summary_at(&self, span_start: u32) -> Option<String> {
        self.docblock_at(span_start).and_then(jsdoc::docblock_summary)
    }
}

/// Extraction state shared across every file of one run.
pub struct Session<'a> {
    allocator: &'a Allocator,
    importer: &'a dyn Importer,
    files: RefCell<Vec<Rc<FileContext<'a>>>>,
    by_path: RefCell<FxHashMap<PathBuf, FileId>>,
    value_imports: RefCell<FxHashMap<(FileId, String, String), Option<Value<'a>>>>,
    type_imports: RefCell<FxHashMap<(FileId, String, String), Option<TypeRef<'a>>>>,
}

impl<'a> Session<'a> {
    /// Creates a session backed by `allocator`; imports are delegated to
    /// `importer`.
    pub fn new(allocator: &'a Allocator, importer: &'a dyn Importer) -> Self {
        Self {
            allocator,
            importer,
            files: RefCell::new(Vec::new()),
            by_path: RefCell::new(FxHashMap::default()),
            value_imports: RefCell::new(FxHashMap::default()),
            type_imports: RefCell::new(FxHashMap::default()),
        }
    }

    /// Parses `source` into the session and returns its file context.
    pub fn add_file(
        &self,
        path: PathBuf,
        source: &str,
        options: ParseOptions,
    ) -> Result<Rc<FileContext<'a>>> {
        let source = self.allocator.alloc_str(source);
        let program = parser::parse_program(self.allocator, source, options, &path)?;
        let scopes = ScopeTree::build(program);

        let mut doc_comments = FxHashMap::default();
        for comment in &program.comments {
            if comment.is_jsdoc() {
                doc_comments.insert(comment.attached_to, comment);
            }
        }

        let mut files = self.files.borrow_mut();
        let id = FileId(files.len() as u32);
        tracing::debug!(file = %path.display(), ?id, "parsed source file");
        let context = Rc::new(FileContext {
            id,
            path: path.clone(),
            source,
            program,
            scopes,
            doc_comments,
        });
        files.push(Rc::clone(&context));
        self.by_path.borrow_mut().insert(path, id);
        Ok(context)
    }

    /// Returns the context of an already-parsed file.
    pub fn file_by_path(&self, path: &Path) -> Option<Rc<FileContext<'a>>> {
        let id = *self.by_path.borrow().get(path)?;
        Some(Rc::clone(&self.files.borrow()[id.index()]))
    }

    /// Resolves an imported value through the configured importer.
    ///
    /// Results are memoized per `(file, specifier, name)`. A pending entry
    /// is recorded before delegation so circular re-export chains settle to
    /// "not resolvable" instead of recursing.
    pub fn import_value(
        &self,
        from: &Rc<FileContext<'a>>,
        specifier: &str,
        imported: &str,
    ) -> Option<Value<'a>> {
        let key = (from.id, specifier.to_string(), imported.to_string());
        if let Some(cached) = self.value_imports.borrow().get(&key) {
            return cached.clone();
        }
        self.value_imports.borrow_mut().insert(key.clone(), None);
        let resolved = self.importer.import(self, from, specifier, imported);
        tracing::trace!(
            from = %from.path.display(),
            specifier,
            imported,
            resolved = resolved.is_some(),
            "import lookup"
        );
        self.value_imports.borrow_mut().insert(key, resolved.clone());
        resolved
    }

    /// Resolves an imported type through the configured importer, with the
    /// same memoization and cycle handling as [`Self::import_value`].
    pub fn import_type(
        &self,
        from: &Rc<FileContext<'a>>,
        specifier: &str,
        imported: &str,
    ) -> Option<TypeRef<'a>> {
        let key = (from.id, specifier.to_string(), imported.to_string());
        if let Some(cached) = self.type_imports.borrow().get(&key) {
            return cached.clone();
        }
        self.type_imports.borrow_mut().insert(key.clone(), None);
        let resolved = self.importer.import_type(self, from, specifier, imported);
        self.type_imports.borrow_mut().insert(key, resolved.clone());
        resolved
    }
}

impl FileId {
    fn index(self) -> usize {
        self.0 as usize
    }
}
