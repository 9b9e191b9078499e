//! Import bridging.
//!
//! Resolution reaches a file boundary whenever a binding turns out to be an
//! import. What happens next is delegated to an [`Importer`]: the no-op
//! implementation keeps analysis single-file, while [`FsImporter`] loads
//! relative modules from disk into the same session and continues resolution
//! in the foreign file's module scope.

use std::path::PathBuf;
use std::rc::Rc;

use oxc_ast::ast::{
    Declaration, ExportDefaultDeclarationKind, Expression, ModuleExportName, Statement,
};
use rustc_hash::FxHashSet;

use crate::parser::ParseOptions;
use crate::scope::TypeBinding;
use crate::session::{FileContext, Session};
use crate::value::{self, TypeRef, Value};

/// Resolves imported names to values (and types) in other modules.
///
/// Implementations may parse additional files into the session; every file
/// shares the session allocator, so returned values stay valid for the whole
/// run.
pub trait Importer {
    /// Resolves the export `imported` of module `specifier`, relative to
    /// `from`. `"default"` selects the default export. Returns `None` when
    /// the module or the export cannot be found.
    fn import<'a>(
        &self,
        session: &Session<'a>,
        from: &Rc<FileContext<'a>>,
        specifier: &str,
        imported: &str,
    ) -> Option<Value<'a>>;

    /// Resolves an exported type declaration. The default implementation
    /// finds nothing, which keeps type synthesis single-file.
    fn import_type<'a>(
        &self,
        _session: &Session<'a>,
        _from: &Rc<FileContext<'a>>,
        _specifier: &str,
        _imported: &str,
    ) -> Option<TypeRef<'a>> {
        None
    }
}

/// Importer that never resolves anything. Imported values stay opaque and
/// extraction remains single-file.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopImporter;

impl Importer for NoopImporter {
    fn import<'a>(
        &self,
        _session: &Session<'a>,
        _from: &Rc<FileContext<'a>>,
        _specifier: &str,
        _imported: &str,
    ) -> Option<Value<'a>> {
        None
    }
}

/// Filesystem importer for relative specifiers.
///
/// Bare specifiers (packages) are never followed. Extensionless specifiers
/// probe the usual source extensions and `index.*` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsImporter;

const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

impl FsImporter {
    fn resolve_module<'a>(
        &self,
        session: &Session<'a>,
        from: &FileContext<'a>,
        specifier: &str,
    ) -> Option<Rc<FileContext<'a>>> {
        if !specifier.starts_with('.') {
            return None;
        }
        let base = from.path.parent()?;
        let joined = base.join(specifier);

        for candidate in candidate_paths(&joined) {
            if let Some(context) = session.file_by_path(&candidate) {
                return Some(context);
            }
            if !candidate.is_file() {
                continue;
            }
            let source = match std::fs::read_to_string(&candidate) {
                Ok(source) => source,
                Err(error) => {
                    tracing::debug!(
                        path = %candidate.display(),
                        %error,
                        "failed to read imported module"
                    );
                    continue;
                }
            };
            let options = candidate
                .to_str()
                .map(ParseOptions::from_path)
                .unwrap_or_default();
            match session.add_file(candidate.clone(), &source, options) {
                Ok(context) => return Some(context),
                Err(error) => {
                    tracing::debug!(
                        path = %candidate.display(),
                        %error,
                        "failed to parse imported module"
                    );
                    return None;
                }
            }
        }
        None
    }
}

fn candidate_paths(joined: &std::path::Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if joined.extension().is_some() {
        candidates.push(joined.to_path_buf());
        return candidates;
    }
    for extension in SOURCE_EXTENSIONS {
        candidates.push(joined.with_extension(extension));
    }
    for extension in SOURCE_EXTENSIONS {
        candidates.push(joined.join(format!("index.{extension}")));
    }
    candidates
}

impl Importer for FsImporter {
    fn import<'a>(
        &self,
        session: &Session<'a>,
        from: &Rc<FileContext<'a>>,
        specifier: &str,
        imported: &str,
    ) -> Option<Value<'a>> {
        let module = self.resolve_module(session, from, specifier)?;
        find_exported_value(session, &module, imported)
    }

    fn import_type<'a>(
        &self,
        session: &Session<'a>,
        from: &Rc<FileContext<'a>>,
        specifier: &str,
        imported: &str,
    ) -> Option<TypeRef<'a>> {
        let module = self.resolve_module(session, from, specifier)?;
        find_exported_type(session, &module, imported)
    }
}

/// Locates the value a module exports under `name`, following local
/// bindings and re-export chains. Re-export recursion goes back through the
/// session import cache, which breaks cycles.
fn find_exported_value<'a>(
    session: &Session<'a>,
    module: &Rc<FileContext<'a>>,
    name: &str,
) -> Option<Value<'a>> {
    let root = module.scopes.root();
    let mut star_sources: Vec<&str> = Vec::new();

    for statement in &module.program.body {
        match statement {
            Statement::ExportNamedDeclaration(export) => {
                if let Some(declaration) = &export.declaration {
                    match declaration {
                        Declaration::FunctionDeclaration(function) => {
                            if function
                                .id
                                .as_ref()
                                .is_some_and(|id| id.name.as_str() == name)
                            {
                                return Some(Value::function(Rc::clone(module), root, function));
                            }
                        }
                        Declaration::ClassDeclaration(class) => {
                            if class.id.as_ref().is_some_and(|id| id.name.as_str() == name) {
                                return Some(Value::class(Rc::clone(module), root, class));
                            }
                        }
                        Declaration::VariableDeclaration(variable) => {
                            for declarator in &variable.declarations {
                                if let oxc_ast::ast::BindingPatternKind::BindingIdentifier(id) =
                                    &declarator.id.kind
                                {
                                    if id.name.as_str() == name {
                                        if let Some(init) = &declarator.init {
                                            return Some(Value::expr(
                                                Rc::clone(module),
                                                root,
                                                init,
                                            ));
                                        }
                                    }
                                }
                            }
                        }
                        _ => {}
                    }
                }
                for specifier in &export.specifiers {
                    let exported = module_export_name(&specifier.exported);
                    if exported != name {
                        continue;
                    }
                    let local = module_export_name(&specifier.local);
                    if let Some(source) = &export.source {
                        // `export { local as name } from '...'`
                        return session.import_value(module, source.value.as_str(), local);
                    }
                    return resolve_local_export(session, module, local);
                }
            }
            Statement::ExportDefaultDeclaration(export) if name == "default" => {
                match &export.declaration {
                    ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                        return Some(Value::function(Rc::clone(module), root, function));
                    }
                    ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                        return Some(Value::class(Rc::clone(module), root, class));
                    }
                    declaration => {
                        if let Some(expression) = declaration.as_expression() {
                            return Some(Value::expr(Rc::clone(module), root, expression));
                        }
                    }
                }
            }
            Statement::ExportAllDeclaration(export) => {
                if export.exported.is_none() {
                    star_sources.push(export.source.value.as_str());
                }
            }
            Statement::TSExportAssignment(export) if name == "default" => {
                return Some(Value::expr(Rc::clone(module), root, &export.expression));
            }
            Statement::ExpressionStatement(statement) => {
                if let Expression::AssignmentExpression(assignment) = &statement.expression {
                    if let Some(exported) = commonjs_export_name(&assignment.left) {
                        let matches = match &exported {
                            Some(exported) => exported == name,
                            None => name == "default",
                        };
                        if matches {
                            return Some(Value::expr(Rc::clone(module), root, &assignment.right));
                        }
                    }
                }
            }
            _ => {}
        }
    }

    // `export * from '...'` never re-exports the default.
    if name != "default" {
        for source in star_sources {
            if let Some(found) = session.import_value(module, source, name) {
                return Some(found);
            }
        }
    }
    None
}

/// Resolves a locally bound name exported via a specifier list.
fn resolve_local_export<'a>(
    session: &Session<'a>,
    module: &Rc<FileContext<'a>>,
    local: &str,
) -> Option<Value<'a>> {
    let root = module.scopes.root();
    let (scope, binding) = module.scopes.lookup_value(root, local)?;
    let mut seen = FxHashSet::default();
    value::binding_value(session, module, scope, binding, local, &mut seen)
}

fn find_exported_type<'a>(
    session: &Session<'a>,
    module: &Rc<FileContext<'a>>,
    name: &str,
) -> Option<TypeRef<'a>> {
    // Re-exports first: `export { T } from '...'` and `export type { T }`.
    for statement in &module.program.body {
        if let Statement::ExportNamedDeclaration(export) = statement {
            for specifier in &export.specifiers {
                if module_export_name(&specifier.exported) != name {
                    continue;
                }
                let local = module_export_name(&specifier.local);
                if let Some(source) = &export.source {
                    return session.import_type(module, source.value.as_str(), local);
                }
                return type_ref_for(session, module, local);
            }
        }
    }

    type_ref_for(session, module, name)
}

/// A type declaration visible in the module scope under `name`. Exported
/// type declarations bind in module scope, so a plain lookup covers
/// `export interface` / `export type` as well.
fn type_ref_for<'a>(
    session: &Session<'a>,
    module: &Rc<FileContext<'a>>,
    name: &str,
) -> Option<TypeRef<'a>> {
    let root = module.scopes.root();
    let (scope, binding) = module.scopes.lookup_type(root, name)?;
    match binding {
        TypeBinding::Import { source, imported } => {
            session.import_type(module, source, imported)
        }
        binding => Some(TypeRef {
            file: Rc::clone(module),
            scope,
            binding,
        }),
    }
}

fn module_export_name<'a>(name: &'a ModuleExportName<'a>) -> &'a str {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.as_str(),
        ModuleExportName::IdentifierReference(ident) => ident.name.as_str(),
        ModuleExportName::StringLiteral(literal) => literal.value.as_str(),
    }
}

/// Classifies an assignment target as a CommonJS export.
///
/// Returns `Some(None)` for `module.exports = ...` (the default export) and
/// `Some(Some(name))` for `exports.name = ...` / `module.exports.name = ...`.
pub(crate) fn commonjs_export_name(
    target: &oxc_ast::ast::AssignmentTarget<'_>,
) -> Option<Option<String>> {
    let oxc_ast::ast::AssignmentTarget::StaticMemberExpression(member) = target else {
        return None;
    };
    let property = member.property.name.as_str();
    match &member.object {
        Expression::Identifier(object) if object.name.as_str() == "module" && property == "exports" => {
            Some(None)
        }
        Expression::Identifier(object) if object.name.as_str() == "exports" => {
            Some(Some(property.to_string()))
        }
        Expression::StaticMemberExpression(inner) => {
            let is_module_exports = matches!(
                &inner.object,
                Expression::Identifier(object) if object.name.as_str() == "module"
            ) && inner.property.name.as_str() == "exports";
            is_module_exports.then(|| Some(property.to_string()))
        }
        _ => None,
    }
}
