//! Exported-definition resolver.
//!
//! Scans top-level statements only: export declarations, export specifier
//! lists, `export =`, and CommonJS `module.exports` assignments. Components
//! that are defined but never exported are deliberately invisible here.

use std::rc::Rc;

use oxc_ast::ast::{
    BindingPatternKind, Declaration, ExportDefaultDeclarationKind, Expression, Statement,
};
use rustc_hash::FxHashSet;

use crate::component::Definition;
use crate::error::{DocgenError, Result};
use crate::importer;
use crate::resolver::{Resolver, definition_from_value};
use crate::session::{FileContext, Session};
use crate::value::{self, NodeKey, Value};

/// Finds components reachable through the file's exports.
///
/// With a nonzero `limit`, discovery fails with
/// [`DocgenError::MultipleDefinitions`] the moment more distinct definitions
/// than allowed accumulate.
#[derive(Debug, Clone, Copy)]
pub struct FindExportedDefinitions {
    /// Maximum number of definitions, `0` meaning unlimited.
    pub limit: usize,
}

impl FindExportedDefinitions {
    /// Single-definition resolver; errors when a second component is found.
    pub fn single() -> Self {
        Self { limit: 1 }
    }

    /// Unlimited resolver over all exported components.
    pub fn all() -> Self {
        Self { limit: 0 }
    }
}

impl Default for FindExportedDefinitions {
    fn default() -> Self {
        Self::single()
    }
}

struct Candidate<'a> {
    value: Value<'a>,
    name_hint: Option<String>,
    doc_anchors: Vec<u32>,
}

impl Resolver for FindExportedDefinitions {
    fn resolve<'a>(
        &self,
        session: &Session<'a>,
        file: &Rc<FileContext<'a>>,
    ) -> Result<Vec<Definition<'a>>> {
        let root = file.scopes.root();
        let mut definitions: Vec<Definition<'a>> = Vec::new();
        let mut seen: FxHashSet<NodeKey> = FxHashSet::default();

        for statement in &file.program.body {
            let mut candidates: Vec<Candidate<'a>> = Vec::new();

            match statement {
                Statement::ExportNamedDeclaration(export) => {
                    if let Some(declaration) = &export.declaration {
                        match declaration {
                            Declaration::FunctionDeclaration(function) => {
                                candidates.push(Candidate {
                                    value: Value::function(Rc::clone(file), root, function),
                                    name_hint: function
                                        .id
                                        .as_ref()
                                        .map(|id| id.name.to_string()),
                                    doc_anchors: vec![export.span.start],
                                });
                            }
                            Declaration::ClassDeclaration(class) => {
                                candidates.push(Candidate {
                                    value: Value::class(Rc::clone(file), root, class),
                                    name_hint: class.id.as_ref().map(|id| id.name.to_string()),
                                    doc_anchors: vec![export.span.start],
                                });
                            }
                            Declaration::VariableDeclaration(variable) => {
                                for declarator in &variable.declarations {
                                    let BindingPatternKind::BindingIdentifier(id) =
                                        &declarator.id.kind
                                    else {
                                        continue;
                                    };
                                    let Some(init) = &declarator.init else { continue };
                                    candidates.push(Candidate {
                                        value: Value::expr(Rc::clone(file), root, init),
                                        name_hint: Some(id.name.to_string()),
                                        doc_anchors: vec![
                                            export.span.start,
                                            declarator.span.start,
                                        ],
                                    });
                                }
                            }
                            _ => {}
                        }
                    }
                    // `export { A, B as C }`, with or without a source.
                    for specifier in &export.specifiers {
                        let local = module_export_name_str(&specifier.local);
                        let exported = module_export_name_str(&specifier.exported);
                        let value = if let Some(source) = &export.source {
                            session.import_value(file, source.value.as_str(), local)
                        } else {
                            resolve_module_binding(session, file, local)
                        };
                        if let Some(value) = value {
                            candidates.push(Candidate {
                                value,
                                // `export { default }` carries no usable name.
                                name_hint: (exported != "default")
                                    .then(|| exported.to_string()),
                                doc_anchors: vec![export.span.start],
                            });
                        }
                    }
                }
                Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                    ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                        candidates.push(Candidate {
                            value: Value::function(Rc::clone(file), root, function),
                            name_hint: function.id.as_ref().map(|id| id.name.to_string()),
                            doc_anchors: vec![export.span.start],
                        });
                    }
                    ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                        candidates.push(Candidate {
                            value: Value::class(Rc::clone(file), root, class),
                            name_hint: class.id.as_ref().map(|id| id.name.to_string()),
                            doc_anchors: vec![export.span.start],
                        });
                    }
                    declaration => {
                        if let Some(expression) = declaration.as_expression() {
                            candidates.push(Candidate {
                                value: Value::expr(Rc::clone(file), root, expression),
                                name_hint: expression_name_hint(expression),
                                doc_anchors: vec![export.span.start],
                            });
                        }
                    }
                },
                Statement::TSExportAssignment(export) => {
                    candidates.push(Candidate {
                        value: Value::expr(Rc::clone(file), root, &export.expression),
                        name_hint: expression_name_hint(&export.expression),
                        doc_anchors: vec![export.span.start],
                    });
                }
                Statement::ExpressionStatement(statement) => {
                    if let Expression::AssignmentExpression(assignment) = &statement.expression {
                        if let Some(exported) =
                            importer::commonjs_export_name(&assignment.left)
                        {
                            candidates.push(Candidate {
                                value: Value::expr(Rc::clone(file), root, &assignment.right),
                                name_hint: exported,
                                doc_anchors: vec![statement.span.start],
                            });
                        }
                    }
                }
                _ => {}
            }

            for candidate in candidates {
                let Some(definition) = definition_from_value(
                    session,
                    candidate.value,
                    candidate.name_hint,
                    candidate.doc_anchors,
                ) else {
                    continue;
                };
                if !seen.insert(definition.key) {
                    continue;
                }
                definitions.push(definition);
                if self.limit > 0 && definitions.len() > self.limit {
                    return Err(DocgenError::MultipleDefinitions {
                        path: file.path.clone(),
                        found: definitions.len(),
                        limit: self.limit,
                    });
                }
            }
        }

        Ok(definitions)
    }
}

/// Display-name hint for a bare exported expression. `export default
/// Parts.Knob` should document as `Knob`, the same way a named binding
/// would.
fn expression_name_hint(expression: &Expression<'_>) -> Option<String> {
    match value::unwrap_expression(expression) {
        Expression::StaticMemberExpression(member) => Some(member.property.name.to_string()),
        _ => None,
    }
}

fn module_export_name_str<'a>(name: &'a oxc_ast::ast::ModuleExportName<'a>) -> &'a str {
    match name {
        oxc_ast::ast::ModuleExportName::IdentifierName(ident) => ident.name.as_str(),
        oxc_ast::ast::ModuleExportName::IdentifierReference(ident) => ident.name.as_str(),
        oxc_ast::ast::ModuleExportName::StringLiteral(literal) => literal.value.as_str(),
    }
}

/// The value a module-scope name binds to, including import bindings.
fn resolve_module_binding<'a>(
    session: &Session<'a>,
    file: &Rc<FileContext<'a>>,
    name: &str,
) -> Option<Value<'a>> {
    let root = file.scopes.root();
    let (scope, binding) = file.scopes.lookup_value(root, name)?;
    let mut seen = FxHashSet::default();
    value::binding_value(session, file, scope, binding, name, &mut seen)
}
