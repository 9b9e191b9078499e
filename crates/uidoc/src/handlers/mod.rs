//! Documentation handlers.
//!
//! A handler inspects one recognized definition and writes facts into the
//! [`DocumentationBuilder`]. Handlers are independent and run in order;
//! descriptor access on the builder is get-or-create, so several handlers
//! can refine the same prop. The default set covers validator maps, static
//! type annotations, defaults, docblocks, display names, methods, and
//! composition.

use std::rc::Rc;

use oxc_ast::ast::{AssignmentTarget, Expression, ObjectPropertyKind, Statement};
use rustc_hash::FxHashSet;

use crate::builder::DocumentationBuilder;
use crate::component::{ComponentShape, Definition};
use crate::session::Session;
use crate::value::{self, Value};

mod composition;
mod default_props;
mod display_name;
mod docblock;
mod methods;
mod static_types;
mod validator_maps;

pub use composition::CompositionHandler;
pub use default_props::DefaultPropsHandler;
pub use display_name::DisplayNameHandler;
pub use docblock::{ComponentDocblockHandler, PropDocblockHandler};
pub use methods::MethodDocumentationHandler;
pub use static_types::CodeTypeHandler;
pub use validator_maps::{ChildContextTypeHandler, ContextTypeHandler, PropTypeHandler};

/// Extracts one documentation concern from a definition.
pub trait Handler {
    /// Inspects `definition` and records findings on `builder`.
    fn handle<'a>(
        &self,
        builder: &mut DocumentationBuilder,
        session: &Session<'a>,
        definition: &Definition<'a>,
    );
}

/// The standard handler set, in execution order.
pub fn default_handlers() -> Vec<Box<dyn Handler>> {
    vec![
        Box::new(PropTypeHandler),
        Box::new(ContextTypeHandler),
        Box::new(ChildContextTypeHandler),
        Box::new(CompositionHandler),
        Box::new(PropDocblockHandler),
        Box::new(CodeTypeHandler),
        Box::new(DefaultPropsHandler),
        Box::new(ComponentDocblockHandler),
        Box::new(DisplayNameHandler),
        Box::new(MethodDocumentationHandler),
    ]
}

/// Finds the value bound to a named member of the definition: a class
/// static, a factory spec property, or a module-level `Name.member = ...`
/// assignment targeting the definition.
pub(crate) fn find_member_value<'a>(
    session: &Session<'a>,
    definition: &Definition<'a>,
    name: &str,
) -> Option<Value<'a>> {
    let mut seen = FxHashSet::default();
    match definition.shape.innermost() {
        ComponentShape::Class(class) => {
            if let Some(found) =
                value::class_static_value(&definition.file, definition.scope, class, name)
            {
                return Some(found);
            }
        }
        ComponentShape::FactoryObject { object, .. } => {
            if let Some(found) = value::object_property_value(
                session,
                &definition.file,
                definition.scope,
                object,
                name,
                &mut seen,
            ) {
                return Some(found);
            }
        }
        _ => {}
    }
    module_assignment(session, definition, name)
}

/// Scans the module body for `Target.member = value` where `Target`
/// resolves back to this definition.
fn module_assignment<'a>(
    session: &Session<'a>,
    definition: &Definition<'a>,
    name: &str,
) -> Option<Value<'a>> {
    let outer = definition.key;
    let inner_span = definition.shape.innermost_span();
    let inner = (definition.file.id, inner_span.start, inner_span.end);
    let root = definition.file.scopes.root();

    for statement in &definition.file.program.body {
        let Statement::ExpressionStatement(statement) = statement else {
            continue;
        };
        let Expression::AssignmentExpression(assignment) = &statement.expression else {
            continue;
        };
        let AssignmentTarget::StaticMemberExpression(member) = &assignment.left else {
            continue;
        };
        if member.property.name.as_str() != name {
            continue;
        }
        let target = value::resolve_to_value(
            session,
            Value::expr(Rc::clone(&definition.file), root, &member.object),
        );
        let key = target.key();
        if key == outer || key == inner {
            return Some(Value::expr(
                Rc::clone(&definition.file),
                root,
                &assignment.right,
            ));
        }
    }
    None
}

/// One named entry of a resolved prop map object.
pub(crate) struct PropEntry<'a> {
    /// Property name.
    pub name: String,
    /// The property value, in the file and scope the property lives in.
    pub value: Value<'a>,
    /// Span start of the property node, for docblock lookup in
    /// `value.file`.
    pub doc_anchor: u32,
}

/// Flattens a prop map object into named entries, inlining resolvable
/// spreads in declaration order. Entries keep the file context of the
/// object they were declared in, so descriptions survive composition.
pub(crate) fn collect_prop_entries<'a>(
    session: &Session<'a>,
    object_value: &Value<'a>,
    out: &mut Vec<PropEntry<'a>>,
) {
    let mut raw = Vec::new();
    collect_prop_entries_inner(session, object_value, 0, &mut raw);
    // Later declarations override earlier ones, as in an object literal,
    // while keeping the position of the first occurrence.
    for entry in raw {
        match out.iter_mut().find(|existing| existing.name == entry.name) {
            Some(existing) => *existing = entry,
            None => out.push(entry),
        }
    }
}

fn collect_prop_entries_inner<'a>(
    session: &Session<'a>,
    object_value: &Value<'a>,
    depth: u8,
    out: &mut Vec<PropEntry<'a>>,
) {
    if depth > 8 {
        return;
    }
    let Some(Expression::ObjectExpression(object)) =
        object_value.as_expr().map(value::unwrap_expression)
    else {
        return;
    };
    for property in &object.properties {
        match property {
            ObjectPropertyKind::ObjectProperty(property) => {
                if property.computed {
                    continue;
                }
                let Some(name) = property.key.static_name() else {
                    continue;
                };
                out.push(PropEntry {
                    name: name.to_string(),
                    value: object_value.with_expr(&property.value),
                    doc_anchor: property.span.start,
                });
            }
            ObjectPropertyKind::SpreadProperty(spread) => {
                let source =
                    value::resolve_to_value(session, object_value.with_expr(&spread.argument));
                collect_prop_entries_inner(session, &source, depth + 1, out);
            }
        }
    }
}
