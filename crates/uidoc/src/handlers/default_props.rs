//! Handler for default prop values.
//!
//! Reads `defaultProps` statics, `getDefaultProps` factory methods, and
//! destructuring defaults on the props parameter. The recorded value is the
//! source text of the default expression, flagged as computed when it
//! references runtime state.

use std::rc::Rc;

use oxc_ast::ast::{BindingPatternKind, Expression};
use oxc_span::GetSpan;

use crate::builder::DocumentationBuilder;
use crate::component::{self, ComponentShape, Definition};
use crate::handlers::{self, Handler, PropEntry};
use crate::model::DefaultValue;
use crate::session::Session;
use crate::value::{self, Value, ValueNode};

/// Documents default values for props.
pub struct DefaultPropsHandler;

impl Handler for DefaultPropsHandler {
    fn handle<'a>(
        &self,
        builder: &mut DocumentationBuilder,
        session: &Session<'a>,
        definition: &Definition<'a>,
    ) {
        if let Some(member) = handlers::find_member_value(session, definition, "defaultProps") {
            let resolved = value::resolve_to_value(session, member);
            let mut entries = Vec::new();
            handlers::collect_prop_entries(session, &resolved, &mut entries);
            record_defaults(builder, session, entries);
        }

        if let ComponentShape::FactoryObject { .. } = definition.shape.innermost() {
            if let Some(returned) = factory_defaults(session, definition) {
                let mut entries = Vec::new();
                handlers::collect_prop_entries(session, &returned, &mut entries);
                record_defaults(builder, session, entries);
            }
        }

        parameter_defaults(builder, definition);
    }
}

fn record_defaults<'a>(
    builder: &mut DocumentationBuilder,
    session: &Session<'a>,
    entries: Vec<PropEntry<'a>>,
) {
    for entry in entries {
        let resolved = value::resolve_to_value(session, entry.value);
        let (raw, computed) = match resolved.as_expr() {
            Some(expression) => (
                resolved.file.raw(expression.span()),
                value::is_computed_expression(expression),
            ),
            None => (resolved.raw(), false),
        };
        let prop = builder.prop_mut(&entry.name);
        if prop.default_value.is_none() {
            prop.default_value = Some(DefaultValue {
                value: raw.to_string(),
                computed,
            });
        }
    }
}

/// The object returned by a factory spec's `getDefaultProps` method.
fn factory_defaults<'a>(
    session: &Session<'a>,
    definition: &Definition<'a>,
) -> Option<Value<'a>> {
    let member = handlers::find_member_value(session, definition, "getDefaultProps")?;
    let method = value::resolve_to_value(session, member);

    let (statements, span_start) = match method.node {
        ValueNode::Function(function) => (&function.body.as_ref()?.statements, function.span.start),
        ValueNode::Expr(expression) => match value::unwrap_expression(expression) {
            Expression::FunctionExpression(function) => {
                (&function.body.as_ref()?.statements, function.span.start)
            }
            Expression::ArrowFunctionExpression(arrow) => {
                if arrow.expression {
                    // Expression-bodied arrow: the body is the return value.
                    if let Some(oxc_ast::ast::Statement::ExpressionStatement(statement)) =
                        arrow.body.statements.first()
                    {
                        let scope = method
                            .file
                            .scopes
                            .scope_of_function(arrow.span.start)
                            .unwrap_or(method.scope);
                        let returned = value::resolve_to_value(
                            session,
                            Value::expr(Rc::clone(&method.file), scope, &statement.expression),
                        );
                        return Some(returned);
                    }
                    return None;
                }
                (&arrow.body.statements, arrow.span.start)
            }
            _ => return None,
        },
        ValueNode::Class(_) => return None,
    };

    let scope = method
        .file
        .scopes
        .scope_of_function(span_start)
        .unwrap_or(method.scope);
    let mut returns = Vec::new();
    component::collect_returned_expressions(statements, &mut returns);
    for returned in returns {
        let resolved = value::resolve_to_value(
            session,
            Value::expr(Rc::clone(&method.file), scope, returned),
        );
        if matches!(
            resolved.as_expr().map(value::unwrap_expression),
            Some(Expression::ObjectExpression(_))
        ) {
            return Some(resolved);
        }
    }
    None
}

/// Defaults written directly into a destructured props parameter,
/// e.g. `function Button({ size = 24 })`.
fn parameter_defaults<'a>(builder: &mut DocumentationBuilder, definition: &Definition<'a>) {
    let pattern = match definition.shape.innermost() {
        ComponentShape::Function(function) => {
            function.params.items.first().map(|parameter| &parameter.pattern.kind)
        }
        ComponentShape::Arrow(arrow) => {
            arrow.params.items.first().map(|parameter| &parameter.pattern.kind)
        }
        _ => None,
    };
    let Some(mut pattern) = pattern else {
        return;
    };
    // `({ a = 1 } = {})` keeps the inner object pattern.
    if let BindingPatternKind::AssignmentPattern(assignment) = pattern {
        pattern = &assignment.left.kind;
    }
    let BindingPatternKind::ObjectPattern(object) = pattern else {
        return;
    };
    for property in &object.properties {
        let Some(name) = property.key.static_name() else {
            continue;
        };
        let BindingPatternKind::AssignmentPattern(assignment) = &property.value.kind else {
            continue;
        };
        let prop = builder.prop_mut(name.as_ref());
        if prop.default_value.is_none() {
            prop.default_value = Some(DefaultValue {
                value: definition.file.raw(assignment.right.span()).to_string(),
                computed: value::is_computed_expression(&assignment.right),
            });
        }
    }
}
