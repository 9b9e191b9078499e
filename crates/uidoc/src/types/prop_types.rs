//! Runtime validator chain synthesis.
//!
//! Normalizes `PropTypes.*` expressions into [`PropTypeDescriptor`] values.
//! The chain is read syntactically: a trailing `.isRequired` marks the
//! descriptor required, the final member name selects the validator, and
//! parameterized validators resolve their arguments through the value
//! resolver so shared or imported validator fragments still synthesize.

use oxc_ast::ast::{Expression, ObjectPropertyKind};
use oxc_span::GetSpan;

use crate::model::PropTypeDescriptor;
use crate::session::Session;
use crate::value::{self, Value};

/// Validator names that carry no payload.
const SIMPLE_VALIDATORS: &[&str] = &[
    "array",
    "bool",
    "func",
    "number",
    "object",
    "string",
    "symbol",
    "node",
    "element",
    "elementType",
    "any",
];

/// Synthesizes the descriptor for one validator expression.
pub(crate) fn synthesize<'a>(session: &Session<'a>, value: &Value<'a>) -> PropTypeDescriptor {
    let Some(expression) = value.as_expr() else {
        return custom(value.raw());
    };
    from_expression(session, value, expression, 0)
}

fn from_expression<'a>(
    session: &Session<'a>,
    context: &Value<'a>,
    expression: &'a Expression<'a>,
    depth: u8,
) -> PropTypeDescriptor {
    let expression = value::unwrap_expression(expression);
    if depth > 16 {
        return custom(context.file.raw(expression.span()));
    }

    match expression {
        Expression::StaticMemberExpression(member) => {
            let property = member.property.name.as_str();
            if property == "isRequired" {
                let mut descriptor = from_expression(session, context, &member.object, depth + 1);
                descriptor.required = true;
                return descriptor;
            }
            if SIMPLE_VALIDATORS.contains(&property) {
                return PropTypeDescriptor::simple(property);
            }
            // Not a validator name: maybe a reference to a shared fragment
            // (`Shared.types.size`). Resolve and retry.
            resolve_and_retry(session, context, expression, depth)
        }
        Expression::CallExpression(call) => {
            let Some(callee) = crate::component::callee_final_name(&call.callee) else {
                return custom(context.file.raw(expression.span()));
            };
            let argument = call
                .arguments
                .first()
                .and_then(|argument| argument.as_expression());
            match (callee, argument) {
                ("arrayOf", Some(argument)) | ("objectOf", Some(argument)) => {
                    let inner = from_expression(session, context, argument, depth + 1);
                    PropTypeDescriptor {
                        name: callee.to_string(),
                        value: Some(to_json(&inner)),
                        ..PropTypeDescriptor::default()
                    }
                }
                ("instanceOf", Some(argument)) => PropTypeDescriptor {
                    name: "instanceOf".to_string(),
                    value: Some(serde_json::Value::String(
                        context.file.raw(argument.span()).to_string(),
                    )),
                    ..PropTypeDescriptor::default()
                },
                ("oneOf", Some(argument)) => one_of(session, context, argument),
                ("oneOfType", Some(argument)) => one_of_type(session, context, argument, depth),
                ("shape", Some(argument)) | ("exact", Some(argument)) => {
                    shape(session, context, callee, argument, depth)
                }
                _ => custom(context.file.raw(expression.span())),
            }
        }
        Expression::Identifier(_) => resolve_and_retry(session, context, expression, depth),
        _ => custom(context.file.raw(expression.span())),
    }
}

/// Resolves a reference one step and re-synthesizes; falls back to a custom
/// descriptor carrying the raw reference text.
fn resolve_and_retry<'a>(
    session: &Session<'a>,
    context: &Value<'a>,
    expression: &'a Expression<'a>,
    depth: u8,
) -> PropTypeDescriptor {
    let before = context.with_expr(expression);
    let key = before.key();
    let resolved = value::resolve_to_value(session, before);
    if resolved.key() == key {
        return custom(context.file.raw(expression.span()));
    }
    match resolved.as_expr() {
        Some(inner) => from_expression(session, &resolved, inner, depth + 1),
        None => custom(context.file.raw(expression.span())),
    }
}

/// `oneOf([...])`: an enum of raw values with computed flags. A payload
/// that does not resolve to an array literal stays an opaque enum.
fn one_of<'a>(
    session: &Session<'a>,
    context: &Value<'a>,
    argument: &'a Expression<'a>,
) -> PropTypeDescriptor {
    let resolved = value::resolve_to_value(session, context.with_expr(argument));
    let Some(Expression::ArrayExpression(array)) =
        resolved.as_expr().map(value::unwrap_expression)
    else {
        return PropTypeDescriptor {
            name: "enum".to_string(),
            computed: Some(true),
            value: Some(serde_json::Value::String(
                context.file.raw(argument.span()).to_string(),
            )),
            ..PropTypeDescriptor::default()
        };
    };
    let mut entries = Vec::new();
    for element in &array.elements {
        let Some(expression) = element.as_expression() else {
            continue;
        };
        entries.push(serde_json::json!({
            "value": resolved.file.raw(expression.span()),
            "computed": value::is_computed_expression(expression),
        }));
    }
    PropTypeDescriptor {
        name: "enum".to_string(),
        value: Some(serde_json::Value::Array(entries)),
        ..PropTypeDescriptor::default()
    }
}

/// `oneOfType([...])`: a union of nested descriptors.
fn one_of_type<'a>(
    session: &Session<'a>,
    context: &Value<'a>,
    argument: &'a Expression<'a>,
    depth: u8,
) -> PropTypeDescriptor {
    let resolved = value::resolve_to_value(session, context.with_expr(argument));
    let Some(Expression::ArrayExpression(array)) =
        resolved.as_expr().map(value::unwrap_expression)
    else {
        return custom(context.file.raw(argument.span()));
    };
    let mut members = Vec::new();
    for element in &array.elements {
        let Some(expression) = element.as_expression() else {
            continue;
        };
        let descriptor = from_expression(session, &resolved, expression, depth + 1);
        members.push(to_json(&descriptor));
    }
    PropTypeDescriptor {
        name: "union".to_string(),
        value: Some(serde_json::Value::Array(members)),
        ..PropTypeDescriptor::default()
    }
}

/// `shape({...})` / `exact({...})`: name-keyed nested descriptors, with
/// spread fragments resolved and inlined.
fn shape<'a>(
    session: &Session<'a>,
    context: &Value<'a>,
    callee: &str,
    argument: &'a Expression<'a>,
    depth: u8,
) -> PropTypeDescriptor {
    let resolved = value::resolve_to_value(session, context.with_expr(argument));
    let Some(Expression::ObjectExpression(_)) =
        resolved.as_expr().map(value::unwrap_expression)
    else {
        return PropTypeDescriptor {
            name: callee.to_string(),
            computed: Some(true),
            value: Some(serde_json::Value::String(
                context.file.raw(argument.span()).to_string(),
            )),
            ..PropTypeDescriptor::default()
        };
    };
    let mut fields = serde_json::Map::new();
    collect_shape_fields(session, &resolved, depth, &mut fields);
    PropTypeDescriptor {
        name: callee.to_string(),
        value: Some(serde_json::Value::Object(fields)),
        ..PropTypeDescriptor::default()
    }
}

fn collect_shape_fields<'a>(
    session: &Session<'a>,
    object_value: &Value<'a>,
    depth: u8,
    fields: &mut serde_json::Map<String, serde_json::Value>,
) {
    if depth > 16 {
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
                let descriptor =
                    from_expression(session, object_value, &property.value, depth + 1);
                fields.insert(name.to_string(), to_json(&descriptor));
            }
            ObjectPropertyKind::SpreadProperty(spread) => {
                let source =
                    value::resolve_to_value(session, object_value.with_expr(&spread.argument));
                collect_shape_fields(session, &source, depth + 1, fields);
            }
        }
    }
}

fn custom(raw: &str) -> PropTypeDescriptor {
    PropTypeDescriptor {
        name: "custom".to_string(),
        raw: Some(raw.to_string()),
        ..PropTypeDescriptor::default()
    }
}

fn to_json(descriptor: &PropTypeDescriptor) -> serde_json::Value {
    serde_json::to_value(descriptor).unwrap_or(serde_json::Value::Null)
}
