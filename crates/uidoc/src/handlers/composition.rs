//! Handler for prop map composition.
//!
//! A spread in `propTypes` whose source comes from another module records
//! that module's specifier, so consumers can stitch the composed docs
//! together.

use oxc_ast::ast::{CallExpression, Expression};

use crate::builder::DocumentationBuilder;
use crate::component::{self, Definition};
use crate::handlers::{self, Handler};
use crate::session::Session;
use crate::value::{self, Value};

/// Records module specifiers composed into `propTypes` through spreads.
pub struct CompositionHandler;

impl Handler for CompositionHandler {
    fn handle<'a>(
        &self,
        builder: &mut DocumentationBuilder,
        session: &Session<'a>,
        definition: &Definition<'a>,
    ) {
        let Some(member) = handlers::find_member_value(session, definition, "propTypes") else {
            return;
        };
        let resolved = value::resolve_to_value(session, member);
        let Some(Expression::ObjectExpression(object)) =
            resolved.as_expr().map(value::unwrap_expression)
        else {
            return;
        };
        for property in &object.properties {
            let oxc_ast::ast::ObjectPropertyKind::SpreadProperty(spread) = property else {
                continue;
            };
            if let Some(specifier) = spread_import_source(&resolved, &spread.argument) {
                builder.add_composes(specifier);
            }
        }
    }
}

/// The module specifier a spread source is imported from, if any.
fn spread_import_source<'a>(context: &Value<'a>, argument: &'a Expression<'a>) -> Option<&'a str> {
    match value::unwrap_expression(argument) {
        Expression::Identifier(ident) => {
            component::import_source_of(&context.file, context.scope, ident.name.as_str())
        }
        Expression::StaticMemberExpression(member) => {
            match value::unwrap_expression(&member.object) {
                Expression::Identifier(ident) => {
                    component::import_source_of(&context.file, context.scope, ident.name.as_str())
                }
                Expression::CallExpression(call) => require_specifier(call),
                _ => None,
            }
        }
        Expression::CallExpression(call) => require_specifier(call),
        _ => None,
    }
}

fn require_specifier<'a>(call: &'a CallExpression<'a>) -> Option<&'a str> {
    let Expression::Identifier(callee) = value::unwrap_expression(&call.callee) else {
        return None;
    };
    if callee.name.as_str() != "require" {
        return None;
    }
    match call.arguments.first()?.as_expression()? {
        Expression::StringLiteral(literal) => Some(literal.value.as_str()),
        _ => None,
    }
}
