//! Handler for the component display name.

use oxc_ast::ast::Expression;

use crate::builder::DocumentationBuilder;
use crate::component::Definition;
use crate::handlers::{self, Handler};
use crate::session::Session;
use crate::value;

/// Documents the display name: an explicit `displayName` member wins over
/// the name the definition was bound or exported under.
pub struct DisplayNameHandler;

impl Handler for DisplayNameHandler {
    fn handle<'a>(
        &self,
        builder: &mut DocumentationBuilder,
        session: &Session<'a>,
        definition: &Definition<'a>,
    ) {
        if let Some(member) = handlers::find_member_value(session, definition, "displayName") {
            let resolved = value::resolve_to_value(session, member);
            match resolved.as_expr().map(value::unwrap_expression) {
                Some(Expression::StringLiteral(literal)) => {
                    builder.set_display_name(literal.value.as_str());
                    return;
                }
                Some(Expression::NumericLiteral(literal)) => {
                    builder.set_display_name(literal.value.to_string());
                    return;
                }
                _ => {}
            }
        }
        if let Some(name) = &definition.name_hint {
            builder.set_display_name(name);
        }
    }
}
