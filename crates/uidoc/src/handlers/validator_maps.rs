//! Handlers for the three runtime validator maps: `propTypes`,
//! `contextTypes`, and `childContextTypes`.

use crate::builder::DocumentationBuilder;
use crate::component::Definition;
use crate::handlers::{self, Handler};
use crate::model::PropDescriptor;
use crate::session::Session;
use crate::types::prop_types;
use crate::value;

/// Which builder map a validator map feeds.
#[derive(Clone, Copy)]
enum Slot {
    Props,
    Context,
    ChildContext,
}

impl Slot {
    fn member(self) -> &'static str {
        match self {
            Slot::Props => "propTypes",
            Slot::Context => "contextTypes",
            Slot::ChildContext => "childContextTypes",
        }
    }

    fn descriptor<'b>(
        self,
        builder: &'b mut DocumentationBuilder,
        name: &str,
    ) -> &'b mut PropDescriptor {
        match self {
            Slot::Props => builder.prop_mut(name),
            Slot::Context => builder.context_mut(name),
            Slot::ChildContext => builder.child_context_mut(name),
        }
    }
}

fn amend<'a>(
    builder: &mut DocumentationBuilder,
    session: &Session<'a>,
    definition: &Definition<'a>,
    slot: Slot,
) {
    let Some(member) = handlers::find_member_value(session, definition, slot.member()) else {
        return;
    };
    let resolved = value::resolve_to_value(session, member);
    let mut entries = Vec::new();
    handlers::collect_prop_entries(session, &resolved, &mut entries);
    for entry in entries {
        let synthesized = prop_types::synthesize(session, &entry.value);
        let descriptor = slot.descriptor(builder, &entry.name);
        if descriptor.required.is_none() {
            descriptor.required = Some(synthesized.required);
        }
        descriptor.prop_type = Some(synthesized);
    }
}

/// Documents props from the `propTypes` validator map.
pub struct PropTypeHandler;

impl Handler for PropTypeHandler {
    fn handle<'a>(
        &self,
        builder: &mut DocumentationBuilder,
        session: &Session<'a>,
        definition: &Definition<'a>,
    ) {
        amend(builder, session, definition, Slot::Props);
    }
}

/// Documents context entries from the `contextTypes` validator map.
pub struct ContextTypeHandler;

impl Handler for ContextTypeHandler {
    fn handle<'a>(
        &self,
        builder: &mut DocumentationBuilder,
        session: &Session<'a>,
        definition: &Definition<'a>,
    ) {
        amend(builder, session, definition, Slot::Context);
    }
}

/// Documents child-context entries from the `childContextTypes` validator
/// map.
pub struct ChildContextTypeHandler;

impl Handler for ChildContextTypeHandler {
    fn handle<'a>(
        &self,
        builder: &mut DocumentationBuilder,
        session: &Session<'a>,
        definition: &Definition<'a>,
    ) {
        amend(builder, session, definition, Slot::ChildContext);
    }
}
