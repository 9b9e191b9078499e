//! Docblock handlers for component and prop descriptions.

use crate::builder::DocumentationBuilder;
use crate::component::Definition;
use crate::handlers::{self, Handler};
use crate::jsdoc;
use crate::session::Session;
use crate::value;

/// Documents the component description from the docblock above its
/// definition or the statement it was exported through.
pub struct ComponentDocblockHandler;

impl Handler for ComponentDocblockHandler {
    fn handle<'a>(
        &self,
        builder: &mut DocumentationBuilder,
        _session: &Session<'a>,
        definition: &Definition<'a>,
    ) {
        for anchor in &definition.doc_anchors {
            if let Some(docblock) = definition.file.docblock_at(*anchor) {
                let text = jsdoc::normalize_docblock(docblock);
                if !text.is_empty() {
                    builder.set_description(text);
                    return;
                }
            }
        }
    }
}

/// Documents individual props from docblocks on their `propTypes` entries.
pub struct PropDocblockHandler;

impl Handler for PropDocblockHandler {
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
        let mut entries = Vec::new();
        handlers::collect_prop_entries(session, &resolved, &mut entries);
        for entry in entries {
            let Some(docblock) = entry.value.file.docblock_at(entry.doc_anchor) else {
                continue;
            };
            let text = jsdoc::normalize_docblock(docblock);
            if text.is_empty() {
                continue;
            }
            let prop = builder.prop_mut(&entry.name);
            if prop.description.is_none() {
                prop.description = Some(text);
            }
        }
    }
}
