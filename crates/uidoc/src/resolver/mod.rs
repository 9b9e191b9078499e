//! Definition discovery strategies.
//!
//! A resolver scans one file and returns the component definitions a run
//! should document. The strategies differ in where they look (exports only,
//! the whole tree, annotated nodes) but share the same classification
//! machinery, so a candidate value found anywhere goes through identical
//! wrapper unwrapping and deduplication.

mod all;
mod annotated;
mod chain;
mod exported;
pub(crate) mod walk_util;

use std::rc::Rc;

pub use all::FindAllDefinitions;
pub use annotated::FindAnnotatedDefinitions;
pub use chain::{ChainPolicy, ChainResolver};
pub use exported::FindExportedDefinitions;

use crate::component::{self, Definition};
use crate::error::Result;
use crate::session::{FileContext, Session};
use crate::value::{self, Value};

/// Finds the component definitions to document in one file.
pub trait Resolver {
    /// Scans `file` and returns its definitions, ordered by discovery.
    fn resolve<'a>(
        &self,
        session: &Session<'a>,
        file: &Rc<FileContext<'a>>,
    ) -> Result<Vec<Definition<'a>>>;
}

/// Resolves a candidate value and classifies the result, unwrapping generic
/// wrapper calls when direct classification fails.
pub(crate) fn definition_from_value<'a>(
    session: &Session<'a>,
    candidate: Value<'a>,
    name_hint: Option<String>,
    doc_anchors: Vec<u32>,
) -> Option<Definition<'a>> {
    let resolved = value::resolve_to_value(session, candidate);
    let located = component::classify_or_unwrap(session, &resolved)?;
    Some(Definition::new(located, name_hint, doc_anchors))
}
