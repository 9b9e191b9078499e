//! Resolver combinator.

use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::component::Definition;
use crate::error::Result;
use crate::resolver::Resolver;
use crate::session::{FileContext, Session};
use crate::value::NodeKey;

/// How a [`ChainResolver`] combines its member results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainPolicy {
    /// Run every member and merge their results, deduplicated by node
    /// identity, in member order.
    All,
    /// Return the first member's non-empty result and skip the rest.
    FirstFound,
}

/// Runs several resolvers as one.
///
/// Errors propagate immediately regardless of policy.
pub struct ChainResolver {
    resolvers: Vec<Box<dyn Resolver>>,
    policy: ChainPolicy,
}

impl ChainResolver {
    /// Combines `resolvers` under `policy`.
    pub fn new(resolvers: Vec<Box<dyn Resolver>>, policy: ChainPolicy) -> Self {
        Self { resolvers, policy }
    }
}

impl Resolver for ChainResolver {
    fn resolve<'a>(
        &self,
        session: &Session<'a>,
        file: &Rc<FileContext<'a>>,
    ) -> Result<Vec<Definition<'a>>> {
        match self.policy {
            ChainPolicy::FirstFound => {
                for resolver in &self.resolvers {
                    let definitions = resolver.resolve(session, file)?;
                    if !definitions.is_empty() {
                        return Ok(definitions);
                    }
                }
                Ok(Vec::new())
            }
            ChainPolicy::All => {
                let mut merged: Vec<Definition<'a>> = Vec::new();
                let mut seen: FxHashSet<NodeKey> = FxHashSet::default();
                for resolver in &self.resolvers {
                    for definition in resolver.resolve(session, file)? {
                        if seen.insert(definition.key) {
                            merged.push(definition);
                        }
                    }
                }
                Ok(merged)
            }
        }
    }
}
