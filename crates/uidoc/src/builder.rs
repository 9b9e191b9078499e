use indexmap::IndexMap;

use crate::model::{Documentation, MethodDescriptor, PropDescriptor};

/// Mutable accumulator that handlers write into while processing one
/// component definition.
///
/// Descriptor access is get-or-create and idempotent: repeated calls for
/// the same name return the same mutable descriptor, so independent
/// handlers can refine a descriptor another handler created. Scalar
/// setters are first-write-wins; a handler never silently overwrites a
/// field an earlier handler populated.
#[derive(Debug, Default)]
pub struct DocumentationBuilder {
    display_name: Option<String>,
    description: Option<String>,
    props: IndexMap<String, PropDescriptor>,
    context: IndexMap<String, PropDescriptor>,
    child_context: IndexMap<String, PropDescriptor>,
    composes: Vec<String>,
    methods: Vec<MethodDescriptor>,
    extra: IndexMap<String, serde_json::Value>,
}

impl DocumentationBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the descriptor for a prop, creating it on first access.
    pub fn prop_mut(&mut self, name: impl Into<String>) -> &mut PropDescriptor {
        self.props.entry(name.into()).or_default()
    }

    /// Returns the descriptor for a context entry, creating it on first
    /// access.
    pub fn context_mut(&mut self, name: impl Into<String>) -> &mut PropDescriptor {
        self.context.entry(name.into()).or_default()
    }

    /// Returns the descriptor for a child-context entry, creating it on
    /// first access.
    pub fn child_context_mut(&mut self, name: impl Into<String>) -> &mut PropDescriptor {
        self.child_context.entry(name.into()).or_default()
    }

    /// Returns `true` when a prop with this name already exists.
    pub fn has_prop(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }

    /// Records a composed module specifier, preserving first-seen order
    /// and dropping duplicates.
    pub fn add_composes(&mut self, specifier: impl Into<String>) {
        let specifier = specifier.into();
        if !self.composes.contains(&specifier) {
            self.composes.push(specifier);
        }
    }

    /// Sets the display name unless one was already set.
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        if self.display_name.is_none() {
            self.display_name = Some(name.into());
        }
    }

    /// Sets the component description unless one was already set.
    pub fn set_description(&mut self, description: impl Into<String>) {
        if self.description.is_none() {
            self.description = Some(description.into());
        }
    }

    /// Appends a method descriptor.
    pub fn add_method(&mut self, method: MethodDescriptor) {
        self.methods.push(method);
    }

    /// Sets an arbitrary scalar field unless one was already set.
    pub fn set_extra(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.extra.entry(key.into()).or_insert(value);
    }

    /// Reads back a scalar field set with [`Self::set_extra`].
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    /// Produces the immutable documentation record. Empty collections are
    /// carried as empty and dropped by the serializer.
    pub fn finalize(self) -> Documentation {
        Documentation {
            display_name: self.display_name,
            description: self.description,
            props: self.props,
            context: self.context,
            child_context: self.child_context,
            composes: self.composes,
            methods: self.methods,
            extra: self.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prop_access_is_idempotent() {
        let mut builder = DocumentationBuilder::new();
        builder.prop_mut("value").required = Some(true);
        builder.prop_mut("value").description = Some("a value".to_string());

        let doc = builder.finalize();
        assert_eq!(doc.props.len(), 1);
        let prop = &doc.props["value"];
        assert_eq!(prop.required, Some(true));
        assert_eq!(prop.description.as_deref(), Some("a value"));
    }

    #[test]
    fn scalar_setters_are_first_write_wins() {
        let mut builder = DocumentationBuilder::new();
        builder.set_display_name("First");
        builder.set_display_name("Second");
        assert_eq!(builder.finalize().display_name.as_deref(), Some("First"));
    }

    #[test]
    fn composes_preserves_order_and_dedupes() {
        let mut builder = DocumentationBuilder::new();
        builder.add_composes("./a");
        builder.add_composes("./b");
        builder.add_composes("./a");
        assert_eq!(builder.finalize().composes, vec!["./a", "./b"]);
    }
}
