//! In-memory record of resources created during a test run.
//!
//! A [`State`] is what a [`crate::Provider`] hands back after apply or
//! destroy: resource instances keyed by logical name, e.g.
//! `kaleido_environment.basicEnv`. Checks read it, nothing else mutates it.

use std::collections::BTreeMap;

/// One provisioned resource instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceInstance {
    id: String,
    attributes: BTreeMap<String, String>,
}

impl ResourceInstance {
    /// Creates an instance with the given primary identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds a stored attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Primary identifier; empty for an instance that never provisioned.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Looks up a stored attribute by key.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Resources recorded for a test run, keyed by logical resource name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    resources: BTreeMap<String, ResourceInstance>,
}

impl State {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource instance under a logical name.
    #[must_use]
    pub fn with_resource(
        mut self,
        name: impl Into<String>,
        instance: ResourceInstance,
    ) -> Self {
        self.resources.insert(name.into(), instance);
        self
    }

    /// Looks up a resource instance by logical name.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<&ResourceInstance> {
        self.resources.get(name)
    }

    /// Whether no resources are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Number of recorded resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Iterates over logical names of recorded resources.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }
}
