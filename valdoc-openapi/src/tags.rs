use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::classify;

/// Registry that collects the group tags seen while assembling a document.
///
/// Tags are deduplicated by name; the first description registered for a
/// name is kept. Insertion order is preserved so the emitted `tags` list is
/// stable across runs.
#[derive(Debug, Default)]
pub struct TagRegistry {
    tags: IndexMap<String, String>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag. Returns `false` if the name was already present.
    pub fn register(&mut self, name: &str, description: &str) -> bool {
        if self.tags.contains_key(name) {
            return false;
        }
        tracing::trace!(tag = name, "registered tag");
        self.tags.insert(name.to_string(), description.to_string());
        true
    }

    /// Register a route group tag with its derived `"<Tag> endpoints"` description.
    pub fn register_group(&mut self, name: &str) -> bool {
        if self.tags.contains_key(name) {
            return false;
        }
        self.register(name, &classify::tag_description(name))
    }

    /// Check if a tag is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Description registered for a tag.
    pub fn description(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Consume the registry and return the document's `tags` array.
    pub fn into_tags(self) -> Vec<Value> {
        self.tags
            .into_iter()
            .map(|(name, description)| json!({ "name": name, "description": description }))
            .collect()
    }
}
