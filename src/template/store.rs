//! Template source seam.
//!
//! Template discovery and file parsing are the caller's responsibility; the
//! engine only needs to list paths and fetch parsed definitions.

use crate::error::Result;
use crate::template::TemplateDefinition;
use serde_json::Value;

/// Supplier of parsed template definitions
pub trait TemplateSource {
    /// All known template paths
    fn list(&self) -> Vec<String>;

    /// Definition for a path, `None` when unknown
    fn get(&self, path: &str) -> Option<&TemplateDefinition>;
}

/// Template source over an in-memory list, insertion order preserved
#[derive(Debug, Default)]
pub struct InMemoryTemplateStore {
    templates: Vec<(String, TemplateDefinition)>,
}

impl InMemoryTemplateStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Insert an already-parsed definition, replacing any existing entry
    pub fn insert(&mut self, path: impl Into<String>, definition: TemplateDefinition) {
        let path = path.into();
        if let Some(slot) = self.templates.iter_mut().find(|(p, _)| *p == path) {
            slot.1 = definition;
        } else {
            self.templates.push((path, definition));
        }
    }

    /// Parse a raw template value and insert it
    pub fn insert_value(&mut self, path: impl Into<String>, value: &Value) -> Result<()> {
        let definition = TemplateDefinition::from_value(value)?;
        self.insert(path, definition);
        Ok(())
    }

    /// Number of stored templates
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateSource for InMemoryTemplateStore {
    fn list(&self) -> Vec<String> {
        self.templates.iter().map(|(p, _)| p.clone()).collect()
    }

    fn get(&self, path: &str) -> Option<&TemplateDefinition> {
        self.templates
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, d)| d)
    }
}
