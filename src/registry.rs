use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use serde_json::Value;

use crate::tool::ToolHandler;

/// Tool definition advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("tool name must not be empty")]
    EmptyName,
}

/// Descriptor and handler are stored together so a reader never sees one
/// without the other.
struct Entry {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

/// The set of invocable tools, shared between registration and dispatch.
#[derive(Default)]
pub struct ToolRegistry {
    entries: RwLock<HashMap<String, Entry>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the tool registered under `name`.
    ///
    /// Neither the name nor the schema is validated.
    pub fn register<H>(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
        handler: H,
    ) where
        H: ToolHandler + 'static,
    {
        let name = name.into();
        let entry = Entry {
            descriptor: ToolDescriptor {
                name: name.clone(),
                description: description.into(),
                input_schema,
            },
            handler: Arc::new(handler),
        };

        let replaced = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone(), entry)
            .is_some();

        tracing::debug!(tool = %name, replaced, "registered tool");
    }

    /// Snapshot of every descriptor, in no particular order.
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|entry| entry.descriptor.clone())
            .collect()
    }

    /// Handler for `name`. `Ok(None)` when no such tool is registered.
    pub fn lookup(&self, name: &str) -> Result<Option<Arc<dyn ToolHandler>>, RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|entry| Arc::clone(&entry.handler)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<&str> = entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ToolRegistry").field("tools", &names).finish()
    }
}
