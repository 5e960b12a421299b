use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use kanon_core::{KanonError, KanonResult};
use kanon_geom::EntityId;

/// Explicit name → entity map handed to proof steps.
///
/// Steps never discover "the current scene" ambiently; the driver
/// constructs a registry and passes it in, so lookups are visible in
/// the step's signature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    names: HashMap<String, EntityId>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Bind a name to an entity, replacing any previous binding.
    pub fn insert(&mut self, name: impl Into<String>, id: EntityId) -> Option<EntityId> {
        self.names.insert(name.into(), id)
    }

    /// Look up a name. Missing names are an error, not a silent `None`:
    /// a proof step referring to "BC" expects it to exist.
    pub fn get(&self, name: &str) -> KanonResult<EntityId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| KanonError::unknown(format!("no entity named '{name}'")))
    }

    pub fn remove(&mut self, name: &str) -> Option<EntityId> {
        self.names.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// All bindings, in arbitrary order.
    pub fn all(&self) -> impl Iterator<Item = (&str, EntityId)> {
        self.names.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }
}
