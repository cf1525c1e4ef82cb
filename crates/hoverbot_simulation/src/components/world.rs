//! Prefab ссылки для spawn запросов к внешнему миру (loot, VFX)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Prefab path (data-driven ссылка на asset внешнего движка)
///
/// Ядро не загружает prefab: только передаёт путь в LootDropRequested / DeathVfxRequested.
#[derive(Debug, Clone, PartialEq, Eq, Reflect, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefabPath {
    pub path: String,
}

impl PrefabPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl std::fmt::Display for PrefabPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}
