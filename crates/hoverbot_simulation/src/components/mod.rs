//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (affiliation, aim point, health)
//! - player: player control marker (Player)
//! - world: prefab ссылки для внешних spawn запросов (PrefabPath)

pub mod actor;
pub mod player;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use player::*;
pub use world::*;
