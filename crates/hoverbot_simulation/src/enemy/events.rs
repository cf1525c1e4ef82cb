//! Lifecycle events — fire-and-forget запросы к внешнему миру

use bevy::prelude::*;

use crate::components::PrefabPath;

/// Сколько живёт death VFX (управляет collaborator)
pub const DEATH_VFX_LIFETIME: f32 = 5.0;

/// Заспавнить death VFX в точке
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DeathVfxRequested {
    pub enemy: Entity,
    pub prefab: PrefabPath,
    pub position: Vec3,
    pub lifetime: f32,
}

/// Заспавнить loot в позиции умершего hoverbot'а
#[derive(Event, Debug, Clone, PartialEq)]
pub struct LootDropRequested {
    pub enemy: Entity,
    pub prefab: PrefabPath,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyCause {
    /// Упал ниже self_destruct_y_height: без VFX/loot
    OutOfBounds,
    /// Истёк death_duration после смерти
    AfterDeath,
}

/// Hoverbot удалён из мира
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyDestroyed {
    pub enemy: Entity,
    pub cause: DestroyCause,
}
