//! Hoverbot Simulation Core
//!
//! Perception & combat decision ядро враждебного hoverbot'а (headless Bevy ECS):
//! кого видит, кого помнит, в attack range ли цель, как реагирует на урон,
//! что происходит при смерти/падении с уровня.
//!
//! Навигация, рендер, звук, VFX: внешние collaborators: ядро только пишет события.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod actor;
pub mod ai;
pub mod combat;
pub mod components;
pub mod enemy;
pub mod logger;
pub mod physics;

// Re-export базовых типов для удобства
pub use actor::{spawn_actor, spawn_player, ActorSpawn};
pub use ai::{
    AIPlugin, AttackRequested, CombatGate, DamageTickSfx, EnemyDamaged, KnownTarget, Perception,
    TargetAnchor, TargetDetected, TargetLost,
};
pub use combat::{Attacker, CombatPlugin, DamageDealt, DamageRequest, Dead, DespawnAfter, EntityDied};
pub use components::*;
pub use enemy::{
    spawn_enemy, DamageFeedback, DeathVfxRequested, DestroyCause, Enemy, EnemyConfig,
    EnemyDestroyed, EnemyPlugin, EnemyRegistry, EnemySetupError, EnemySpawn, LootDropRequested,
    SelfColliders,
};
pub use physics::{
    Collider, ColliderEntry, ColliderOwner, ColliderWorld, RayHit, SpatialQuery, SpatialQueryService,
};

/// Частота simulation tick
pub const TICK_HZ: f64 = 60.0;

/// Фазы одного тика (FixedUpdate, строго последовательно)
///
/// Damage events применяются целиком после Detection: никогда посреди неё.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverbotSet {
    /// Сброс per-tick флагов, sync коллайдеров, cooldowns, apply_damage
    Prepare,
    /// Out-of-bounds self-destruct
    Bounds,
    Detection,
    DamageReaction,
    CombatGate,
    /// Detected/lost transitions
    Notify,
    /// Death processing + отложенный деспавн
    Lifecycle,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                HoverbotSet::Prepare,
                HoverbotSet::Bounds,
                HoverbotSet::Detection,
                HoverbotSet::DamageReaction,
                HoverbotSet::CombatGate,
                HoverbotSet::Notify,
                HoverbotSet::Lifecycle,
            )
                .chain(),
        );

        // Collaborators: вставляем только если владелец App не подложил свои
        if !app.world().contains_resource::<SpatialQueryService>() {
            app.insert_resource(SpatialQueryService::headless());
        }
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
        app.init_resource::<EnemyRegistry>()
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .add_systems(
                FixedUpdate,
                physics::sync_spatial_colliders.in_set(HoverbotSet::Prepare),
            )
            .add_plugins((CombatPlugin, AIPlugin, EnemyPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время идёт фиксированными шагами (не по wall clock): один `app.update()`
/// продвигает мир на один tick: повторяемо и в тестах, и в headless прогонах.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_HZ,
        )))
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}
