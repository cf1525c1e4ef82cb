//! Enemy (hoverbot) domain
//!
//! - config: tunables + RON загрузка
//! - registry: EnemyRegistry collaborator
//! - feedback: hit flash + damage tick флаг
//! - lifecycle: out-of-bounds, death processing, отложенный деспавн
//! - loot: drop roll
//!
//! Spawn через `spawn_enemy`: collaborators (EnemyRegistry, SpatialQueryService)
//! обязаны существовать заранее: никакого поиска по миру в рантайме.

use bevy::prelude::*;
use thiserror::Error;

use crate::actor::{spawn_actor, ActorSpawn};
use crate::ai::{CombatGate, Perception};
use crate::combat::{apply_damage, Attacker};
use crate::logger;
use crate::physics::SpatialQueryService;
use crate::HoverbotSet;

pub mod config;
pub mod events;
pub mod feedback;
pub mod lifecycle;
pub mod loot;
pub mod registry;

pub use config::EnemyConfig;
pub use feedback::DamageFeedback;
pub use events::{DeathVfxRequested, DestroyCause, EnemyDestroyed, LootDropRequested, DEATH_VFX_LIFETIME};
pub use loot::try_drop_item;
pub use registry::EnemyRegistry;

/// Enemy Plugin
///
/// Prepare: сброс damage tick флагов, внешние смерти (Health::kill)
/// Bounds: уничтожение упавших с уровня
/// Notify: hit flash
/// Lifecycle: death processing + отложенный деспавн
///
/// EnemyRegistry вставляет владелец App (см. SimulationPlugin).
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DeathVfxRequested>()
            .add_event::<LootDropRequested>()
            .add_event::<EnemyDestroyed>();

        app.add_systems(
            FixedUpdate,
            (
                feedback::reset_damage_tick_flags.in_set(HoverbotSet::Prepare),
                // До apply_damage: смерть от урона этого тика репортит сам apply_damage
                lifecycle::report_external_deaths
                    .before(apply_damage)
                    .in_set(HoverbotSet::Prepare),
                lifecycle::ensure_within_level_bounds.in_set(HoverbotSet::Bounds),
                feedback::update_hit_flash.in_set(HoverbotSet::Notify),
                (lifecycle::handle_enemy_death, lifecycle::despawn_after_timeout)
                    .chain()
                    .in_set(HoverbotSet::Lifecycle),
            ),
        );
    }
}

/// Маркер hoverbot'а (владелец perception/combat ядра)
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(Perception, CombatGate, DamageFeedback, SelfColliders, Attacker, EnemyConfig)]
pub struct Enemy;

/// Собственные коллайдеры агента: не заслоняют ему обзор
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct SelfColliders(pub Vec<Entity>);

/// Ошибки инициализации агента (фатальны только для этого агента)
#[derive(Debug, Error)]
pub enum EnemySetupError {
    #[error("{agent}: required collaborator `{dependency}` not found")]
    MissingCollaborator {
        dependency: &'static str,
        agent: String,
    },

    #[error("{agent}: invalid config: {reason}")]
    InvalidConfig { agent: String, reason: String },

    #[error("failed to parse enemy config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),
}

/// Параметры spawn'а hoverbot'а
#[derive(Debug, Clone)]
pub struct EnemySpawn {
    pub name: String,
    pub body: ActorSpawn,
    pub config: EnemyConfig,
}

impl EnemySpawn {
    pub fn new(name: impl Into<String>, position: Vec3, affiliation: u64) -> Self {
        Self {
            name: name.into(),
            body: ActorSpawn::at(position, affiliation),
            config: EnemyConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EnemyConfig) -> Self {
        self.config = config;
        self
    }
}

/// Spawn hoverbot'а с проверкой collaborators и config
///
/// При ошибке агент не создаётся, ошибка логируется: симуляция продолжается.
pub fn spawn_enemy(world: &mut World, spawn: EnemySpawn) -> Result<Entity, EnemySetupError> {
    let result = try_spawn_enemy(world, spawn);

    if let Err(error) = &result {
        logger::log_error(&format!("Enemy setup failed: {}", error));
    }

    result
}

fn try_spawn_enemy(world: &mut World, spawn: EnemySpawn) -> Result<Entity, EnemySetupError> {
    let EnemySpawn { name, body, config } = spawn;

    if !world.contains_resource::<EnemyRegistry>() {
        return Err(EnemySetupError::MissingCollaborator {
            dependency: "EnemyRegistry",
            agent: name,
        });
    }
    if !world.contains_resource::<SpatialQueryService>() {
        return Err(EnemySetupError::MissingCollaborator {
            dependency: "SpatialQueryService",
            agent: name,
        });
    }

    let config = config.validated(&name)?;
    let attack_cooldown = config.attack_cooldown;

    let enemy = spawn_actor(world, body);
    world.entity_mut(enemy).insert((
        Enemy,
        Name::new(name.clone()),
        config,
        Attacker::new(attack_cooldown),
        // Тело актора: единственный собственный коллайдер
        SelfColliders(vec![enemy]),
    ));

    world.resource_mut::<EnemyRegistry>().register(enemy);

    logger::log_info(&format!("Enemy '{}' spawned as {:?}", name, enemy));

    Ok(enemy)
}
