//! Lifecycle controller
//!
//! Alive → (y < self_destruct_y_height) → Destroyed (сразу, без VFX/loot)
//! Alive → (EntityDied) → Dying → (death_duration) → Destroyed
//!
//! EntityDied пишет apply_damage или, для Health::kill и прямой записи в Health,
//! report_external_deaths.
//!
//! Dying = маркер Dead + DespawnAfter. Мёртвый hoverbot теряет Actor
//! (больше не кандидат для detection) и выходит из EnemyRegistry.

use bevy::prelude::*;

use crate::ai::{Perception, TargetLost};
use crate::combat::{Dead, DespawnAfter, EntityDied};
use crate::components::{Actor, Health};
use crate::enemy::{
    try_drop_item, DeathVfxRequested, DestroyCause, Enemy, EnemyConfig, EnemyDestroyed,
    EnemyRegistry, LootDropRequested, DEATH_VFX_LIFETIME,
};
use crate::logger;
use crate::DeterministicRng;

/// Система: смерть в обход apply_damage (Health::kill, прямая запись в Health)
///
/// Такой hoverbot ещё не Dead: сообщаем EntityDied сами, death processing
/// дальше общий. Смерть от DamageRequest репортит apply_damage.
pub fn report_external_deaths(
    enemies: Query<(Entity, &Health), (With<Enemy>, Without<Dead>)>,
    mut death_events: EventWriter<EntityDied>,
) {
    for (entity, health) in enemies.iter() {
        if health.is_alive() {
            continue;
        }

        logger::log_info(&format!("Enemy {:?} killed externally", entity));
        death_events.write(EntityDied {
            entity,
            killer: None,
        });
    }
}

/// Система: уничтожение hoverbot'ов, упавших с уровня
///
/// Без VFX/loot. Known target теряется так же, как при смерти.
pub fn ensure_within_level_bounds(
    mut commands: Commands,
    mut enemies: Query<(Entity, &Transform, &EnemyConfig, &mut Perception), With<Enemy>>,
    mut registry: ResMut<EnemyRegistry>,
    mut lost_events: EventWriter<TargetLost>,
    mut destroyed_events: EventWriter<EnemyDestroyed>,
) {
    for (entity, transform, config, mut perception) in enemies.iter_mut() {
        if transform.translation.y >= config.self_destruct_y_height {
            continue;
        }

        logger::log_info(&format!(
            "Enemy {:?} fell below y={} → destroyed",
            entity, config.self_destruct_y_height
        ));

        if perception.had_known_target {
            lost_events.write(TargetLost { enemy: entity });
        }
        perception.clear();

        registry.unregister(entity);
        commands.entity(entity).despawn();
        destroyed_events.write(EnemyDestroyed {
            enemy: entity,
            cause: DestroyCause::OutOfBounds,
        });
    }
}

/// Система: death processing hoverbot'а
///
/// 1. death VFX request
/// 2. unregister
/// 3. loot roll (DeterministicRng)
/// 4. деспавн сразу (death_duration == 0) или через DespawnAfter
#[allow(clippy::too_many_arguments)]
pub fn handle_enemy_death(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    mut enemies: Query<(&Transform, &EnemyConfig, &mut Perception), (With<Enemy>, Without<Dead>)>,
    mut registry: ResMut<EnemyRegistry>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time>,
    mut vfx_events: EventWriter<DeathVfxRequested>,
    mut loot_events: EventWriter<LootDropRequested>,
    mut lost_events: EventWriter<TargetLost>,
    mut destroyed_events: EventWriter<EnemyDestroyed>,
) {
    let now = time.elapsed_secs();

    for event in death_events.read() {
        let Ok((transform, config, mut perception)) = enemies.get_mut(event.entity) else {
            continue;
        };
        let enemy = event.entity;

        if let Some(prefab) = &config.death_vfx {
            vfx_events.write(DeathVfxRequested {
                enemy,
                prefab: prefab.clone(),
                position: transform.transform_point(config.death_vfx_offset),
                lifetime: DEATH_VFX_LIFETIME,
            });
        }

        registry.unregister(enemy);

        if try_drop_item(config.drop_rate, config.loot.is_some(), &mut rng.rng) {
            if let Some(prefab) = &config.loot {
                loot_events.write(LootDropRequested {
                    enemy,
                    prefab: prefab.clone(),
                    position: transform.translation,
                });
                logger::log(&format!("Enemy {:?} dropped loot '{}'", enemy, prefab));
            }
        }

        // Мёртвый ничего не помнит; lost уходит сразу, notify его больше не обработает
        if perception.had_known_target {
            lost_events.write(TargetLost { enemy });
        }
        perception.clear();

        if config.death_duration <= 0.0 {
            commands.entity(enemy).despawn();
            destroyed_events.write(EnemyDestroyed {
                enemy,
                cause: DestroyCause::AfterDeath,
            });
        } else {
            commands.entity(enemy).remove::<Actor>().insert((
                Dead,
                DespawnAfter {
                    despawn_time: now + config.death_duration,
                },
            ));
        }

        logger::log_info(&format!("Enemy {:?} died (killer: {:?})", enemy, event.killer));
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter timeout
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter, Has<Enemy>)>,
    time: Res<Time>,
    mut destroyed_events: EventWriter<EnemyDestroyed>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after, is_enemy) in query.iter() {
        if current_time < despawn_after.despawn_time {
            continue;
        }

        logger::log(&format!("Despawning entity {:?} (timeout)", entity));
        commands.entity(entity).despawn();

        if is_enemy {
            destroyed_events.write(EnemyDestroyed {
                enemy: entity,
                cause: DestroyCause::AfterDeath,
            });
        }
    }
}
