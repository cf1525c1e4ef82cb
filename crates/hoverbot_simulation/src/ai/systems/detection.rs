//! Detection system — ECS обёртка над perception::scan_for_target

use bevy::prelude::*;

use crate::ai::perception::{scan_for_target, Candidate, Observer, Perception};
use crate::combat::Dead;
use crate::components::{Actor, AimPoint};
use crate::enemy::{Enemy, EnemyConfig, SelfColliders};
use crate::logger;
use crate::physics::SpatialQueryService;

/// Система: target detection для каждого живого hoverbot'а
///
/// Actor Directory = все entity с Actor (мёртвые hoverbot'ы Actor теряют).
pub fn detect_targets(
    mut enemies: Query<
        (Entity, &Actor, &Transform, &EnemyConfig, &SelfColliders, &mut Perception),
        (With<Enemy>, Without<Dead>),
    >,
    actors: Query<(Entity, &Actor, &Transform, &AimPoint)>,
    spatial: Res<SpatialQueryService>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();

    // Snapshot директории один раз на тик
    let candidates: Vec<Candidate> = actors
        .iter()
        .map(|(entity, actor, transform, aim_point)| Candidate {
            actor: entity,
            faction: *actor,
            position: transform.translation,
            aim_point: aim_point.world_position(transform),
        })
        .collect();

    for (entity, actor, transform, config, self_colliders, mut perception) in enemies.iter_mut() {
        // Цель despawn'нута: ссылка больше ничего не значит
        if let Some(known) = perception.known_target {
            if !actors.contains(known.actor) {
                perception.drop_target();
            }
        }

        if perception.forget_if_expired(now, config.known_target_timeout) {
            logger::log(&format!(
                "Enemy {:?} forgot its target ({}s without sight)",
                entity, config.known_target_timeout
            ));
        }

        let observer = Observer {
            faction: *actor,
            detection_source: transform.transform_point(config.detection_source_offset),
            detection_range: config.detection_range,
            self_colliders: &self_colliders.0,
        };

        let sighting = scan_for_target(&observer, candidates.iter().copied(), spatial.backend());

        if let Some(sighting) = sighting {
            let previous = perception.known_target.map(|known| known.actor);
            if previous != Some(sighting.actor) {
                logger::log(&format!(
                    "Enemy {:?} sees {:?} at {:.1}m",
                    entity,
                    sighting.actor,
                    sighting.sqr_distance.sqrt()
                ));
            }
        }

        perception.apply_scan(sighting, now);
    }
}
