//! Combat gate + attack requests

use bevy::prelude::*;

use crate::ai::events::AttackRequested;
use crate::ai::perception::{CombatGate, KnownTarget, Perception, TargetAnchor};
use crate::combat::{Attacker, Dead};
use crate::components::AimPoint;
use crate::enemy::{Enemy, EnemyConfig};

/// Мировая позиция known target (None если entity исчез)
pub fn resolve_target_position(
    known: KnownTarget,
    targets: &Query<(&Transform, Option<&AimPoint>)>,
) -> Option<Vec3> {
    let (transform, aim_point) = targets.get(known.actor).ok()?;

    Some(match (known.anchor, aim_point) {
        (TargetAnchor::AimPoint, Some(aim_point)) => aim_point.world_position(transform),
        _ => transform.translation,
    })
}

/// Система: пересчёт is_target_in_attack_range (чистая производная, каждый тик)
pub fn update_combat_gate(
    mut enemies: Query<(&Transform, &EnemyConfig, &Perception, &mut CombatGate), With<Enemy>>,
    targets: Query<(&Transform, Option<&AimPoint>)>,
) {
    for (transform, config, perception, mut gate) in enemies.iter_mut() {
        let target_position = perception
            .known_target
            .and_then(|known| resolve_target_position(known, &targets));

        let next = CombatGate::evaluate(transform.translation, target_position, config.attack_range);
        if *gate != next {
            *gate = next;
        }
    }
}

/// Система: AttackRequested пока цель в attack range и cooldown готов
pub fn request_attacks(
    mut enemies: Query<(Entity, &CombatGate, &Perception, &mut Attacker), (With<Enemy>, Without<Dead>)>,
    targets: Query<(&Transform, Option<&AimPoint>)>,
    mut attack_events: EventWriter<AttackRequested>,
) {
    for (entity, gate, perception, mut attacker) in enemies.iter_mut() {
        if !gate.is_target_in_attack_range || !attacker.can_attack() {
            continue;
        }

        let Some(known) = perception.known_target else {
            continue;
        };
        let Some(target_position) = resolve_target_position(known, &targets) else {
            continue;
        };

        attack_events.write(AttackRequested {
            enemy: entity,
            target: known.actor,
            target_position,
        });
        attacker.start_attack();
    }
}
