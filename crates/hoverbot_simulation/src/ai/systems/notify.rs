//! Target detected/lost notifications (edge transitions)

use bevy::prelude::*;

use crate::ai::events::{TargetDetected, TargetLost};
use crate::ai::perception::{Perception, TargetTransition};
use crate::combat::Dead;
use crate::enemy::Enemy;
use crate::logger;

/// Система: None → Some = TargetDetected, Some → None = TargetLost
///
/// Запускается после detection и damage reaction: видит итоговое состояние тика.
pub fn emit_target_transitions(
    mut enemies: Query<(Entity, &mut Perception), (With<Enemy>, Without<Dead>)>,
    mut detected_events: EventWriter<TargetDetected>,
    mut lost_events: EventWriter<TargetLost>,
) {
    for (entity, mut perception) in enemies.iter_mut() {
        match perception.take_transition() {
            Some(TargetTransition::Detected) => {
                // take_transition вернул Detected ⇒ known_target есть
                if let Some(known) = perception.known_target {
                    logger::log(&format!("Enemy {:?} detected target {:?}", entity, known.actor));
                    detected_events.write(TargetDetected {
                        enemy: entity,
                        target: known.actor,
                    });
                }
            }
            Some(TargetTransition::Lost) => {
                logger::log(&format!("Enemy {:?} lost its target", entity));
                lost_events.write(TargetLost { enemy: entity });
            }
            None => {}
        }
    }
}
