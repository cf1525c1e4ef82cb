//! Damage application (health collaborator)
//!
//! Внешний мир пишет DamageRequest → apply_damage снимает Health →
//! DamageDealt (всегда) + EntityDied (ровно один раз, при переходе в 0).

use bevy::prelude::*;

use crate::components::Health;
use crate::logger;

/// Входящий запрос урона (пуля, взрыв, падение)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: f32,
    /// Кто нанёс урон (None = окружение)
    pub source: Option<Entity>,
}

/// Событие: урон применён к Health
///
/// Hoverbot реагирует на него в react_to_damage.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub target: Entity,
    pub source: Option<Entity>,
    pub amount: f32,
    pub target_died: bool,
}

/// Событие: entity умер (health достиг 0)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв, death processing уже выполнен
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
#[derive(Component, Debug, Clone, Copy)]
pub struct DespawnAfter {
    /// Время деспавна (в секундах от старта симуляции)
    pub despawn_time: f32,
}

/// Система: apply damage от DamageRequest событий
///
/// Мёртвые (Health == 0) урон не получают и повторно не умирают.
pub fn apply_damage(
    mut requests: EventReader<DamageRequest>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
    mut targets: Query<&mut Health>,
) {
    for request in requests.read() {
        let Ok(mut health) = targets.get_mut(request.target) else {
            logger::log_warning(&format!(
                "DamageRequest: target {:?} has no Health component",
                request.target
            ));
            continue;
        };

        if !health.is_alive() {
            continue;
        }

        let applied = health.take_damage(request.amount);
        let target_died = !health.is_alive();

        damage_dealt_events.write(DamageDealt {
            target: request.target,
            source: request.source,
            amount: applied,
            target_died,
        });

        if target_died {
            entity_died_events.write(EntityDied {
                entity: request.target,
                killer: request.source,
            });

            logger::log_info(&format!(
                "Entity {:?} killed by {:?}",
                request.target, request.source
            ));
        }
    }
}
