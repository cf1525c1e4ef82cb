//! AI reaction systems (damage awareness).

use bevy::prelude::*;

use crate::ai::events::{DamageTickSfx, EnemyDamaged};
use crate::ai::perception::Perception;
use crate::combat::{DamageDealt, Dead};
use crate::components::Player;
use crate::enemy::{DamageFeedback, Enemy, EnemyConfig};
use crate::logger;

/// System: реакция hoverbot'а на полученный урон
///
/// Урон от игрока (Player marker):
/// - игрок становится known target без line of sight, time_last_seen = now
///   (кроме смертельного удара: мёртвый никого не замечает)
/// - EnemyDamaged ровно один раз на событие урона
/// - last_time_damaged = now (hit flash)
/// - DamageTickSfx не чаще одного раза за тик
///
/// Урон от кого-то ещё (окружение, другие боты) perception не трогает.
/// Запускается после detection: awareness перекрывает результат этого тика.
pub fn react_to_damage(
    mut damage_events: EventReader<DamageDealt>,
    mut enemies: Query<
        (&Transform, &EnemyConfig, &mut Perception, &mut DamageFeedback),
        (With<Enemy>, Without<Dead>),
    >,
    players: Query<(), With<Player>>,
    time: Res<Time>,
    mut damaged_events: EventWriter<EnemyDamaged>,
    mut sfx_events: EventWriter<DamageTickSfx>,
) {
    let now = time.elapsed_secs();

    for damage in damage_events.read() {
        let Ok((transform, config, mut perception, mut feedback)) = enemies.get_mut(damage.target) else {
            continue;
        };

        let Some(source) = damage.source.filter(|source| players.contains(*source)) else {
            continue;
        };

        // Смертельный удар: агент уже не преследует, death processing в этом же тике
        if !damage.target_died {
            perception.become_aware_of(source, now);
        }

        damaged_events.write(EnemyDamaged {
            enemy: damage.target,
            source,
            amount: damage.amount,
            time: now,
        });
        feedback.last_time_damaged = now;

        if let Some(sound) = &config.damage_tick_sound {
            if !feedback.damaged_this_tick {
                sfx_events.write(DamageTickSfx {
                    enemy: damage.target,
                    sound: sound.clone(),
                    position: transform.translation,
                });
            }
        }
        feedback.damaged_this_tick = true;

        logger::log(&format!(
            "Enemy {:?} damaged by player {:?} ({:.1})",
            damage.target, source, damage.amount
        ));
    }
}
