//! Combat module (health collaborator + weapon readiness)
//!
//! ECS ответственность:
//! - Health, damage application, death signal
//! - Attacker cooldown для AttackRequested
//!
//! Снаряды, hitbox'ы, анимации: вне ядра.

use bevy::prelude::*;

use crate::HoverbotSet;

pub mod attacker;
pub mod damage;

// Re-export основных типов
pub use attacker::{tick_attack_cooldowns, Attacker};
pub use damage::{apply_damage, DamageDealt, DamageRequest, Dead, DespawnAfter, EntityDied};

/// Combat Plugin
///
/// Урон применяется в Prepare: к моменту DamageReaction все DamageDealt
/// этого тика уже записаны (damage никогда не вклинивается в detection).
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            (tick_attack_cooldowns, apply_damage).in_set(HoverbotSet::Prepare),
        );
    }
}
