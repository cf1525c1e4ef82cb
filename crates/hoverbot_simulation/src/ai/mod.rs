//! AI perception & combat decision core
//!
//! Каждый тик hoverbot:
//! 1. сканирует акторов и решает, видит ли врага (detection)
//! 2. реагирует на урон от игрока (awareness без LOS)
//! 3. пересчитывает "цель в attack range" (combat gate)
//! 4. сообщает наружу о detected/lost переходах

use bevy::prelude::*;

use crate::HoverbotSet;

pub mod events;
pub mod perception;
pub mod systems;

// Re-export основных типов
pub use events::{AttackRequested, DamageTickSfx, EnemyDamaged, TargetDetected, TargetLost};
pub use perception::{
    closest_valid_hit, scan_for_target, Candidate, CombatGate, KnownTarget, Observer, Perception,
    Sighting, TargetAnchor, TargetTransition,
};

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate. Порядок задают HoverbotSet фазы:
/// Detection → DamageReaction → CombatGate → Notify
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TargetDetected>()
            .add_event::<TargetLost>()
            .add_event::<EnemyDamaged>()
            .add_event::<DamageTickSfx>()
            .add_event::<AttackRequested>();

        app.add_systems(
            FixedUpdate,
            (
                systems::detect_targets.in_set(HoverbotSet::Detection),
                systems::react_to_damage.in_set(HoverbotSet::DamageReaction),
                (systems::update_combat_gate, systems::request_attacks)
                    .chain()
                    .in_set(HoverbotSet::CombatGate),
                systems::emit_target_transitions.in_set(HoverbotSet::Notify),
            ),
        );
    }
}
