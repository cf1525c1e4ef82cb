//! AI systems, по фазам тика:
//! - detection: сканирование директории акторов + LOS
//! - reactions: awareness от урона игрока
//! - gate: attack range + AttackRequested
//! - notify: detected/lost transitions

pub mod detection;
pub mod gate;
pub mod notify;
pub mod reactions;

pub use detection::detect_targets;
pub use gate::{request_attacks, resolve_target_position, update_combat_gate};
pub use notify::emit_target_transitions;
pub use reactions::react_to_damage;
