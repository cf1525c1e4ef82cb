//! AI Events — семантические уведомления для внешних collaborators
//!
//! Ядро не знает, кто слушает (анимация, звук, VFX, UI): пишет событие и всё.
//! Ноль или много подписчиков: поведение ядра не меняется.

use bevy::prelude::*;

/// Known target появился (None → Some)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TargetDetected {
    pub enemy: Entity,
    pub target: Entity,
}

/// Known target забыт или исчез (Some → None)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TargetLost {
    pub enemy: Entity,
}

/// Hoverbot получил урон от распознанного врага ("on damaged")
///
/// `time`: момент урона, визуальный collaborator считает от него hit flash.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyDamaged {
    pub enemy: Entity,
    pub source: Entity,
    pub amount: f32,
    pub time: f32,
}

/// Запрос проиграть damage tick звук (не чаще раза за тик)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageTickSfx {
    pub enemy: Entity,
    pub sound: String,
    pub position: Vec3,
}

/// Цель в attack range и оружие готово ("attack")
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackRequested {
    pub enemy: Entity,
    pub target: Entity,
    pub target_position: Vec3,
}
