//! Hoverbot tunables (static per-agent data)
//!
//! Загружаются при создании агента (код или RON), дальше не меняются.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::PrefabPath;
use crate::enemy::EnemySetupError;
use crate::logger;

/// Параметры hoverbot'а
///
/// `#[serde(default)]`: частичный RON наследует defaults.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct EnemyConfig {
    /// Максимальная дистанция обнаружения (метры)
    pub detection_range: f32,
    /// Максимальная дистанция атаки (метры)
    pub attack_range: f32,
    /// Сколько секунд помним цель без прямой видимости
    pub known_target_timeout: f32,
    /// Задержка деспавна после смерти (секунды, 0 = сразу)
    pub death_duration: f32,
    /// Ниже этой высоты агент уничтожается (упал с уровня)
    pub self_destruct_y_height: f32,
    /// Длительность hit flash (для визуального collaborator'а)
    pub flash_on_hit_duration: f32,
    /// Пауза между AttackRequested (секунды)
    pub attack_cooldown: f32,
    /// Origin detection лучей (local offset)
    pub detection_source_offset: Vec3,
    /// Точка спавна death VFX (local offset)
    pub death_vfx_offset: Vec3,
    pub death_vfx: Option<PrefabPath>,
    pub loot: Option<PrefabPath>,
    /// Шанс дропа loot ∈ [0, 1]
    pub drop_rate: f32,
    /// Звук damage tick (None = без звука)
    pub damage_tick_sound: Option<String>,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            detection_range: 20.0,
            attack_range: 10.0,
            known_target_timeout: 4.0,
            death_duration: 0.0,
            self_destruct_y_height: -20.0,
            flash_on_hit_duration: 0.5,
            attack_cooldown: 1.0,
            detection_source_offset: Vec3::new(0.0, 1.0, 0.0),
            death_vfx_offset: Vec3::new(0.0, 1.0, 0.0),
            death_vfx: None,
            loot: None,
            drop_rate: 1.0,
            damage_tick_sound: None,
        }
    }
}

impl EnemyConfig {
    /// Парсинг из RON (с defaults для отсутствующих полей)
    pub fn from_ron_str(source: &str) -> Result<Self, EnemySetupError> {
        Ok(ron::from_str(source)?)
    }

    /// Проверка tunables перед spawn
    ///
    /// - ranges/timeouts: конечные и ≥ 0, иначе InvalidConfig
    /// - drop_rate: clamp в [0, 1] с warning (NaN → 0)
    pub fn validated(mut self, agent: &str) -> Result<Self, EnemySetupError> {
        let non_negative = [
            ("detection_range", self.detection_range),
            ("attack_range", self.attack_range),
            ("known_target_timeout", self.known_target_timeout),
            ("death_duration", self.death_duration),
            ("flash_on_hit_duration", self.flash_on_hit_duration),
            ("attack_cooldown", self.attack_cooldown),
        ];

        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EnemySetupError::InvalidConfig {
                    agent: agent.to_string(),
                    reason: format!("{} must be a finite non-negative number, got {}", name, value),
                });
            }
        }

        if !self.self_destruct_y_height.is_finite() {
            return Err(EnemySetupError::InvalidConfig {
                agent: agent.to_string(),
                reason: format!(
                    "self_destruct_y_height must be finite, got {}",
                    self.self_destruct_y_height
                ),
            });
        }

        let clamped = clamp_drop_rate(self.drop_rate);
        if clamped != self.drop_rate {
            logger::log_warning(&format!(
                "{}: drop_rate {} outside [0, 1], clamped to {}",
                agent, self.drop_rate, clamped
            ));
            self.drop_rate = clamped;
        }

        Ok(self)
    }
}

fn clamp_drop_rate(rate: f32) -> f32 {
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, 1.0)
    }
}
