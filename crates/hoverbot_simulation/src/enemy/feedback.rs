//! Damage feedback для визуального/аудио collaborator'а
//!
//! Ядро не рисует hit flash: оно держит `hit_flash` (0 = только что ударили,
//! 1 = flash закончился), renderer подаёт его в свой gradient.

use bevy::prelude::*;

use crate::enemy::EnemyConfig;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DamageFeedback {
    pub last_time_damaged: f32,
    /// Сбрасывается в начале каждого тика (HoverbotSet::Prepare)
    pub damaged_this_tick: bool,
    /// Позиция в hit flash gradient, пересчитывается каждый тик
    pub hit_flash: f32,
}

impl Default for DamageFeedback {
    fn default() -> Self {
        Self {
            last_time_damaged: f32::NEG_INFINITY,
            damaged_this_tick: false,
            hit_flash: 1.0,
        }
    }
}

impl DamageFeedback {
    /// 0 = только что ударили, 1 = flash закончился
    pub fn flash_progress(&self, now: f32, flash_duration: f32) -> f32 {
        if flash_duration <= 0.0 {
            return 1.0;
        }
        ((now - self.last_time_damaged) / flash_duration).clamp(0.0, 1.0)
    }
}

/// Система: сброс per-tick флага damage tick звука
pub fn reset_damage_tick_flags(mut feedback: Query<&mut DamageFeedback>) {
    for mut feedback in feedback.iter_mut() {
        feedback.damaged_this_tick = false;
    }
}

/// Система: hit flash по flash_on_hit_duration (после damage reaction этого тика)
pub fn update_hit_flash(mut enemies: Query<(&EnemyConfig, &mut DamageFeedback)>, time: Res<Time>) {
    let now = time.elapsed_secs();

    for (config, mut feedback) in enemies.iter_mut() {
        let progress = feedback.flash_progress(now, config.flash_on_hit_duration);
        if feedback.hit_flash != progress {
            feedback.hit_flash = progress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_progress() {
        let mut feedback = DamageFeedback::default();
        assert_eq!(feedback.flash_progress(3.0, 0.5), 1.0);

        feedback.last_time_damaged = 2.0;
        assert_eq!(feedback.flash_progress(2.0, 0.5), 0.0);
        assert!((feedback.flash_progress(2.25, 0.5) - 0.5).abs() < 1e-6);
        assert_eq!(feedback.flash_progress(9.0, 0.5), 1.0);
    }

    #[test]
    fn test_zero_duration_never_flashes() {
        let feedback = DamageFeedback {
            last_time_damaged: 1.0,
            ..Default::default()
        };
        assert_eq!(feedback.flash_progress(1.0, 0.0), 1.0);
    }
}
