//! Attacker component — готовность оружия hoverbot'а
//!
//! Ядро решает только "можно стрелять": AttackRequested уходит наружу,
//! само оружие (снаряды, анимация): collaborator.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Attacker {
    /// Cooldown между AttackRequested (секунды)
    pub attack_cooldown: f32,

    /// Текущий cooldown таймер (уменьшается до 0)
    pub cooldown_timer: f32,
}

impl Default for Attacker {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Attacker {
    pub fn new(attack_cooldown: f32) -> Self {
        Self {
            attack_cooldown,
            cooldown_timer: 0.0,
        }
    }

    /// Может ли атаковать (cooldown истёк)
    pub fn can_attack(&self) -> bool {
        self.cooldown_timer <= 0.0
    }

    pub fn start_attack(&mut self) {
        self.cooldown_timer = self.attack_cooldown;
    }

    pub fn tick(&mut self, delta: f32) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - delta).max(0.0);
        }
    }
}

/// Система: tick attacker cooldowns
pub fn tick_attack_cooldowns(mut attackers: Query<&mut Attacker>, time: Res<Time>) {
    let delta = time.delta_secs();

    for mut attacker in attackers.iter_mut() {
        attacker.tick(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_cycle() {
        let mut attacker = Attacker::new(1.0);
        assert!(attacker.can_attack());

        attacker.start_attack();
        assert!(!attacker.can_attack());

        attacker.tick(0.6);
        assert!(!attacker.can_attack());

        attacker.tick(0.6);
        assert!(attacker.can_attack());
        assert_eq!(attacker.cooldown_timer, 0.0);
    }
}
