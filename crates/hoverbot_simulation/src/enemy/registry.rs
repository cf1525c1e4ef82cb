//! Enemy registry (внешний collaborator: учёт живых hoverbot'ов)
//!
//! register: один раз при spawn, unregister: один раз при смерти
//! или уничтожении за пределами уровня.

use bevy::prelude::*;

use crate::logger;

#[derive(Resource, Debug, Default)]
pub struct EnemyRegistry {
    enemies: Vec<Entity>,
    total_registered: usize,
}

impl EnemyRegistry {
    pub fn register(&mut self, enemy: Entity) {
        if self.enemies.contains(&enemy) {
            return;
        }
        self.enemies.push(enemy);
        self.total_registered += 1;
    }

    /// Возвращает true если enemy был зарегистрирован
    pub fn unregister(&mut self, enemy: Entity) -> bool {
        let Some(index) = self.enemies.iter().position(|e| *e == enemy) else {
            return false;
        };
        self.enemies.remove(index);

        logger::log_info(&format!(
            "Enemy {:?} unregistered, {} remaining",
            enemy,
            self.remaining()
        ));
        true
    }

    pub fn contains(&self, enemy: Entity) -> bool {
        self.enemies.contains(&enemy)
    }

    pub fn remaining(&self) -> usize {
        self.enemies.len()
    }

    pub fn total_registered(&self) -> usize {
        self.total_registered
    }
}
