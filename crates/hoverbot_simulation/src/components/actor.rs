//! Базовые компоненты акторов: Actor, AimPoint, Health

use bevy::prelude::*;

/// Актор (игрок, hoverbot, турель): всё что видят detection запросы
///
/// Автоматически добавляет Health и AimPoint через Required Components.
/// Враждебность = affiliation отличается.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Health, AimPoint, Transform)]
pub struct Actor {
    /// Stable ID фракции
    pub affiliation: u64,
}

impl Actor {
    pub fn new(affiliation: u64) -> Self {
        Self { affiliation }
    }

    pub fn is_hostile_to(&self, other: &Actor) -> bool {
        self.affiliation != other.affiliation
    }
}

/// Точка прицеливания (offset от Transform актора, в local space)
///
/// Используется как цель detection луча и как позиция "known target".
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct AimPoint {
    pub offset: Vec3,
}

impl Default for AimPoint {
    fn default() -> Self {
        // Примерно грудь гуманоида
        Self {
            offset: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

impl AimPoint {
    pub fn new(offset: Vec3) -> Self {
        Self { offset }
    }

    pub fn world_position(&self, transform: &Transform) -> Vec3 {
        transform.transform_point(self.offset)
    }
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Возвращает фактически снятое здоровье
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current - amount.max(0.0)).max(0.0);
        before - self.current
    }

    /// Внешняя смерть (kill volume, скрипт). Death processing подхватит
    /// её в начале следующего тика.
    pub fn kill(&mut self) {
        self.current = 0.0;
    }
}
