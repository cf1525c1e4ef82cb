//! Actor domain — spawn helpers для тел акторов
//!
//! Тело актора = Actor + AimPoint + Health + rapier Collider (ColliderOwner = сам актор).
//! Hoverbot'ы спавнятся через `enemy::spawn_enemy` поверх того же тела.

use bevy::prelude::*;

use crate::components::{Actor, AimPoint, Health, Player};
use crate::physics::{Collider, ColliderOwner};

/// Параметры тела актора
#[derive(Debug, Clone)]
pub struct ActorSpawn {
    pub transform: Transform,
    pub affiliation: u64,
    pub aim_offset: Vec3,
    pub max_health: f32,
    /// Радиус сферического коллайдера (центр = aim point)
    pub body_radius: f32,
}

impl Default for ActorSpawn {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            affiliation: 0,
            aim_offset: AimPoint::default().offset,
            max_health: 100.0,
            body_radius: 0.5,
        }
    }
}

impl ActorSpawn {
    pub fn at(position: Vec3, affiliation: u64) -> Self {
        Self {
            transform: Transform::from_translation(position),
            affiliation,
            ..Default::default()
        }
    }
}

/// Spawn тела актора. Коллайдер висит на самом entity: двигается вместе с ним,
/// центр сферы совпадает с aim point (detection луч целится именно туда).
pub fn spawn_actor(world: &mut World, spawn: ActorSpawn) -> Entity {
    let actor = world
        .spawn((
            spawn.transform,
            Actor::new(spawn.affiliation),
            AimPoint::new(spawn.aim_offset),
            Health::new(spawn.max_health),
        ))
        .id();

    // Compound: сфера смещена на aim offset относительно origin актора
    world.entity_mut(actor).insert((
        Collider::compound(vec![(
            spawn.aim_offset,
            Quat::IDENTITY,
            Collider::ball(spawn.body_radius),
        )]),
        ColliderOwner(actor),
    ));

    actor
}

/// Spawn игрока (Player marker = распознаваемый источник урона)
pub fn spawn_player(world: &mut World, spawn: ActorSpawn) -> Entity {
    let player = spawn_actor(world, spawn);
    world.entity_mut(player).insert(Player);
    player
}
