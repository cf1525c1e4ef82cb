//! Spatial Query Service — raycast по коллайдерам мира
//!
//! Ядро видит мир только через trait `SpatialQuery`:
//! (origin, direction, max_distance) → все пересечения + owner актор.
//! Порядок hits не гарантирован: потребитель сортирует сам.
//!
//! Headless backend: `ColliderWorld`. Коллайдеры = rapier `Collider` на entities,
//! зеркалятся каждый тик через `sync_spatial_colliders`; ray cast идёт по shape
//! напрямую (`Collider::cast_ray`), RapierPhysicsPlugin не нужен.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

/// Одно пересечение луча с коллайдером
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Расстояние от origin вдоль луча
    pub distance: f32,
    /// Entity коллайдера (сравнивается с SelfColliders)
    pub collider: Entity,
    /// Актор которому принадлежит коллайдер (None = статическая геометрия)
    pub owner: Option<Entity>,
}

/// Снимок коллайдера для backend'а (world space pose + shape)
#[derive(Clone)]
pub struct ColliderEntry {
    pub collider: Entity,
    pub owner: Option<Entity>,
    pub translation: Vec3,
    pub rotation: Quat,
    pub shape: Collider,
}

impl ColliderEntry {
    pub fn at(collider: Entity, shape: Collider, translation: Vec3) -> Self {
        Self {
            collider,
            owner: None,
            translation,
            rotation: Quat::IDENTITY,
            shape,
        }
    }

    pub fn owned_by(mut self, owner: Entity) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// Spatial query backend (внешний collaborator)
pub trait SpatialQuery: Send + Sync + 'static {
    /// Все пересечения луча в пределах `max_distance`.
    fn raycast_all(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<RayHit>;

    /// Обновить геометрию из ECS. Backend'ы со своим миром игнорируют.
    fn sync_colliders(&mut self, _colliders: Vec<ColliderEntry>) {}
}

/// Resource: активный spatial query backend
#[derive(Resource)]
pub struct SpatialQueryService {
    backend: Box<dyn SpatialQuery>,
}

impl SpatialQueryService {
    pub fn new(backend: impl SpatialQuery) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn headless() -> Self {
        Self::new(ColliderWorld::default())
    }

    pub fn backend(&self) -> &dyn SpatialQuery {
        self.backend.as_ref()
    }
}

/// Component: актор-владелец коллайдера (аналог "GetComponentInParent<Actor>")
///
/// Стены/пол без него: hit с owner = None.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ColliderOwner(pub Entity);

/// Headless backend: ray cast по snapshot'у rapier shapes
#[derive(Default, Clone)]
pub struct ColliderWorld {
    colliders: Vec<ColliderEntry>,
}

impl ColliderWorld {
    pub fn new(colliders: Vec<ColliderEntry>) -> Self {
        Self { colliders }
    }

    pub fn colliders(&self) -> &[ColliderEntry] {
        &self.colliders
    }
}

impl SpatialQuery for ColliderWorld {
    fn raycast_all(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<RayHit> {
        // Нормализованный луч: time of impact == расстояние
        let Some(direction) = direction.try_normalize() else {
            return Vec::new();
        };
        if max_distance <= 0.0 {
            return Vec::new();
        }

        self.colliders
            .iter()
            .filter_map(|entry| {
                // solid = true: origin внутри shape → hit на 0
                let distance = entry.shape.cast_ray(
                    entry.translation,
                    entry.rotation,
                    origin,
                    direction,
                    max_distance,
                    true,
                )?;

                Some(RayHit {
                    distance,
                    collider: entry.collider,
                    owner: entry.owner,
                })
            })
            .collect()
    }

    fn sync_colliders(&mut self, colliders: Vec<ColliderEntry>) {
        self.colliders = colliders;
    }
}

/// Система: зеркалит rapier `Collider` компоненты в spatial backend
pub fn sync_spatial_colliders(
    colliders: Query<(Entity, &Collider, &Transform, Option<&ColliderOwner>)>,
    mut service: ResMut<SpatialQueryService>,
) {
    let entries = colliders
        .iter()
        .map(|(entity, collider, transform, owner)| ColliderEntry {
            collider: entity,
            owner: owner.map(|owner| owner.0),
            translation: transform.translation,
            rotation: transform.rotation,
            shape: collider.clone(),
        })
        .collect();

    service.backend.sync_colliders(entries);
}
