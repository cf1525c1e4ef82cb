//! Physics collaborators: spatial queries (raycast) по коллайдерам мира
//!
//! Движение и интеграция вне ядра; здесь только то, что нужно
//! для line-of-sight проверок. Формы коллайдеров: rapier `Collider`.

pub mod raycast;

pub use bevy_rapier3d::prelude::Collider;
pub use raycast::{
    sync_spatial_colliders, ColliderEntry, ColliderOwner, ColliderWorld, RayHit, SpatialQuery,
    SpatialQueryService,
};
