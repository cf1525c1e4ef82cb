//! Player control marker component

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Единственный источник урона, на который hoverbot реагирует агрессией:
/// урон от entity с этим компонентом делает его known target даже без прямой видимости.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
