//! Collision Layers Constants
//!
//! ## Layers (битовая маска, rapier `Group` bits):
//! - Layer 1 (0b1 = 1): Ground (terrain, static platforms)
//! - Layer 2 (0b10 = 2): Hull (корпуса танков)
//!
//! Ground probes (overlap box + slope rays) фильтруют по `TankStats::ground_mask`,
//! поэтому корпус соседнего танка "землёй" не считается.

use bevy_rapier3d::prelude::{CollisionGroups, Group};

/// Layer 1: Ground (terrain, static geometry)
pub const COLLISION_LAYER_GROUND: u32 = 0b01;

/// Layer 2: Hull (tank bodies)
pub const COLLISION_LAYER_HULL: u32 = 0b10;

/// Mask: hull коллайдит с землёй и другими корпусами
pub const COLLISION_MASK_HULL: u32 = COLLISION_LAYER_GROUND | COLLISION_LAYER_HULL;

/// Collision groups для корпуса танка
pub fn hull_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(COLLISION_LAYER_HULL),
        Group::from_bits_truncate(COLLISION_MASK_HULL),
    )
}

/// Collision groups для terrain коллайдеров
pub fn ground_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(COLLISION_LAYER_GROUND),
        Group::from_bits_truncate(COLLISION_LAYER_HULL),
    )
}
