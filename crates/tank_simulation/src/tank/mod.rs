//! Tank locomotion module
//!
//! Гусеничный контроллер: ground sensor → input sampler → drive model → pose.
//!
//! ECS ответственность:
//! - `TankController` (state + sensor layout), `TankStats`, `TankInput`
//! - FixedUpdate tick, диагностика пропусков (`TankTickSkipped`)
//! - Debug overlay (read-only)
//!
//! Rapier ответственность:
//! - Коллайдеры земли и корпуса, mass properties
//! - Overlap/raycast запросы (через `SpatialQuery`)

use std::marker::PhantomData;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

pub mod controller;
pub mod debug;
pub mod drive;
pub mod events;
pub mod input;
pub mod sensor;
pub mod stats;
pub mod systems;

#[cfg(test)]
mod drive_tests;

// Re-export основных типов
pub use controller::{TankController, TankDebugToggles, TankState, TickReport};
pub use debug::{DebugBox, DebugRay, DebugSphere, TankDebugOverlay};
pub use drive::DriveStep;
pub use events::{Collaborator, TankTickSkipped};
pub use input::TankInput;
pub use sensor::{GroundSlope, RayHit, SpatialQuery};
pub use stats::TankStats;
pub use systems::{
    apply_center_of_mass, hull_mass_properties, tick_tanks_rapier, tick_tanks_with,
    update_debug_overlay_rapier, update_debug_overlay_with,
};

use crate::physics::hull_groups;

fn register_tank_types(app: &mut App) {
    app.register_type::<TankController>()
        .register_type::<TankStats>()
        .register_type::<TankInput>()
        .add_event::<TankTickSkipped>()
        .init_resource::<TankDebugOverlay>();
}

/// Tank Plugin (Rapier мир)
///
/// Порядок в FixedUpdate:
/// 1. apply_center_of_mass: mass properties для новых/изменённых stats
/// 2. tick_tanks_rapier: sensor + drive + pose
///
/// Физический шаг Rapier идёт после FixedUpdate и видит уже сдвинутый Transform.
pub struct TankControllerPlugin;

impl Plugin for TankControllerPlugin {
    fn build(&self, app: &mut App) {
        register_tank_types(app);

        app.add_systems(FixedUpdate, (apply_center_of_mass, tick_tanks_rapier).chain())
            .add_systems(Update, update_debug_overlay_rapier);
    }
}

/// Tank Plugin без Rapier, земля из resource `W` (например `PlaneGround`)
///
/// Resource не вставляется плагином; пока его нет, каждый tick
/// даёт `TankTickSkipped` с `Collaborator::SpatialQuery`.
pub struct HeadlessTankPlugin<W> {
    _ground: PhantomData<fn() -> W>,
}

impl<W> Default for HeadlessTankPlugin<W> {
    fn default() -> Self {
        Self { _ground: PhantomData }
    }
}

impl<W: SpatialQuery + Resource> Plugin for HeadlessTankPlugin<W> {
    fn build(&self, app: &mut App) {
        register_tank_types(app);

        app.add_systems(FixedUpdate, tick_tanks_with::<W>)
            .add_systems(Update, update_debug_overlay_with::<W>);
    }
}

/// Spawn танка: controller под корпус + rigid body + коллайдер
///
/// `position`: центр корпуса. Mass properties навешиваются системой
/// `apply_center_of_mass` на первом FixedUpdate.
pub fn spawn_tank(commands: &mut Commands, position: Vec3, stats: TankStats) -> Entity {
    let hull = stats.hull_half_extents;

    commands
        .spawn((
            Transform::from_translation(position),
            TankController::for_hull(hull, stats.grounding_check_extents),
            TankInput::default(),
            RigidBody::Dynamic,
            Collider::cuboid(hull.x, hull.y, hull.z),
            hull_groups(),
            stats,
        ))
        .id()
}
