//! Tank ECS systems (FixedUpdate)
//!
//! Системы только собирают collaborators из ECS и зовут `TankController::tick`.
//! Вся логика в controller/sensor/drive, здесь: wiring + диагностика.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::logger::{log, log_error, log_warning};
use crate::physics::RapierSpatialQuery;
use crate::tank::controller::TankController;
use crate::tank::debug::{push_tank_debug, TankDebugOverlay};
use crate::tank::events::TankTickSkipped;
use crate::tank::input::TankInput;
use crate::tank::sensor::SpatialQuery;
use crate::tank::stats::TankStats;

/// Query всех танков; collaborators опциональны, отсутствие диагностируется в tick
pub type TankQueryData<'a> = (
    Entity,
    &'a mut TankController,
    Option<&'a TankStats>,
    Option<&'a TankInput>,
    Option<&'a mut Transform>,
);

/// Один tick одного танка + логирование переходов и пропусков
fn run_tank_tick<Q: SpatialQuery + ?Sized>(
    entity: Entity,
    controller: &mut TankController,
    stats: Option<&TankStats>,
    input: Option<&TankInput>,
    pose: Option<&mut Transform>,
    query: Option<&Q>,
    dt: f32,
    skipped: &mut EventWriter<TankTickSkipped>,
) {
    let was_grounded = controller.state.is_grounded;

    match controller.tick(stats, input, pose, query, dt) {
        Ok(report) => {
            if report.grounded != was_grounded {
                let transition = if report.grounded { "landed" } else { "airborne" };
                log(&format!(
                    "Tank {:?} {} (linear {:.2}, rotational {:.2})",
                    entity,
                    transition,
                    controller.state.current_linear_speed,
                    controller.state.current_rotational_speed
                ));
            }
        }
        Err(error) => {
            log_error(&format!("Tank {:?}: {}", entity, error));
            skipped.write(TankTickSkipped {
                entity,
                missing: error.missing,
            });
        }
    }
}

/// Система: tick всех танков против Rapier мира
///
/// Нет RapierContext (плагин не добавлен / context не создан) →
/// каждый танк получает `TankTickSkipped` с `SpatialQuery`.
pub fn tick_tanks_rapier(
    time: Res<Time<Fixed>>,
    rapier_context: ReadRapierContext,
    mut tanks: Query<TankQueryData>,
    mut skipped: EventWriter<TankTickSkipped>,
) {
    let dt = time.delta_secs();
    let context = rapier_context.single().ok();

    for (entity, mut controller, stats, input, mut pose) in tanks.iter_mut() {
        let query = context
            .as_ref()
            .map(|context| RapierSpatialQuery::new(context).excluding(entity));

        run_tank_tick(
            entity,
            &mut controller,
            stats,
            input,
            pose.as_deref_mut(),
            query.as_ref(),
            dt,
            &mut skipped,
        );
    }
}

/// Система: tick всех танков против ground resource `W` (headless, тесты)
pub fn tick_tanks_with<W: SpatialQuery + Resource>(
    time: Res<Time<Fixed>>,
    ground: Option<Res<W>>,
    mut tanks: Query<TankQueryData>,
    mut skipped: EventWriter<TankTickSkipped>,
) {
    let dt = time.delta_secs();
    let ground = ground.as_deref();

    for (entity, mut controller, stats, input, mut pose) in tanks.iter_mut() {
        run_tank_tick(
            entity,
            &mut controller,
            stats,
            input,
            pose.as_deref_mut(),
            ground,
            dt,
            &mut skipped,
        );
    }
}

/// Mass properties корпуса: масса, смещённый центр масс, инерция box
pub fn hull_mass_properties(stats: &TankStats) -> MassProperties {
    let size = stats.hull_half_extents * 2.0;
    let k = stats.mass / 12.0;

    MassProperties {
        local_center_of_mass: stats.center_of_mass,
        mass: stats.mass,
        principal_inertia_local_frame: Quat::IDENTITY,
        principal_inertia: Vec3::new(
            k * (size.y * size.y + size.z * size.z),
            k * (size.x * size.x + size.z * size.z),
            k * (size.x * size.x + size.y * size.y),
        ),
    }
}

/// Система: применить center of mass к rigid body
///
/// Срабатывает на spawn и на любое изменение `TankStats`.
pub fn apply_center_of_mass(
    mut commands: Commands,
    tanks: Query<(Entity, &TankStats), (With<TankController>, Changed<TankStats>)>,
) {
    for (entity, stats) in tanks.iter() {
        if stats.mass <= 0.0 {
            log_warning(&format!(
                "Tank {:?}: mass {} gives the rigid body no inertia",
                entity, stats.mass
            ));
        }
        commands
            .entity(entity)
            .insert(ColliderMassProperties::MassProperties(hull_mass_properties(stats)));
    }
}

/// Система: пересобрать debug overlay (Rapier мир)
pub fn update_debug_overlay_rapier(
    rapier_context: ReadRapierContext,
    tanks: Query<(Entity, &TankController, &TankStats, &Transform)>,
    mut overlay: ResMut<TankDebugOverlay>,
) {
    overlay.clear();
    let context = rapier_context.single().ok();

    for (entity, controller, stats, pose) in tanks.iter() {
        let query = context
            .as_ref()
            .map(|context| RapierSpatialQuery::new(context).excluding(entity));
        push_tank_debug(&mut overlay, entity, controller, stats, pose, query.as_ref());
    }
}

/// Система: пересобрать debug overlay (ground resource `W`)
pub fn update_debug_overlay_with<W: SpatialQuery + Resource>(
    ground: Option<Res<W>>,
    tanks: Query<(Entity, &TankController, &TankStats, &Transform)>,
    mut overlay: ResMut<TankDebugOverlay>,
) {
    overlay.clear();
    let ground = ground.as_deref();

    for (entity, controller, stats, pose) in tanks.iter() {
        push_tank_debug(&mut overlay, entity, controller, stats, pose, ground);
    }
}
