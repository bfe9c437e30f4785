//! Debug overlay: примитивы для визуализации (read-only)
//!
//! - tread box: 8 углов grounding box, все рёбра + диагонали ("X box")
//! - center of mass: маркер в `position + center_of_mass`
//! - slope check: лучи из sensor points, зелёный до точки попадания
//!
//! Ничего не пишет в `TankController`/`TankStats`, только в `TankDebugOverlay`.
//! Рендер (gizmos, клиент) читает overlay снаружи.

use bevy::prelude::*;

use crate::tank::controller::TankController;
use crate::tank::sensor::SpatialQuery;
use crate::tank::stats::TankStats;

pub const DEBUG_GREEN: [f32; 3] = [0.0, 1.0, 0.0];
pub const DEBUG_RED: [f32; 3] = [1.0, 0.0, 0.0];

/// Радиус маркера центра масс
pub const CENTER_OF_MASS_MARKER_RADIUS: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct DebugBox {
    pub entity: Entity,
    pub corners: [Vec3; 8],
    pub color: [f32; 3],
}

impl DebugBox {
    /// Все пары углов (12 рёбер + диагонали граней и объёма)
    pub fn wire_lines(&self) -> Vec<(Vec3, Vec3)> {
        let mut lines = Vec::with_capacity(28);
        for i in 0..self.corners.len() {
            for j in (i + 1)..self.corners.len() {
                lines.push((self.corners[i], self.corners[j]));
            }
        }
        lines
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebugSphere {
    pub entity: Entity,
    pub center: Vec3,
    pub radius: f32,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebugRay {
    pub entity: Entity,
    pub origin: Vec3,
    /// Точка попадания или конец луча
    pub end: Vec3,
    pub hit: bool,
    pub color: [f32; 3],
}

/// Debug overlay всех танков, пересобирается каждый frame
#[derive(Resource, Debug, Clone, Default)]
pub struct TankDebugOverlay {
    pub tread_boxes: Vec<DebugBox>,
    pub centers_of_mass: Vec<DebugSphere>,
    pub slope_rays: Vec<DebugRay>,
}

impl TankDebugOverlay {
    pub fn clear(&mut self) {
        self.tread_boxes.clear();
        self.centers_of_mass.clear();
        self.slope_rays.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tread_boxes.is_empty() && self.centers_of_mass.is_empty() && self.slope_rays.is_empty()
    }
}

/// Углы box с учётом rotation
pub fn box_corners(center: Vec3, half_extents: Vec3, rotation: Quat) -> [Vec3; 8] {
    let h = half_extents;
    let local = [
        Vec3::new(h.x, h.y, h.z),
        Vec3::new(h.x, h.y, -h.z),
        Vec3::new(h.x, -h.y, h.z),
        Vec3::new(h.x, -h.y, -h.z),
        Vec3::new(-h.x, h.y, h.z),
        Vec3::new(-h.x, h.y, -h.z),
        Vec3::new(-h.x, -h.y, h.z),
        Vec3::new(-h.x, -h.y, -h.z),
    ];
    local.map(|corner| center + rotation * corner)
}

/// Добавить примитивы одного танка (по его debug toggles)
///
/// Slope лучи требуют `query`; без него секция пропускается.
pub fn push_tank_debug<Q: SpatialQuery + ?Sized>(
    overlay: &mut TankDebugOverlay,
    entity: Entity,
    controller: &TankController,
    stats: &TankStats,
    pose: &Transform,
    query: Option<&Q>,
) {
    let toggles = controller.debug;

    if toggles.tread_box {
        let probe = controller.probe_world(pose);
        overlay.tread_boxes.push(DebugBox {
            entity,
            corners: box_corners(probe.translation, stats.grounding_check_extents, probe.rotation),
            color: if controller.state.is_grounded { DEBUG_GREEN } else { DEBUG_RED },
        });
    }

    if toggles.center_of_mass {
        // Offset не вращается вместе с корпусом (маркер, не физика)
        overlay.centers_of_mass.push(DebugSphere {
            entity,
            center: pose.translation + stats.center_of_mass,
            radius: CENTER_OF_MASS_MARKER_RADIUS,
            color: DEBUG_RED,
        });
    }

    if let (true, Some(query)) = (toggles.slope_check, query) {
        let depth = stats.slope_probe_depth();
        let mask = stats.ground_group();

        for origin in controller.sensor_points_world(pose) {
            let ray = match query.cast_ray(origin, Vec3::NEG_Y, depth, mask) {
                Some(hit) => DebugRay { entity, origin, end: hit.point, hit: true, color: DEBUG_GREEN },
                None => DebugRay {
                    entity,
                    origin,
                    end: origin + Vec3::NEG_Y * depth,
                    hit: false,
                    color: DEBUG_RED,
                },
            };
            overlay.slope_rays.push(ray);
        }
    }
}
