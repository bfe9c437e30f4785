//! Ground sensor: grounded state + средний наклон поверхности
//!
//! Два шага каждый tick:
//! 1. `check_grounded`: overlap box (tread check) против ground mask
//! 2. `estimate_ground_slope`: только если grounded, лучи вниз из sensor points,
//!    среднее арифметическое нормалей попаданий
//!
//! Геометрию отдаёт `SpatialQuery` (rapier context или аналитическая плоскость),
//! сенсор её только читает.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;

/// Попадание луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
}

/// Read-only геометрические запросы к миру
///
/// `mask`: какие collision groups считаются попаданием.
pub trait SpatialQuery {
    /// Пересекает ли box (center, half_extents, rotation) хоть одну подходящую геометрию
    fn overlap_box(&self, center: Vec3, half_extents: Vec3, rotation: Quat, mask: Group) -> bool;

    /// Ближайшее попадание луча в пределах `max_distance`
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: Group,
    ) -> Option<RayHit>;
}

/// Результат оценки наклона
///
/// `normal`: среднее нормалей, НЕ перенормированное. Zero если попаданий нет.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroundSlope {
    pub normal: Vec3,
    pub hits: usize,
}

impl GroundSlope {
    /// Угол между средней нормалью и world-up (degrees)
    pub fn angle_from_flat(&self) -> f32 {
        ground_angle_from_flat(self.normal)
    }
}

/// Угол между `normal` и world-up в градусах.
///
/// Вектор нулевой длины считается "flat" (0), деления на ноль нет.
pub fn ground_angle_from_flat(normal: Vec3) -> f32 {
    let length = normal.length();
    if length <= f32::EPSILON {
        return 0.0;
    }

    (normal.dot(Vec3::Y) / length).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Grounded check: overlap box в world-space позе `probe`
pub fn check_grounded<Q: SpatialQuery + ?Sized>(
    query: &Q,
    probe: &Transform,
    extents: Vec3,
    mask: Group,
) -> bool {
    query.overlap_box(probe.translation, extents, probe.rotation, mask)
}

/// Средняя нормаль земли по лучам вниз из `sensor_points` (world-space)
///
/// Пустой список или ноль попаданий → zero normal, angle 0.
pub fn estimate_ground_slope<Q: SpatialQuery + ?Sized>(
    query: &Q,
    sensor_points: &[Vec3],
    probe_depth: f32,
    mask: Group,
) -> GroundSlope {
    let mut sum = Vec3::ZERO;
    let mut hits = 0usize;

    for point in sensor_points {
        if let Some(hit) = query.cast_ray(*point, Vec3::NEG_Y, probe_depth, mask) {
            sum += hit.normal;
            hits += 1;
        }
    }

    let normal = if hits == 0 { Vec3::ZERO } else { sum / hits as f32 };

    GroundSlope { normal, hits }
}
