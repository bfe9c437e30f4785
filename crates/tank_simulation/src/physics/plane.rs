//! Аналитическая земля для headless режима (без Rapier)
//!
//! Бесконечная плоскость, всё под ней: solid. Используется headless
//! бинарником и тестами вместо `RapierContext`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;

use crate::physics::collision::COLLISION_LAYER_GROUND;
use crate::tank::sensor::{RayHit, SpatialQuery};

/// Плоская (возможно наклонная) земля
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlaneGround {
    /// Любая точка на поверхности
    pub origin: Vec3,
    /// Unit нормаль поверхности (наружу, "вверх")
    pub normal: Vec3,
    /// Collision groups земли
    pub layer: Group,
}

impl Default for PlaneGround {
    fn default() -> Self {
        Self::flat(0.0)
    }
}

impl PlaneGround {
    /// Горизонтальная земля на высоте `height`
    pub fn flat(height: f32) -> Self {
        Self {
            origin: Vec3::new(0.0, height, 0.0),
            normal: Vec3::Y,
            layer: Group::from_bits_truncate(COLLISION_LAYER_GROUND),
        }
    }

    /// Склон через начало координат, поднимается в сторону -Z на `angle_deg`
    pub fn slope(angle_deg: f32) -> Self {
        Self {
            origin: Vec3::ZERO,
            normal: Quat::from_rotation_x(angle_deg.to_radians()) * Vec3::Y,
            ..Self::flat(0.0)
        }
    }

    /// Signed distance до поверхности (положительно над землёй)
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point - self.origin)
    }

    /// Высота поверхности в точке (x, z); `None` для вертикальной плоскости
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        if self.normal.y.abs() <= f32::EPSILON {
            return None;
        }
        let dx = x - self.origin.x;
        let dz = z - self.origin.z;
        Some(self.origin.y - (self.normal.x * dx + self.normal.z * dz) / self.normal.y)
    }

    fn matches(&self, mask: Group) -> bool {
        self.layer.intersects(mask)
    }
}

impl SpatialQuery for PlaneGround {
    fn overlap_box(&self, center: Vec3, half_extents: Vec3, rotation: Quat, mask: Group) -> bool {
        if !self.matches(mask) {
            return false;
        }

        // Проекция box на нормаль: radius = Σ |n·axis_i| * h_i
        let radius = (self.normal.dot(rotation * Vec3::X) * half_extents.x).abs()
            + (self.normal.dot(rotation * Vec3::Y) * half_extents.y).abs()
            + (self.normal.dot(rotation * Vec3::Z) * half_extents.z).abs();

        self.signed_distance(center) - radius <= 0.0
    }

    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: Group,
    ) -> Option<RayHit> {
        if !self.matches(mask) {
            return None;
        }

        let distance = self.signed_distance(origin);
        if distance <= 0.0 {
            // Старт внутри solid
            return Some(RayHit { point: origin, normal: self.normal });
        }

        let approach = self.normal.dot(direction);
        if approach >= 0.0 {
            return None;
        }

        let toi = distance / -approach;
        if toi > max_distance {
            return None;
        }

        Some(RayHit {
            point: origin + direction * toi,
            normal: self.normal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: Group = Group::GROUP_1;

    #[test]
    fn test_ray_hits_flat_ground() {
        let ground = PlaneGround::flat(0.0);

        let hit = ground
            .cast_ray(Vec3::new(3.0, 0.2, -1.0), Vec3::NEG_Y, 0.5, GROUND)
            .expect("ray should hit");

        assert!((hit.point - Vec3::new(3.0, 0.0, -1.0)).length() < 1e-6);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_ray_too_short() {
        let ground = PlaneGround::flat(0.0);
        assert!(ground.cast_ray(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 0.5, GROUND).is_none());
    }

    #[test]
    fn test_mask_filters_ground() {
        let ground = PlaneGround::flat(0.0);

        assert!(ground.cast_ray(Vec3::Y * 0.1, Vec3::NEG_Y, 1.0, Group::GROUP_2).is_none());
        assert!(!ground.overlap_box(Vec3::ZERO, Vec3::ONE, Quat::IDENTITY, Group::GROUP_2));
        assert!(ground.overlap_box(Vec3::ZERO, Vec3::ONE, Quat::IDENTITY, GROUND));
    }

    #[test]
    fn test_box_overlap_depends_on_height() {
        let ground = PlaneGround::flat(0.0);
        let extents = Vec3::new(1.0, 0.15, 2.0);

        assert!(ground.overlap_box(Vec3::new(0.0, 0.1, 0.0), extents, Quat::IDENTITY, GROUND));
        assert!(!ground.overlap_box(Vec3::new(0.0, 0.2, 0.0), extents, Quat::IDENTITY, GROUND));
    }

    #[test]
    fn test_rotated_box_reaches_further_down() {
        let ground = PlaneGround::flat(0.0);
        let extents = Vec3::new(0.1, 0.1, 2.0);
        let center = Vec3::new(0.0, 1.0, 0.0);

        assert!(!ground.overlap_box(center, extents, Quat::IDENTITY, GROUND));
        // Длинная ось вертикально
        assert!(ground.overlap_box(center, extents, Quat::from_rotation_x(90f32.to_radians()), GROUND));
    }

    #[test]
    fn test_slope_normal_and_height() {
        let ground = PlaneGround::slope(20.0);

        let angle = ground.normal.angle_between(Vec3::Y).to_degrees();
        assert!((angle - 20.0).abs() < 1e-3);

        // Поднимается в сторону -Z
        let ahead = ground.height_at(0.0, -1.0).expect("not vertical");
        let behind = ground.height_at(0.0, 1.0).expect("not vertical");
        assert!(ahead > 0.0 && behind < 0.0);
        assert!((ahead - 20f32.to_radians().tan()).abs() < 1e-4);
    }
}
