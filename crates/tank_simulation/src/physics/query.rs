//! `SpatialQuery` поверх Rapier
//!
//! Overlap box → `intersect_shape` с cuboid формой,
//! slope лучи → `cast_ray_and_get_normal`. Свой корпус исключается из запросов,
//! сенсоры тоже (trigger volumes не являются землёй).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::tank::sensor::{RayHit, SpatialQuery};

/// Read-only адаптер Rapier context для одного танка
pub struct RapierSpatialQuery<'a, 'w> {
    context: &'a RapierContext<'w>,
    exclude: Option<Entity>,
}

impl<'a, 'w> RapierSpatialQuery<'a, 'w> {
    pub fn new(context: &'a RapierContext<'w>) -> Self {
        Self { context, exclude: None }
    }

    /// Не считать землёй собственный rigid body танка
    pub fn excluding(mut self, body: Entity) -> Self {
        self.exclude = Some(body);
        self
    }

    fn filter(&self, mask: Group) -> QueryFilter<'static> {
        let filter = QueryFilter::new()
            .groups(CollisionGroups::new(Group::ALL, mask))
            .exclude_sensors();

        match self.exclude {
            Some(body) => filter.exclude_rigid_body(body),
            None => filter,
        }
    }
}

impl SpatialQuery for RapierSpatialQuery<'_, '_> {
    fn overlap_box(&self, center: Vec3, half_extents: Vec3, rotation: Quat, mask: Group) -> bool {
        let shape = Collider::cuboid(half_extents.x, half_extents.y, half_extents.z);

        // Первого пересечения достаточно, callback `false` останавливает поиск
        let mut hit = false;
        self.context
            .intersect_shape(center, rotation, &*shape.raw, self.filter(mask), |_| {
                hit = true;
                false
            });
        hit
    }

    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: Group,
    ) -> Option<RayHit> {
        self.context
            .cast_ray_and_get_normal(origin, direction, max_distance, true, self.filter(mask))
            .map(|(_, intersection)| RayHit {
                point: intersection.point,
                normal: intersection.normal,
            })
    }
}
