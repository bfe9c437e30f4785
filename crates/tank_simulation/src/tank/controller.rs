//! Tank контроллер: состояние + единственный entry point `tick(dt)`
//!
//! Архитектура:
//! - `TankController`: компонент, владеет `TankState` (persistent между ticks)
//! - `TankStats`: отдельный read-only компонент
//! - Геометрия через `SpatialQuery`, поза через `Transform` rigid body
//!
//! Порядок внутри tick (данные текут только вперёд):
//! 1. Ground sensor (overlap box → если grounded, slope rays)
//! 2. Input sampler
//! 3. Drive model (grounded: blend; airborne: инерция)
//! 4. Pose update (orientation → position)

use bevy::prelude::*;

use crate::error::TickSkipped;
use crate::tank::drive::{self, DriveStep};
use crate::tank::events::Collaborator;
use crate::tank::input::TankInput;
use crate::tank::sensor::{self, GroundSlope, SpatialQuery};
use crate::tank::stats::TankStats;

/// Persistent состояние танка
///
/// Инициализация: ungrounded, нулевые скорости.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct TankState {
    pub is_grounded: bool,
    /// Средняя нормаль земли; zero если ungrounded или ни один луч не попал
    pub average_ground_normal: Vec3,
    /// units/sec вдоль forward
    pub current_linear_speed: f32,
    /// degrees/sec, положительное: по часовой сверху
    pub current_rotational_speed: f32,
}

impl TankState {
    /// Угол наклона земли от горизонтали (degrees), всегда выводится из нормали
    pub fn ground_angle_from_flat(&self) -> f32 {
        sensor::ground_angle_from_flat(self.average_ground_normal)
    }
}

/// Debug toggles (визуализация в `TankDebugOverlay`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct TankDebugToggles {
    pub tread_box: bool,
    pub center_of_mass: bool,
    pub slope_check: bool,
}

/// Что произошло за tick (для тестов и debug)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub grounded: bool,
    /// `None` когда ungrounded (наклон не пересчитывался)
    pub slope: Option<GroundSlope>,
    /// `None` когда ungrounded (blend не выполнялся)
    pub drive: Option<DriveStep>,
}

/// Tank контроллер компонент
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct TankController {
    pub state: TankState,
    /// Поза grounding box относительно корпуса
    pub tread_check: Transform,
    /// Точки slope-лучей относительно корпуса
    pub slope_check_points: Vec<Vec3>,
    pub debug: TankDebugToggles,
}

impl Default for TankController {
    fn default() -> Self {
        let stats = TankStats::default();
        Self::for_hull(stats.hull_half_extents, stats.grounding_check_extents)
    }
}

impl TankController {
    /// Раскладка сенсоров под box-корпус:
    /// - tread check по центру днища
    /// - 4 slope точки по углам днища, приподняты на `extents.y`
    ///   (луч длиной `2 * extents.y` проходит сквозь поверхность)
    pub fn for_hull(hull_half_extents: Vec3, grounding_extents: Vec3) -> Self {
        let bottom = -hull_half_extents.y;
        let point_y = bottom + grounding_extents.y;
        let (hx, hz) = (hull_half_extents.x, hull_half_extents.z);

        Self {
            state: TankState::default(),
            tread_check: Transform::from_xyz(0.0, bottom, 0.0),
            slope_check_points: vec![
                Vec3::new(-hx, point_y, -hz),
                Vec3::new(hx, point_y, -hz),
                Vec3::new(-hx, point_y, hz),
                Vec3::new(hx, point_y, hz),
            ],
            debug: TankDebugToggles::default(),
        }
    }

    /// World-space поза grounding box
    pub fn probe_world(&self, pose: &Transform) -> Transform {
        pose.mul_transform(self.tread_check)
    }

    /// World-space slope sensor points
    pub fn sensor_points_world(&self, pose: &Transform) -> Vec<Vec3> {
        self.slope_check_points
            .iter()
            .map(|point| pose.transform_point(*point))
            .collect()
    }

    /// Один fixed tick.
    ///
    /// Если хоть одного collaborator нет: `Err(TickSkipped)` со списком всех
    /// отсутствующих, состояние и поза не тронуты.
    pub fn tick<Q: SpatialQuery + ?Sized>(
        &mut self,
        stats: Option<&TankStats>,
        input: Option<&TankInput>,
        pose: Option<&mut Transform>,
        query: Option<&Q>,
        dt: f32,
    ) -> Result<TickReport, TickSkipped> {
        let (stats, input, pose, query) = match (stats, input, pose, query) {
            (Some(stats), Some(input), Some(pose), Some(query)) => (stats, input, pose, query),
            (stats, input, pose, query) => {
                let mut missing = Vec::new();
                if input.is_none() {
                    missing.push(Collaborator::InputSource);
                }
                if stats.is_none() {
                    missing.push(Collaborator::Stats);
                }
                if pose.is_none() {
                    missing.push(Collaborator::RigidBody);
                }
                if query.is_none() {
                    missing.push(Collaborator::SpatialQuery);
                }
                return Err(TickSkipped { missing });
            }
        };

        // 1. Ground sensor
        let mask = stats.ground_group();
        let probe = self.probe_world(pose);
        let grounded =
            sensor::check_grounded(query, &probe, stats.grounding_check_extents, mask);

        let slope = if grounded {
            let points = self.sensor_points_world(pose);
            Some(sensor::estimate_ground_slope(
                query,
                &points,
                stats.slope_probe_depth(),
                mask,
            ))
        } else {
            None
        };

        self.state.is_grounded = grounded;
        self.state.average_ground_normal = slope.map_or(Vec3::ZERO, |slope| slope.normal);

        // 2. Input sampler
        let movement = input.sample();

        // 3. Drive model
        let step = if grounded {
            let step = drive::grounded_step(
                self.state.current_linear_speed,
                self.state.current_rotational_speed,
                stats,
                movement,
                dt,
            );
            self.state.current_linear_speed = step.linear_speed;
            self.state.current_rotational_speed = step.rotational_speed;
            Some(step)
        } else {
            None
        };

        // 4. Pose update
        drive::integrate_pose(
            pose,
            self.state.current_linear_speed,
            self.state.current_rotational_speed,
            dt,
        );

        Ok(TickReport {
            grounded,
            slope,
            drive: step,
        })
    }
}
