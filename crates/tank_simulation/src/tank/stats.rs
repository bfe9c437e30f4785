//! Tank stats: конфигурация ходовой части
//!
//! Architecture Decision:
//! - Один `TankStats` на танк, загружается при создании и больше не меняется
//! - Контроллер читает stats только read-only
//! - Инварианты проверяются на загрузке (`validate` / `from_json`), не per-tick
//!
//! Единицы:
//! - linear: units/sec, rates: 1/sec (blend factor = rate * dt)
//! - rotational: degrees/sec

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;
use serde::{Deserialize, Serialize};

use crate::error::TankStatsError;
use crate::physics::collision::COLLISION_LAYER_GROUND;

/// Tank stats component
///
/// Shared read-only: контроллер никогда не пишет сюда.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct TankStats {
    /// Максимальная скорость вперёд/назад (units/sec)
    pub max_linear_speed: f32,

    /// Максимальная скорость поворота (degrees/sec)
    pub max_rotational_speed: f32,

    /// Blend rate при разгоне (1/sec)
    pub acceleration: f32,

    /// Blend rate при торможении, coast-to-stop и смене направления (1/sec)
    pub deceleration: f32,

    pub rot_acceleration: f32,
    pub rot_deceleration: f32,

    /// |input| должен быть строго больше, чтобы ось считалась "нажатой"
    pub input_deadzone: f32,

    /// Half-extents grounding box (tread check)
    ///
    /// `y * 2` также задаёт длину slope-лучей.
    pub grounding_check_extents: Vec3,

    /// Collision groups, которые считаются "землёй"
    pub ground_mask: u32,

    /// Смещение центра масс (local space)
    pub center_of_mass: Vec3,

    // === Spawn-only ===
    /// Масса корпуса (kg), для ColliderMassProperties
    pub mass: f32,

    /// Half-extents коллайдера корпуса
    pub hull_half_extents: Vec3,
}

impl Default for TankStats {
    fn default() -> Self {
        Self::medium_tank()
    }
}

impl TankStats {
    /// Средний танк: инертный разгон, резкое торможение
    pub fn medium_tank() -> Self {
        Self {
            max_linear_speed: 8.0,
            max_rotational_speed: 60.0,
            acceleration: 1.5,
            deceleration: 3.0,
            rot_acceleration: 4.0,
            rot_deceleration: 6.0,
            input_deadzone: 0.1,
            grounding_check_extents: Vec3::new(1.4, 0.15, 2.2),
            ground_mask: COLLISION_LAYER_GROUND,
            center_of_mass: Vec3::new(0.0, -0.5, 0.0),
            mass: 32_000.0,
            hull_half_extents: Vec3::new(1.6, 0.6, 2.6),
        }
    }

    /// Лёгкий танк: быстрее и отзывчивее
    pub fn light_tank() -> Self {
        Self {
            max_linear_speed: 14.0,
            max_rotational_speed: 90.0,
            acceleration: 3.0,
            deceleration: 5.0,
            rot_acceleration: 6.0,
            rot_deceleration: 8.0,
            input_deadzone: 0.1,
            grounding_check_extents: Vec3::new(1.1, 0.12, 1.8),
            ground_mask: COLLISION_LAYER_GROUND,
            center_of_mass: Vec3::new(0.0, -0.35, 0.0),
            mass: 14_000.0,
            hull_half_extents: Vec3::new(1.2, 0.45, 2.0),
        }
    }

    /// Ground mask как rapier Group (лишние биты отбрасываются)
    pub fn ground_group(&self) -> Group {
        Group::from_bits_truncate(self.ground_mask)
    }

    /// Длина slope-лучей вниз от sensor points
    pub fn slope_probe_depth(&self) -> f32 {
        self.grounding_check_extents.y * 2.0
    }

    /// Загрузка из JSON с проверкой инвариантов
    ///
    /// Отсутствующие поля берутся из `medium_tank()`.
    pub fn from_json(json: &str) -> Result<Self, TankStatsError> {
        let stats: TankStats = serde_json::from_str(json)?;
        stats.validate()?;
        Ok(stats)
    }

    /// Инварианты: rates/limits/extents конечны и >= 0, deadzone ∈ [0, 1]
    pub fn validate(&self) -> Result<(), TankStatsError> {
        let scalars = [
            ("max_linear_speed", self.max_linear_speed),
            ("max_rotational_speed", self.max_rotational_speed),
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("rot_acceleration", self.rot_acceleration),
            ("rot_deceleration", self.rot_deceleration),
            ("grounding_check_extents.x", self.grounding_check_extents.x),
            ("grounding_check_extents.y", self.grounding_check_extents.y),
            ("grounding_check_extents.z", self.grounding_check_extents.z),
            ("mass", self.mass),
            ("hull_half_extents.x", self.hull_half_extents.x),
            ("hull_half_extents.y", self.hull_half_extents.y),
            ("hull_half_extents.z", self.hull_half_extents.z),
        ];

        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(TankStatsError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(TankStatsError::Negative { field, value });
            }
        }

        if !self.center_of_mass.is_finite() {
            return Err(TankStatsError::NotFinite { field: "center_of_mass" });
        }

        if !(0.0..=1.0).contains(&self.input_deadzone) {
            return Err(TankStatsError::DeadzoneOutOfRange(self.input_deadzone));
        }

        Ok(())
    }
}
