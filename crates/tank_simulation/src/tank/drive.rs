//! Drive model: input + persistent speeds → новые speeds → новая поза
//!
//! Grounded:
//! 1. target = max_speed * input (отдельно linear/rotational)
//! 2. pressed = |input| > deadzone (по каждой оси)
//! 3. смена направления = pressed && |speed| > 0.05 && sign(speed) != sign(input)
//! 4. rate: pressed → (смена ? deceleration : acceleration), иначе deceleration
//! 5. speed = lerp(speed, target, clamp(rate * dt, 0, 1)): экспоненциальное сглаживание
//!
//! Airborne: speeds не трогаем (инерция), только интеграция позы.
//!
//! Интеграция: сначала yaw вокруг world-up, потом сдвиг вдоль НОВОГО forward.
//! Так получаются дуги как у гусеничного хода, а не "поворот после шага".

use bevy::prelude::*;

use crate::tank::stats::TankStats;

/// Hysteresis: ниже этой скорости смена знака input не считается разворотом
pub const DIRECTION_CHANGE_THRESHOLD: f32 = 0.05;

/// Результат grounded шага
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveStep {
    pub linear_speed: f32,
    pub rotational_speed: f32,
    pub target_linear: f32,
    pub target_rotational: f32,
    /// Выбранный blend rate (acceleration или deceleration)
    pub linear_rate: f32,
    pub rotational_rate: f32,
}

#[inline]
pub fn is_pressed(axis: f32, deadzone: f32) -> bool {
    axis.abs() > deadzone
}

/// Ось нажата против текущего направления движения
#[inline]
pub fn is_changing_direction(pressed: bool, current_speed: f32, input: f32) -> bool {
    pressed
        && current_speed.abs() > DIRECTION_CHANGE_THRESHOLD
        && current_speed.signum() != input.signum()
}

#[inline]
pub fn select_rate(pressed: bool, changing_direction: bool, acceleration: f32, deceleration: f32) -> f32 {
    if pressed && !changing_direction {
        acceleration
    } else {
        deceleration
    }
}

/// Lerp с blend factor, зажатым в [0, 1] (rate * dt > 1 → сразу target)
#[inline]
pub fn blend(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor.clamp(0.0, 1.0)
}

/// Grounded шаг: targets, rates, blend.
///
/// `input.x`: turn, `input.y`: throttle.
pub fn grounded_step(
    current_linear: f32,
    current_rotational: f32,
    stats: &TankStats,
    input: Vec2,
    dt: f32,
) -> DriveStep {
    let throttle = input.y;
    let turn = input.x;

    let target_linear = stats.max_linear_speed * throttle;
    let target_rotational = stats.max_rotational_speed * turn;

    let move_pressed = is_pressed(throttle, stats.input_deadzone);
    let turn_pressed = is_pressed(turn, stats.input_deadzone);

    let linear_rate = select_rate(
        move_pressed,
        is_changing_direction(move_pressed, current_linear, throttle),
        stats.acceleration,
        stats.deceleration,
    );
    let rotational_rate = select_rate(
        turn_pressed,
        is_changing_direction(turn_pressed, current_rotational, turn),
        stats.rot_acceleration,
        stats.rot_deceleration,
    );

    DriveStep {
        linear_speed: blend(current_linear, target_linear, linear_rate * dt),
        rotational_speed: blend(current_rotational, target_rotational, rotational_rate * dt),
        target_linear,
        target_rotational,
        linear_rate,
        rotational_rate,
    }
}

/// Yaw (degrees/sec) → rotation за dt. Положительный turn: по часовой, если смотреть сверху.
#[inline]
pub fn yaw_rotation(rotational_speed: f32, dt: f32) -> Quat {
    Quat::from_rotation_y(-(rotational_speed * dt).to_radians())
}

/// Интеграция позы: orientation, потом position вдоль нового forward (-Z local)
pub fn integrate_pose(pose: &mut Transform, linear_speed: f32, rotational_speed: f32, dt: f32) {
    pose.rotation = (yaw_rotation(rotational_speed, dt) * pose.rotation).normalize();

    let forward = pose.rotation * Vec3::NEG_Z;
    pose.translation += forward * (linear_speed * dt);
}
