//! Input sampler
//!
//! Вход уже декодирован внешним слоем (клавиатура, геймпад, AI):
//! `movement.x`: turn, `movement.y`: throttle. Буферизации нет,
//! каждый tick читается текущее значение.

use bevy::prelude::*;

/// Входные данные танка
///
/// Для headless тестов: mock input через этот компонент.
/// Для игры: заполняется input системой.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TankInput {
    /// x = turn (-1 влево .. 1 вправо), y = throttle (-1 назад .. 1 вперёд)
    pub movement: Vec2,
}

impl TankInput {
    pub fn new(turn: f32, throttle: f32) -> Self {
        Self { movement: Vec2::new(turn, throttle) }
    }

    /// Снимок на текущий tick, оси зажаты в [-1, 1]
    pub fn sample(&self) -> Vec2 {
        self.movement.clamp(Vec2::NEG_ONE, Vec2::ONE)
    }
}
