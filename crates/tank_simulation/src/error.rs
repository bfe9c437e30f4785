//! Ошибки: загрузка конфигурации танка + пропущенный tick
//!
//! Контроллер сам ничего не валидирует per-tick: невалидный `TankStats`
//! отсекается здесь, до спавна.

use crate::tank::events::Collaborator;

/// Нарушение инвариантов `TankStats` (или битый JSON).
#[derive(Debug, thiserror::Error)]
pub enum TankStatsError {
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be finite")]
    NotFinite { field: &'static str },

    #[error("input_deadzone must be within [0, 1], got {0}")]
    DeadzoneOutOfRange(f32),

    #[error("failed to parse tank stats: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tick пропущен: не хватает collaborators (список всех отсутствующих)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("tank tick skipped, missing: {}", join_missing(.missing))]
pub struct TickSkipped {
    pub missing: Vec<Collaborator>,
}

fn join_missing(missing: &[Collaborator]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
