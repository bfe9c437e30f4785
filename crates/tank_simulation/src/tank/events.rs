//! Tank events

use bevy::prelude::*;
use std::fmt;

/// Внешний collaborator, без которого tick невозможен
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Collaborator {
    /// `TankInput` компонент
    InputSource,
    /// `TankStats` компонент
    Stats,
    /// `Transform` rigid body
    RigidBody,
    /// Rapier context / ground resource
    SpatialQuery,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collaborator::InputSource => "input",
            Collaborator::Stats => "stats",
            Collaborator::RigidBody => "rigid body",
            Collaborator::SpatialQuery => "spatial query",
        };
        f.write_str(name)
    }
}

/// Event: tick танка пропущен целиком
///
/// Генерируется: tank tick системы, ровно один на танк за tick.
/// Состояние контроллера и поза не менялись; следующий tick проверит заново.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TankTickSkipped {
    pub entity: Entity,
    pub missing: Vec<Collaborator>,
}
