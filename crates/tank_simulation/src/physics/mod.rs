//! Physics glue
//!
//! Rapier для коллизий и rigid body, движение танка интегрируем сами.
//! - `query`: ground probes через RapierContext
//! - `plane`: аналитическая земля для headless режима
//! - `collision`: collision groups

pub mod collision;
pub mod plane;
pub mod query;

// Re-export основных типов
pub use collision::{ground_groups, hull_groups, COLLISION_LAYER_GROUND, COLLISION_LAYER_HULL};
pub use plane::PlaneGround;
pub use query::RapierSpatialQuery;
