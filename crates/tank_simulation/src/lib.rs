//! TREADLINE Tank Simulation Core
//!
//! ECS-симуляция гусеничной техники на Bevy 0.16
//!
//! Per tick (FixedUpdate 60Hz), данные текут только вперёд:
//! Ground Sensor → Input Sampler → Drive Model → rigid body pose
//!
//! - ECS = контроллер, состояние, конфиг, диагностика
//! - Rapier = коллайдеры, mass properties, overlap/raycast запросы
//! - `PlaneGround` = аналитическая земля для headless режима и тестов

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod error;
pub mod logger;
pub mod physics;
pub mod tank;

// Re-export базовых типов для удобства
pub use error::{TankStatsError, TickSkipped};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use physics::{PlaneGround, RapierSpatialQuery};
pub use tank::{
    spawn_tank, Collaborator, HeadlessTankPlugin, SpatialQuery, TankController, TankControllerPlugin,
    TankDebugOverlay, TankDebugToggles, TankInput, TankState, TankStats, TankTickSkipped,
};

/// Главный plugin симуляции
///
/// Rapier plugin (`RapierPhysicsPlugin`) добавляет хост-приложение:
/// без него каждый tick танка пропускается с `Collaborator::SpatialQuery`.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .add_plugins(TankControllerPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Прогнать ровно `ticks` fixed ticks (без привязки к реальному времени)
///
/// Events не чистятся между ticks (First schedule не запускается),
/// поэтому тесты могут считать их напрямую.
pub fn run_fixed_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        let world = app.world_mut();
        let timestep = world.resource::<Time<Fixed>>().timestep();
        world.resource_mut::<Time<Fixed>>().advance_by(timestep);
        world.run_schedule(FixedUpdate);
    }
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
