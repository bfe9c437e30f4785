//! Headless симуляция TREADLINE
//!
//! Один танк на аналитической земле, случайный (seeded) input раз в секунду.
//! Первый аргумент: опциональный путь к JSON с `TankStats`.

use anyhow::Context;
use bevy::prelude::*;
use rand::Rng;
use tank_simulation::logger::{set_log_level, LogLevel};
use tank_simulation::{
    create_headless_app, log_info, run_fixed_ticks, spawn_tank, DeterministicRng, HeadlessTankPlugin,
    PlaneGround, TankController, TankInput, TankStats,
};

const SEED: u64 = 42;
const TOTAL_TICKS: usize = 1000;
const INPUT_PERIOD: usize = 60;

fn load_stats() -> anyhow::Result<TankStats> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read tank stats from {}", path))?;
            TankStats::from_json(&json).with_context(|| format!("invalid tank stats in {}", path))
        }
        None => Ok(TankStats::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let stats = load_stats()?;
    println!("Starting TREADLINE headless simulation (seed: {})", SEED);

    let mut app = create_headless_app(SEED);
    // Landed/airborne переходы (Debug) в демо не нужны
    set_log_level(LogLevel::Info);
    app.insert_resource(PlaneGround::flat(0.0))
        .add_plugins(HeadlessTankPlugin::<PlaneGround>::default());

    let spawn_height = stats.hull_half_extents.y;
    let tank = {
        let world = app.world_mut();
        let tank = spawn_tank(&mut world.commands(), Vec3::new(0.0, spawn_height, 0.0), stats);
        world.flush();
        tank
    };

    for tick in (0..TOTAL_TICKS).step_by(INPUT_PERIOD) {
        let world = app.world_mut();
        let input = {
            let mut rng = world.resource_mut::<DeterministicRng>();
            TankInput::new(rng.rng.gen_range(-1.0..=1.0), rng.rng.gen_range(-1.0..=1.0))
        };
        world.entity_mut(tank).insert(input);

        run_fixed_ticks(&mut app, INPUT_PERIOD.min(TOTAL_TICKS - tick));

        let world = app.world();
        let state = world.get::<TankController>(tank).map(|controller| controller.state);
        let pose = world.get::<Transform>(tank).copied();
        if let (Some(state), Some(pose)) = (state, pose) {
            log_info(&format!(
                "Tick {}: input {:?}, grounded {}, linear {:.2}, rotational {:.2}, position {:.2?}",
                tick + INPUT_PERIOD.min(TOTAL_TICKS - tick),
                input.movement,
                state.is_grounded,
                state.current_linear_speed,
                state.current_rotational_speed,
                pose.translation
            ));
        }
    }

    println!("Simulation complete!");
    Ok(())
}
