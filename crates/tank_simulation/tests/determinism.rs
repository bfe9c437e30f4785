//! Тесты детерминизма
//!
//! Танки с одинаковым seed (input из `DeterministicRng`) дают идентичные состояния

use bevy::prelude::*;
use rand::Rng;
use tank_simulation::tank::tick_tanks_with;
use tank_simulation::*;

const TANK_COUNT: usize = 8;

/// Система: новый случайный input каждому танку (тем же RNG)
fn randomize_input(mut rng: ResMut<DeterministicRng>, mut tanks: Query<&mut TankInput>) {
    for mut input in tanks.iter_mut() {
        input.movement = Vec2::new(rng.rng.gen_range(-1.0..=1.0), rng.rng.gen_range(-1.0..=1.0));
    }
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 600;

    let snapshot1 = run_simulation(SEED, TICK_COUNT);
    let snapshot2 = run_simulation(SEED, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 300;

    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_different_seed_diverges() {
    assert_ne!(run_simulation(1, 120), run_simulation(2, 120));
}

/// Запускает симуляцию и возвращает snapshot контроллеров + поз
fn run_simulation(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    app.insert_resource(PlaneGround::flat(0.0))
        .add_plugins(HeadlessTankPlugin::<PlaneGround>::default())
        .add_systems(FixedUpdate, randomize_input.before(tick_tanks_with::<PlaneGround>));

    let stats = TankStats::default();
    {
        let world = app.world_mut();
        for i in 0..TANK_COUNT {
            let position = Vec3::new(i as f32 * 10.0, stats.hull_half_extents.y, 0.0);
            spawn_tank(&mut world.commands(), position, stats.clone());
        }
        world.flush();
    }

    run_fixed_ticks(&mut app, tick_count);

    let mut snapshot = world_snapshot::<TankController>(app.world_mut());
    snapshot.extend(world_snapshot::<Transform>(app.world_mut()));
    snapshot
}
