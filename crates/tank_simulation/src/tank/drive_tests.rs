//! Tests for the drive model.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::tank::drive::*;
    use crate::tank::stats::TankStats;

    fn stats_with(max_linear_speed: f32, acceleration: f32) -> TankStats {
        TankStats {
            max_linear_speed,
            acceleration,
            deceleration: 4.0,
            input_deadzone: 0.1,
            ..default()
        }
    }

    #[test]
    fn test_reversal_selects_deceleration() {
        // speed +5, throttle -1 (нажат) → разворот
        let pressed = is_pressed(-1.0, 0.1);
        let changing = is_changing_direction(pressed, 5.0, -1.0);

        assert!(pressed);
        assert!(changing);
        assert_eq!(select_rate(pressed, changing, 2.0, 4.0), 4.0);

        let step = grounded_step(5.0, 0.0, &stats_with(10.0, 2.0), Vec2::new(0.0, -1.0), 0.01);
        assert_eq!(step.linear_rate, 4.0);
    }

    #[test]
    fn test_from_rest_selects_acceleration() {
        let step = grounded_step(0.0, 0.0, &stats_with(10.0, 2.0), Vec2::new(0.0, 1.0), 0.01);

        assert_eq!(step.linear_rate, 2.0);
    }

    #[test]
    fn test_hysteresis_below_threshold() {
        // |speed| = 0.04 < 0.05 → не разворот, даже если знак другой
        assert!(!is_changing_direction(true, 0.04, -1.0));
        assert!(!is_changing_direction(true, -0.05, 1.0)); // строго больше
        assert!(is_changing_direction(true, -0.06, 1.0));
    }

    #[test]
    fn test_released_input_coasts_with_deceleration() {
        let step = grounded_step(6.0, 20.0, &TankStats::medium_tank(), Vec2::new(0.05, 0.0), 0.1);

        let stats = TankStats::medium_tank();
        assert_eq!(step.linear_rate, stats.deceleration);
        assert_eq!(step.rotational_rate, stats.rot_deceleration);
        assert_eq!(step.target_linear, 0.0);
        assert!(step.linear_speed < 6.0 && step.linear_speed > 0.0);
    }

    #[test]
    fn test_deadzone_is_strict() {
        assert!(!is_pressed(0.1, 0.1));
        assert!(is_pressed(0.1001, 0.1));
        assert!(is_pressed(-0.5, 0.1));
    }

    #[test]
    fn test_blend_factor_clamped_to_one() {
        // max 10, accel 2, dt 0.5 → factor 1.0 → сразу 10
        let step = grounded_step(0.0, 0.0, &stats_with(10.0, 2.0), Vec2::new(0.0, 1.0), 0.5);
        assert_eq!(step.linear_speed, 10.0);

        // Factor > 1 тоже не перелетает target
        let step = grounded_step(0.0, 0.0, &stats_with(10.0, 8.0), Vec2::new(0.0, 1.0), 0.5);
        assert_eq!(step.linear_speed, 10.0);
    }

    #[test]
    fn test_partial_blend() {
        // accel 0.5, dt 0.5 → factor 0.25 → 2.5
        let step = grounded_step(0.0, 0.0, &stats_with(10.0, 0.5), Vec2::new(0.0, 1.0), 0.5);
        assert_eq!(step.linear_speed, 2.5);
    }

    #[test]
    fn test_target_is_fixed_point() {
        let stats = TankStats::medium_tank();
        let input = Vec2::new(-0.5, 1.0);
        let linear = stats.max_linear_speed;
        let rotational = stats.max_rotational_speed * -0.5;

        for _ in 0..10 {
            let step = grounded_step(linear, rotational, &stats, input, 1.0 / 60.0);
            assert_eq!(step.linear_speed, linear);
            assert_eq!(step.rotational_speed, rotational);
        }
    }

    #[test]
    fn test_rotation_uses_rotational_rates() {
        let stats = TankStats {
            rot_acceleration: 1.0,
            rot_deceleration: 9.0,
            ..TankStats::medium_tank()
        };

        let turning = grounded_step(0.0, 0.0, &stats, Vec2::new(1.0, 0.0), 0.1);
        assert_eq!(turning.rotational_rate, 1.0);

        let reversing = grounded_step(0.0, 30.0, &stats, Vec2::new(-1.0, 0.0), 0.1);
        assert_eq!(reversing.rotational_rate, 9.0);
    }

    #[test]
    fn test_blend_with_negative_factor_keeps_current() {
        assert_eq!(blend(3.0, 10.0, -0.5), 3.0);
    }

    #[test]
    fn test_integrate_straight_line() {
        let mut pose = Transform::IDENTITY;

        integrate_pose(&mut pose, 4.0, 0.0, 0.5);

        // forward = -Z
        assert!((pose.translation - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
        assert_eq!(pose.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_positive_turn_is_clockwise_from_above() {
        let mut pose = Transform::IDENTITY;

        // 90°/sec за 1 sec без движения
        integrate_pose(&mut pose, 0.0, 90.0, 1.0);

        let forward = pose.rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-5, "forward = {:?}", forward);
        assert!(pose.translation.length() < 1e-6);
    }

    #[test]
    fn test_orientation_before_position() {
        let mut pose = Transform::IDENTITY;

        // Поворот на 90° и шаг 1m в одном tick: шаг идёт уже по новому forward (+X)
        integrate_pose(&mut pose, 1.0, 90.0, 1.0);

        assert!((pose.translation - Vec3::X).length() < 1e-5, "translation = {:?}", pose.translation);
    }

    #[test]
    fn test_zero_dt_changes_nothing() {
        let mut pose = Transform::from_xyz(1.0, 2.0, 3.0);
        let before = pose;

        integrate_pose(&mut pose, 7.0, 45.0, 0.0);

        assert_eq!(pose.translation, before.translation);
        assert!(pose.rotation.angle_between(before.rotation) < 1e-6);
    }
}
