use fizika::prelude::*;
use fizika::models::cart::STOP_X;
use fizika::models::projectile::{ground_y, BALL_RADIUS};

// H0: Substep size changes the trajectory
// Falsification: advance the same damped pendulum state over 10 s with the
// nominal substep and with a 10x finer one; compare final states.
#[test]
fn h0_1_substep_invariance() {
    let f = |y: &[f64; 2]| [y[1], -9.8 * y[0].sin() - 0.1 * y[1]];

    let mut coarse = [0.8, 0.0];
    let mut fine = [0.8, 0.0];
    for _ in 0..600 {
        advance(&mut coarse, 1.0 / 60.0, 1.0 / 60.0, &f);
        advance(&mut fine, 1.0 / 60.0, 1.0 / 600.0, &f);
    }

    for i in 0..2 {
        let scale = fine[i].abs().max(1e-6);
        assert!(
            ((coarse[i] - fine[i]) / scale).abs() < 1e-3,
            "component {i}: coarse {} vs fine {}",
            coarse[i],
            fine[i]
        );
    }
}

// H0: Undamped oscillators lose energy through the integrator
// Falsification: run pendulum and spring with c = 0, μ = 0 for 10 s and
// compare total mechanical energy against the start.
#[test]
fn h0_2_undamped_energy_conservation() {
    let p_params = fizika::models::PendulumParams {
        drag: 0.0,
        ..Default::default()
    };
    let mut pendulum = EnergyPendulum::new();
    pendulum.set_angle(1.0);
    let e0 = pendulum.energy_budget(&p_params).total();
    for _ in 0..600 {
        pendulum.step(1.0 / 60.0, &p_params);
    }
    let e1 = pendulum.energy_budget(&p_params).total();
    assert!(((e1 - e0) / e0).abs() < 1e-6, "pendulum drifted {e0} -> {e1}");

    let s_params = SpringParams {
        damping: 0.0,
        friction: 0.0,
        ..Default::default()
    };
    let mut spring = FrictionSpring::new();
    spring.set_displacement(0.3);
    let e0 = spring.energy_budget(&s_params).total();
    for _ in 0..600 {
        spring.step(1.0 / 60.0, &s_params);
    }
    let e1 = spring.energy_budget(&s_params).total();
    assert!(((e1 - e0) / e0).abs() < 1e-6, "spring drifted {e0} -> {e1}");
}

// H0: The dissipation accumulator leaks energy from the budget
// Falsification: with damping on, U + K + D must still equal the release
// energy within the quadrature tolerance.
#[test]
fn h0_3_damped_budget_conservation() {
    let params = fizika::models::PendulumParams {
        drag: 0.4,
        ..Default::default()
    };
    let mut pendulum = EnergyPendulum::new();
    pendulum.set_angle(1.2);
    let e0 = pendulum.energy_budget(&params).total();

    for _ in 0..1800 {
        pendulum.step(1.0 / 60.0, &params);
    }

    let budget = pendulum.energy_budget(&params);
    assert!(budget.dissipated > 0.2 * e0, "barely any dissipation recorded");
    assert!(
        ((budget.total() - e0) / e0).abs() < 0.03,
        "budget drifted {e0} -> {}",
        budget.total()
    );
}

// H0: Static friction lets a small displacement creep
// Falsification: release inside the stiction bound; any motion at all
// falsifies the hold.
#[test]
fn h0_4_stiction_holds_immediately() {
    let params = SpringParams {
        mass: 1.0,
        stiffness: 50.0,
        damping: 0.0,
        friction: 0.4,
    };
    let x0 = 0.8 * params.friction * params.mass * 9.8 / params.stiffness;
    let mut spring = FrictionSpring::new();
    spring.set_displacement(x0);

    for _ in 0..600 {
        spring.step(1.0 / 60.0, &params);
        assert_eq!(spring.v, 0.0, "mass moved at x = {}", spring.x);
    }
    assert!((spring.x - x0).abs() < 1e-12);
}

// H0: Bounce peaks decay by something other than e² = 0.9
// Falsification: drop a ball in vacuum and measure consecutive apex heights.
#[test]
fn h0_5_restitution_peak_ratio() {
    let params = ProjectileParams {
        gravity: 9.8,
        air_drag: 0.0,
    };
    let mut range = ProjectileRange::new(7);
    range.launch(480.0, 200.0, 0.0, 0.0);

    let mut peaks = Vec::new();
    let mut prev_vy = 0.0;
    for _ in 0..20_000 {
        range.step(1.0 / 240.0, &params);
        if range.shots().is_empty() {
            break;
        }
        let shot = &range.shots()[0];
        if prev_vy < 0.0 && shot.vy >= 0.0 {
            peaks.push(ground_y() - BALL_RADIUS - shot.y);
        }
        prev_vy = shot.vy;
    }

    assert!(peaks.len() >= 2, "not enough bounces observed");
    for pair in peaks.windows(2) {
        let ratio = pair[1] / pair[0];
        assert!((ratio - 0.9).abs() < 0.02, "peak ratio {ratio}");
    }
}

// H0: The gate stopwatch mismeasures the analytic travel time
// Falsification: dragless cart, gates at 0.5 m and 2.0 m; compare against
// t = sqrt(2x/a) differences.
#[test]
fn h0_6_gate_interval_matches_kinematics() {
    let params = CartParams {
        drag: 0.0,
        ..Default::default()
    };
    let mut cart = AtwoodCart::new();
    cart.set_gate_a(0.5);
    cart.set_gate_b(2.0);
    cart.start();

    for _ in 0..600 {
        cart.step(1.0 / 60.0, &params);
    }

    let a = params.hanging_mass * params.gravity / (params.cart_mass + params.hanging_mass);
    let expected = (2.0 * 2.0 / a).sqrt() - (2.0 * 0.5 / a).sqrt();
    assert!(!cart.timer().is_running(), "stopwatch never stopped");
    assert!(
        (cart.timer().elapsed() - expected).abs() < 0.1,
        "measured {} expected {expected}",
        cart.timer().elapsed()
    );
}

// H0: The cart overshoots or undershoots the end stop
// Falsification: the final state must be exactly (STOP_X, 0).
#[test]
fn h0_7_cart_boundary_clamp_exact() {
    let params = CartParams::default();
    let mut cart = AtwoodCart::new();
    cart.start();

    for _ in 0..1200 {
        cart.step(1.0 / 60.0, &params);
    }

    assert_eq!(cart.x, STOP_X);
    assert_eq!(cart.v, 0.0);
    assert!(!cart.is_running());
}

// H0: Checkpoint latches re-trigger on later frames
// Falsification: record each latch right after it fires, then keep driving
// and compare.
#[test]
fn h0_8_checkpoint_latch_idempotent() {
    let params = CarParams::default();
    let mut car = Car::new();
    car.start();

    let mut first: Vec<Option<fizika::events::CheckpointRecord>> = vec![None; 4];
    for _ in 0..2000 {
        car.step(1.0 / 60.0, &params);
        for (i, cp) in car.checkpoints().iter().enumerate() {
            if first[i].is_none() {
                first[i] = cp.record;
            }
        }
    }

    for (i, cp) in car.checkpoints().iter().enumerate() {
        assert_eq!(cp.record, first[i], "checkpoint {i} re-latched");
    }
    assert!(first.iter().all(Option::is_some), "not all checkpoints hit");
}

// H0: Throttle past the slip point keeps adding drive force
// Falsification: 90 % and 120 % throttle must produce identical runs.
#[test]
fn h0_9_traction_saturation() {
    let at_slip = CarParams {
        throttle_percent: 90.0,
        ..Default::default()
    };
    let past_slip = CarParams {
        throttle_percent: 120.0,
        ..Default::default()
    };

    let mut a = Car::new();
    let mut b = Car::new();
    a.start();
    b.start();
    for _ in 0..600 {
        a.step(1.0 / 60.0, &at_slip);
        b.step(1.0 / 60.0, &past_slip);
    }

    assert_eq!(a.x, b.x);
    assert_eq!(a.v, b.v);
}

// H0: Target respawn sequences diverge under the same seed
// Falsification: fire the same hit sequence into two ranges and compare
// target positions bitwise.
#[test]
fn h0_10_reproducible_target_sequence() {
    let params = ProjectileParams {
        gravity: 9.8,
        air_drag: 0.0,
    };
    let mut a = ProjectileRange::new(42);
    let mut b = ProjectileRange::new(42);

    for _ in 0..3 {
        let ta = a.target();
        a.launch(ta.x, ta.y - 30.0, 0.0, 0.0);
        let tb = b.target();
        b.launch(tb.x, tb.y - 30.0, 0.0, 0.0);
        for _ in 0..300 {
            a.step(1.0 / 60.0, &params);
            b.step(1.0 / 60.0, &params);
            if a.shots().is_empty() && b.shots().is_empty() {
                break;
            }
        }
        assert_eq!(a.target().x, b.target().x);
        assert_eq!(a.target().y, b.target().y);
    }
}

// H0: Configuration survives a YAML round trip with altered semantics
// Falsification: serialize the default config, parse it back, build model
// params, compare.
#[test]
fn h0_11_config_yaml_round_trip() {
    let config = SimConfig::default();
    let yaml = serde_yaml::to_string(&config).expect("serialize config");
    let restored = SimConfig::from_yaml(&yaml).expect("reparse config");

    let params = fizika::models::PendulumParams::from(&restored.models.pendulum);
    assert!((params.length - config.models.pendulum.length).abs() < f64::EPSILON);
    assert!((params.gravity - config.models.pendulum.gravity).abs() < f64::EPSILON);

    let car = CarParams::from(&restored.models.car);
    assert!((car.mass - 1200.0).abs() < f64::EPSILON);
}

// H0: Frame clamping changes physics rather than just limiting catch-up
// Falsification: a huge elapsed time must advance the model exactly as far
// as one maximal frame.
#[test]
fn h0_12_background_tab_clamp() {
    let params = fizika::models::PendulumParams::default();
    let mut stalled = EnergyPendulum::new();
    let mut steady = EnergyPendulum::new();
    stalled.set_angle(0.9);
    steady.set_angle(0.9);

    stalled.step(30.0, &params);
    steady.step(1.0 / 20.0, &params);

    assert_eq!(stalled.theta, steady.theta);
    assert_eq!(stalled.omega, steady.omega);
}
