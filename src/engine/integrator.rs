//! Fixed-substep classical RK4 driver.
//!
//! Every model in this crate advances its state through this one driver
//! instead of re-implementing the four-stage formula per page. The driver is
//! generic over state dimensionality: 2-component systems (pendulum, spring,
//! cart, car) and the 4-component projectile share the same code path.
//!
//! A frame's elapsed time is split into substeps no larger than a per-model
//! cap (1/240 s for the fast oscillators, 0.01 s for the cart). The cap
//! bounds stiffness-induced instability independent of the caller's
//! frame-rate-driven `total_dt`; the last substep may be shorter so the full
//! frame time is consumed exactly.

/// One classical RK4 step of size `h` for state `y` with derivative `f`.
///
/// `k1 = f(y)`, `k2 = f(y + h/2·k1)`, `k3 = f(y + h/2·k2)`,
/// `k4 = f(y + h·k3)`, then `y += h/6·(k1 + 2k2 + 2k3 + k4)`.
pub fn rk4_step<const N: usize>(y: &mut [f64; N], h: f64, f: &impl Fn(&[f64; N]) -> [f64; N]) {
    let k1 = f(y);

    let mut y2 = *y;
    for i in 0..N {
        y2[i] += 0.5 * h * k1[i];
    }
    let k2 = f(&y2);

    let mut y3 = *y;
    for i in 0..N {
        y3[i] += 0.5 * h * k2[i];
    }
    let k3 = f(&y3);

    let mut y4 = *y;
    for i in 0..N {
        y4[i] += h * k3[i];
    }
    let k4 = f(&y4);

    for i in 0..N {
        y[i] += (h / 6.0) * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
    }
}

/// Advance `y` by `total_dt` using substeps of at most `max_substep`.
///
/// `total_dt <= 0` is a no-op. The derivative must be a pure function of the
/// state and the caller's current parameter snapshot; given that, the final
/// state does not depend on how the frame driver chunks elapsed time.
///
/// # Panics
///
/// Panics if `max_substep` is not a positive finite number. Substep caps are
/// fixed at model-definition time, so a bad cap is a programming error, not
/// a runtime condition.
pub fn advance<const N: usize>(
    y: &mut [f64; N],
    total_dt: f64,
    max_substep: f64,
    f: &impl Fn(&[f64; N]) -> [f64; N],
) {
    advance_with(y, total_dt, max_substep, f, |_, _| {});
}

/// Like [`advance`], invoking `after` with the state and substep size after
/// each substep.
///
/// The hook is how models keep dissipation accumulation and post-step
/// corrections (stiction snapping) on the exact same substep grid as the
/// state integration.
///
/// # Panics
///
/// Panics if `max_substep` is not a positive finite number.
pub fn advance_with<const N: usize>(
    y: &mut [f64; N],
    total_dt: f64,
    max_substep: f64,
    f: &impl Fn(&[f64; N]) -> [f64; N],
    mut after: impl FnMut(&mut [f64; N], f64),
) {
    assert!(
        max_substep > 0.0 && max_substep.is_finite(),
        "max_substep must be positive and finite"
    );
    if total_dt <= 0.0 {
        return;
    }

    let mut left = total_dt;
    while left > 0.0 {
        let h = max_substep.min(left);
        rk4_step(y, h, f);
        after(y, h);
        left -= h;
    }
}
