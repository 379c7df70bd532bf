//! Fresnel integrals `C(t)` and `S(t)`, used to evaluate Euler spirals
//! (clothoids) in closed form.
//!
//! For `|t| <= 8` a fixed-step Simpson's rule integrates the defining
//! integrand directly (road-network spirals never need arguments anywhere
//! near that large, so this stays well inside the accurate region). Beyond
//! that the leading-order large-argument asymptotic expansion of
//! Abramowitz & Stegun, §7.3.27-28, is used, since both integrals merely
//! oscillate around `0.5` from there on.

use std::f64::consts::PI;

const SWITCH_POINT: f64 = 8.0;

/// `(C(t), S(t))`, the cosine and sine Fresnel integrals evaluated at `t`.
pub fn fresnel(t: f64) -> (f64, f64) {
    if t == 0.0 {
        return (0.0, 0.0);
    }
    let sign = t.signum();
    let t = t.abs();
    let (c, s) = if t <= SWITCH_POINT {
        simpson_integral(t)
    } else {
        asymptotic(t)
    };
    (sign * c, sign * s)
}

fn integrand(u: f64) -> (f64, f64) {
    let arg = PI / 2.0 * u * u;
    (arg.cos(), arg.sin())
}

fn simpson_integral(t: f64) -> (f64, f64) {
    // Step fine enough that the oscillation `pi/2 * u^2` is well sampled
    // even at the top of the integration range.
    let steps = ((t * 64.0).ceil() as usize).max(32);
    let steps = steps + (steps % 2); // Simpson's rule needs an even interval count.
    let h = t / steps as f64;

    let (mut c_sum, mut s_sum) = integrand(0.0);
    let (c_end, s_end) = integrand(t);
    c_sum += c_end;
    s_sum += s_end;

    for i in 1..steps {
        let (c, s) = integrand(i as f64 * h);
        let weight = if i % 2 == 0 { 2.0 } else { 4.0 };
        c_sum += weight * c;
        s_sum += weight * s;
    }
    (c_sum * h / 3.0, s_sum * h / 3.0)
}

fn asymptotic(t: f64) -> (f64, f64) {
    let f = 1.0 / (PI * t);
    let g = 1.0 / (PI * PI * t.powi(3));
    let arg = PI / 2.0 * t * t;
    let c = 0.5 + f * arg.sin() - g * arg.cos();
    let s = 0.5 - f * arg.cos() - g * arg.sin();
    (c, s)
}
