//! A/B test sizing for opt-in experiments.
//!
//! Per-arm sample size needed to tell two opt-in proportions apart
//! with a two-sided, two-sample z-test and equal arm sizes.

use crate::error::{EstimateError, EstimateResult};
use crate::validation;
use statrs::distribution::{ContinuousCDF, Normal};

const BISECTION_STEPS: usize = 200;

/// Required observations per arm to detect `p1` vs `p2`.
///
/// Returns `f64::INFINITY` when the proportions are equal or both
/// degenerate (0 or 1), since no sample size can separate them.
pub fn sample_size_two_proportions(
    p1: f64,
    p2: f64,
    alpha: f64,
    power: f64,
) -> EstimateResult<f64> {
    validation::fraction("p1", p1)?;
    validation::fraction("p2", p2)?;
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(EstimateError::invalid("alpha", format!("{alpha} is not in (0, 1)")));
    }
    if !(power > alpha && power < 1.0) {
        return Err(EstimateError::invalid(
            "power",
            format!("{power} is not in ({alpha}, 1)"),
        ));
    }

    let effect = (p2 - p1).abs();
    if effect <= 0.0 {
        return Ok(f64::INFINITY);
    }
    let pooled = (p1 * (1.0 - p1) + p2 * (1.0 - p2)).sqrt();
    if pooled == 0.0 {
        return Ok(f64::INFINITY);
    }
    let standardized = effect / pooled;

    let std_normal =
        Normal::new(0.0, 1.0).map_err(|e| EstimateError::Distribution(e.to_string()))?;
    let crit = std_normal.inverse_cdf(1.0 - alpha / 2.0);

    // Equal arms: the test statistic scales with sqrt(n / 2).
    let achieved = |n: f64| {
        let shift = standardized * (n / 2.0).sqrt();
        (1.0 - std_normal.cdf(crit - shift)) + std_normal.cdf(-crit - shift)
    };

    // One-tailed approximation overshoots the two-tailed root slightly.
    let z_power = std_normal.inverse_cdf(power);
    let mut hi = 2.0 * ((crit + z_power) / standardized).powi(2);
    let mut lo = 0.0;
    while achieved(hi) < power {
        lo = hi;
        hi *= 2.0;
    }
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if achieved(mid) < power {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= 1e-9 * hi {
            break;
        }
    }

    Ok(hi)
}
