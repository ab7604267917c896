//! DonationModel trait.
//!
//! RULE: Every donation channel implements DonationModel.
//! The Monte Carlo runner perturbs each included model with
//! that model's own RNG stream, then projects it and sums net.

use crate::{
    error::EstimateResult,
    projection::Projection,
    rng::{ModelRng, ModelSlot},
    types::{Metric, Months},
};

/// The contract every donation channel must fulfill.
pub trait DonationModel {
    /// Unique stable name for this model.
    fn name(&self) -> &'static str;

    /// RNG slot the Monte Carlo runner draws this model's noise from.
    fn slot(&self) -> ModelSlot;

    /// Reject inputs outside their declared ranges.
    fn validate(&self) -> EstimateResult<()>;

    /// Deterministic monthly projection over `months`.
    fn project(&self, months: Months) -> EstimateResult<Projection>;

    /// A copy of these inputs with the uncertain parameters redrawn.
    fn perturbed(&self, rng: &mut ModelRng) -> EstimateResult<Self>
    where
        Self: Sized;

    /// One Monte Carlo draw: perturb, project, and sum net.
    fn sample_net(&self, months: Months, rng: &mut ModelRng) -> EstimateResult<f64>
    where
        Self: Sized,
    {
        let projection = self.perturbed(rng)?.project(months)?;
        Ok(projection.total(Metric::Net))
    }
}

/// Beta draw centred on `rate`, with shapes floored at 1.
pub(crate) fn perturb_rate(rng: &mut ModelRng, rate: f64) -> EstimateResult<f64> {
    let alpha = (rate * 100.0).max(1.0);
    let beta = ((1.0 - rate) * 100.0).max(1.0);
    Ok(rng.beta(alpha, beta)?.clamp(0.0, 1.0))
}

/// Net of a donation stream after percentage and per-donation fees.
pub(crate) fn net_of_fees(gross: f64, donors: f64, fee_rate: f64, fee_fixed: f64) -> f64 {
    gross * (1.0 - fee_rate) - fee_fixed * donors
}
