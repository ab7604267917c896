//! Monte Carlo runner — propagates input uncertainty into total net €.
//!
//! Each iteration redraws the uncertain parameters of every included
//! model, reruns its projection, and records the summed net. The rail
//! and retail models draw from separate RNG streams (see rng.rs), so the
//! rail samples for a seed are the same whether or not retail is included.
//!
//! RULES:
//!   - A model is included only if its flag is set AND its inputs exist.
//!   - Nothing included, or zero iterations, yields an empty sample set.
//!   - Inputs are validated once, before the first iteration.

use crate::{
    error::EstimateResult,
    model::DonationModel,
    rail_model::RailInputs,
    retail_model::RetailInputs,
    rng::RngBank,
    types::{Months, MONTHS_PER_YEAR},
    validation,
};
use serde::{Deserialize, Serialize};

/// Total net € per iteration, in iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSamples {
    pub samples: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSummary {
    pub iterations: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub p5: f64,
    pub p50: f64,
    pub p95: f64,
}

impl MonteCarloSamples {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Percentile `p` in [0, 100], interpolating linearly between ranks.
    pub fn percentile(&self, p: f64) -> Option<f64> {
        let mut sorted = self.samples.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        percentile_of_sorted(&sorted, p)
    }

    pub fn summary(&self) -> Option<MonteCarloSummary> {
        if self.samples.is_empty() {
            return None;
        }
        let mut sorted = self.samples.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        Some(MonteCarloSummary {
            iterations: n,
            mean: sorted.iter().sum::<f64>() / n as f64,
            min: sorted[0],
            max: sorted[n - 1],
            p5: percentile_of_sorted(&sorted, 5.0)?,
            p50: percentile_of_sorted(&sorted, 50.0)?,
            p95: percentile_of_sorted(&sorted, 95.0)?,
        })
    }
}

fn percentile_of_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Run `iterations` perturbed projections and collect total net per run.
pub fn run_monte_carlo(
    rail_inputs: Option<&RailInputs>,
    retail_inputs: Option<&RetailInputs>,
    months: Months,
    iterations: usize,
    seed: u64,
    include_rail: bool,
    include_retail: bool,
) -> EstimateResult<MonteCarloSamples> {
    let rail = rail_inputs.filter(|_| include_rail);
    let retail = retail_inputs.filter(|_| include_retail);

    if rail.is_none() && retail.is_none() {
        log::debug!("monte_carlo: no model included, returning empty sample set");
        return Ok(MonteCarloSamples::default());
    }

    validation::horizon(months)?;
    if let Some(inputs) = rail {
        inputs.validate()?;
    }
    if let Some(inputs) = retail {
        inputs.validate()?;
        if months as usize != MONTHS_PER_YEAR {
            log::warn!(
                "monte_carlo: retail projection is fixed at {MONTHS_PER_YEAR} months; \
                 horizon of {months} months applies to rail only"
            );
        }
    }

    let bank = RngBank::new(seed);
    let mut rail_rng = rail.map(|inputs| bank.for_model(inputs.slot()));
    let mut retail_rng = retail.map(|inputs| bank.for_model(inputs.slot()));

    let mut samples = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let mut total_net = 0.0;
        if let (Some(inputs), Some(rng)) = (rail, rail_rng.as_mut()) {
            total_net += inputs.sample_net(months, rng)?;
        }
        if let (Some(inputs), Some(rng)) = (retail, retail_rng.as_mut()) {
            total_net += inputs.sample_net(months, rng)?;
        }
        samples.push(total_net);
    }

    let models: Vec<&str> = rail
        .map(|inputs| inputs.name())
        .into_iter()
        .chain(retail.map(|inputs| inputs.name()))
        .collect();
    log::info!(
        "monte_carlo: seed={seed} iterations={iterations} months={months} models={}",
        models.join("+")
    );

    Ok(MonteCarloSamples { samples })
}
