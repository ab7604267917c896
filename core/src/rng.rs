//! Deterministic random number generation.
//!
//! RULE: Nothing in the engine may call any platform RNG.
//! All randomness flows through ModelRng instances derived
//! from a single master seed supplied by the caller.
//!
//! Each model gets its own RNG stream, seeded deterministically
//! from (master_seed XOR slot_index). This means:
//!   - Including or excluding one model never shifts another model's draws.
//!   - Each model's stream is fully reproducible in isolation.

use crate::error::{EstimateError, EstimateResult};
use rand::SeedableRng;
use rand_distr::{Beta, Distribution, Normal, Triangular};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single model.
pub struct ModelRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl ModelRng {
    /// Create a model RNG from the master seed and a stable
    /// slot index. The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Draw one value from an already-built distribution.
    pub fn sample<D: Distribution<f64>>(&mut self, dist: &D) -> f64 {
        dist.sample(&mut self.inner)
    }

    /// Sample Beta(alpha, beta).
    pub fn beta(&mut self, alpha: f64, beta: f64) -> EstimateResult<f64> {
        let dist = Beta::new(alpha, beta)
            .map_err(|e| EstimateError::Distribution(format!("beta({alpha}, {beta}): {e}")))?;
        Ok(self.sample(&dist))
    }

    /// Sample N(mean, std_dev).
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> EstimateResult<f64> {
        Ok(self.sample(&normal(mean, std_dev)?))
    }

    /// Sample triangular(min, mode, max).
    pub fn triangular(&mut self, min: f64, mode: f64, max: f64) -> EstimateResult<f64> {
        Ok(self.sample(&triangular(min, mode, max)?))
    }
}

/// N(mean, std_dev) with a non-negative `std_dev`.
pub fn normal(mean: f64, std_dev: f64) -> EstimateResult<Normal<f64>> {
    if std_dev < 0.0 {
        return Err(EstimateError::Distribution(format!(
            "normal({mean}, {std_dev}): std_dev must be non-negative"
        )));
    }
    Normal::new(mean, std_dev)
        .map_err(|e| EstimateError::Distribution(format!("normal({mean}, {std_dev}): {e}")))
}

pub fn triangular(min: f64, mode: f64, max: f64) -> EstimateResult<Triangular<f64>> {
    Triangular::new(min, max, mode).map_err(|e| {
        EstimateError::Distribution(format!("triangular({min}, {mode}, {max}): {e}"))
    })
}

/// All model RNGs for a single computation, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_model(&self, slot: ModelSlot) -> ModelRng {
        ModelRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every model's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum ModelSlot {
    Rail = 0,
    Retail = 1,
    RoundUp = 2,
}

impl ModelSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rail => "rail",
            Self::Retail => "retail",
            Self::RoundUp => "round_up",
        }
    }
}
