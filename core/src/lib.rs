//! Micro-donation estimation engine.
//!
//! Deterministic monthly projections for rail-checkout and retail
//! round-up donations, plus a seeded Monte Carlo layer over both.

pub mod advisory;
pub mod config;
pub mod error;
pub mod model;
pub mod monte_carlo;
pub mod overview;
pub mod projection;
pub mod rail_model;
pub mod retail_model;
pub mod rng;
pub mod sample_size;
pub mod types;
mod validation;

pub use error::{EstimateError, EstimateResult};
pub use model::DonationModel;
pub use monte_carlo::run_monte_carlo;
pub use rail_model::compute_rail_monthly;
pub use retail_model::{compute_retail_monthly, simulate_roundup_distribution};
