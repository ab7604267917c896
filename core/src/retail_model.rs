//! Retail model — round-up donations at grocery point of sale.
//!
//! Annual transactions come from one of two estimates:
//!   - top-down: household grocery spend divided by the average receipt
//!   - direct:   receipts per store per day × stores × active days
//!
//! Each opted-in transaction donates the expected round-up (triangular
//! mean scaled by charm-pricing prevalence). Annual totals are spread
//! evenly over twelve months.

use crate::{
    error::{EstimateError, EstimateResult},
    model::{net_of_fees, perturb_rate, DonationModel},
    projection::Projection,
    rng::{self, ModelRng, ModelSlot, RngBank},
    types::{Dimension, Metric, Months, Processor, MONTHS_PER_YEAR},
    validation,
};
use serde::{Deserialize, Serialize};

/// Floor applied to the average receipt before dividing by it.
pub const MIN_AVG_RECEIPT: f64 = 0.01;

const NOISE_STD_DEV: f64 = 0.05;
const CHARM_PREVALENCE_CLIP: (f64, f64) = (0.6, 0.9);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetailMethod {
    #[default]
    TopDown,
    Direct,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetailInputs {
    pub method: RetailMethod,
    // Top-down
    pub monthly_spend: f64,
    pub grocery_share: f64,
    pub avg_receipt: f64,
    pub households: u64,
    // Direct
    pub daily_receipts: u64,
    pub stores: u64,
    pub active_days: u32,
    /// Share of prices ending just below a whole euro.
    pub charm_prevalence: f64,
    pub optin: f64,
    pub fee_rate: f64,
    pub fee_fixed: f64,
    pub processor: Processor,
    pub triangular_min: f64,
    pub triangular_mode: f64,
    pub triangular_max: f64,
    /// Share of net attributed to the online (card/contactless) channel.
    pub payment_card_share: f64,
}

impl Default for RetailInputs {
    fn default() -> Self {
        Self {
            method: RetailMethod::TopDown,
            monthly_spend: 2738.0,
            grocery_share: 0.18,
            avg_receipt: 25.12,
            households: 1_000_000,
            daily_receipts: 500,
            stores: 100,
            active_days: 360,
            charm_prevalence: 0.80,
            optin: 0.05,
            fee_rate: 0.0,
            fee_fixed: 0.0,
            processor: Processor::AdyenGiving,
            triangular_min: 0.01,
            triangular_mode: 0.50,
            triangular_max: 0.99,
            payment_card_share: 0.7,
        }
    }
}

impl RetailInputs {
    /// Annual transaction count under the configured method.
    pub fn transactions(&self) -> u64 {
        match self.method {
            RetailMethod::TopDown => {
                let annual_grocery = self.households as f64
                    * self.monthly_spend
                    * MONTHS_PER_YEAR as f64
                    * self.grocery_share;
                // `as` truncates toward zero and saturates.
                (annual_grocery / self.avg_receipt.max(MIN_AVG_RECEIPT)) as u64
            }
            RetailMethod::Direct => self
                .daily_receipts
                .saturating_mul(self.stores)
                .saturating_mul(u64::from(self.active_days)),
        }
    }

    /// Expected € donated by one opted-in transaction.
    pub fn expected_roundup(&self) -> f64 {
        let tri_mean = (self.triangular_min + self.triangular_mode + self.triangular_max) / 3.0;
        tri_mean * self.charm_prevalence
    }
}

impl DonationModel for RetailInputs {
    fn name(&self) -> &'static str {
        "retail"
    }

    fn slot(&self) -> ModelSlot {
        ModelSlot::Retail
    }

    fn validate(&self) -> EstimateResult<()> {
        validation::non_negative("monthly_spend", self.monthly_spend)?;
        validation::fraction("grocery_share", self.grocery_share)?;
        validation::non_negative("avg_receipt", self.avg_receipt)?;
        if !(1..=366).contains(&self.active_days) {
            return Err(EstimateError::invalid(
                "active_days",
                format!("{} is not in 1..=366", self.active_days),
            ));
        }
        validation::fraction("charm_prevalence", self.charm_prevalence)?;
        validation::fraction("optin", self.optin)?;
        validation::fraction("fee_rate", self.fee_rate)?;
        validation::non_negative("fee_fixed", self.fee_fixed)?;
        validation::fraction("payment_card_share", self.payment_card_share)?;

        validation::non_negative("triangular_min", self.triangular_min)?;
        validation::non_negative("triangular_max", self.triangular_max)?;
        if self.triangular_min > self.triangular_max {
            return Err(EstimateError::invalid(
                "triangular_max",
                format!(
                    "{} is below triangular_min {}",
                    self.triangular_max, self.triangular_min
                ),
            ));
        }
        validation::within(
            "triangular_mode",
            self.triangular_mode,
            self.triangular_min,
            self.triangular_max,
        )
    }

    /// Always twelve months; `months` does not change the retail horizon.
    fn project(&self, _months: Months) -> EstimateResult<Projection> {
        compute_retail_monthly(self)
    }

    fn perturbed(&self, rng: &mut ModelRng) -> EstimateResult<Self> {
        let optin = perturb_rate(rng, self.optin)?;
        let charm_prevalence = rng
            .normal(self.charm_prevalence, NOISE_STD_DEV)?
            .clamp(CHARM_PREVALENCE_CLIP.0, CHARM_PREVALENCE_CLIP.1);

        Ok(Self {
            optin,
            charm_prevalence,
            ..self.clone()
        })
    }
}

/// Project retail round-up donations over a fixed twelve-month year.
///
/// Per month: transactions, donors, gross and net for `all`, then net
/// split into `online` and `in_store` by the card-payment share.
pub fn compute_retail_monthly(inputs: &RetailInputs) -> EstimateResult<Projection> {
    inputs.validate()?;

    let transactions = inputs.transactions() as f64;
    let expected_round = inputs.expected_roundup();
    let donors = transactions * inputs.optin;
    let gross = donors * expected_round;
    let net = net_of_fees(gross, donors, inputs.fee_rate, inputs.fee_fixed);

    let online_share = inputs.payment_card_share;
    let in_store_share = 1.0 - online_share;
    let per_month = MONTHS_PER_YEAR as f64;

    let mut projection = Projection::with_capacity(6 * MONTHS_PER_YEAR);
    for index in 0..MONTHS_PER_YEAR {
        let month = index as u32 + 1;
        for (dimension, metric, value) in [
            (Dimension::All, Metric::Transactions, transactions / per_month),
            (Dimension::All, Metric::Donors, donors / per_month),
            (Dimension::All, Metric::Gross, gross / per_month),
            (Dimension::All, Metric::Net, net / per_month),
            (Dimension::Online, Metric::Net, net / per_month * online_share),
            (Dimension::InStore, Metric::Net, net / per_month * in_store_share),
        ] {
            projection.push(month, 1, dimension, metric, value);
        }
    }

    log::debug!(
        "retail: method={:?} transactions={transactions:.0} expected_round={expected_round:.4} net={net:.2}",
        inputs.method
    );

    Ok(projection)
}

/// Draw `n` per-transaction round-ups for a histogram of donation sizes.
///
/// Illustrative only: the monthly projection uses the distribution mean.
pub fn simulate_roundup_distribution(
    inputs: &RetailInputs,
    n: usize,
    seed: u64,
) -> EstimateResult<Vec<f64>> {
    inputs.validate()?;

    let dist = rng::triangular(
        inputs.triangular_min,
        inputs.triangular_mode,
        inputs.triangular_max,
    )?;
    let mut rng = RngBank::new(seed).for_model(ModelSlot::RoundUp);

    Ok((0..n)
        .map(|_| rng.sample(&dist) * inputs.charm_prevalence)
        .collect())
}
