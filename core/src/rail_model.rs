//! Rail model — donation prompts at rail-ticket checkout.
//!
//! Funnel per month:
//!   riders → eligible (prompt shown) → exposed on digital channels
//!          → donors (opt-in) → gross € → net € after processor fees
//!
//! Riders are spread over the horizon by the seasonality weights.
//! Two whole-horizon rows split net between the operators by rider share.

use crate::{
    error::{EstimateError, EstimateResult},
    model::{net_of_fees, perturb_rate, DonationModel},
    projection::Projection,
    rng::{ModelRng, ModelSlot},
    types::{Dimension, Metric, Months, Processor, MONTHS_PER_YEAR},
    validation,
};
use serde::{Deserialize, Serialize};

pub const SEASONALITY_MIN: f64 = 0.1;
pub const SEASONALITY_MAX: f64 = 2.0;

/// Below this average ask the €1 opt-in rate applies as-is.
const EUR1_THRESHOLD: f64 = 1.05;
/// Above this average ask the €2 opt-in rate applies as-is.
const EUR2_THRESHOLD: f64 = 1.95;

// Monte Carlo noise.
const NOISE_STD_DEV: f64 = 0.05;
const SEASONALITY_CLIP: (f64, f64) = (0.7, 1.3);
const DIGITAL_SHARE_CLIP: (f64, f64) = (0.1, 0.99);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AskType {
    #[default]
    FixedEur1,
    FixedEur2,
    /// The rider picks €1 or €2.
    Choice,
}

impl AskType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FixedEur1 => "€1 fixed",
            Self::FixedEur2 => "€2 fixed",
            Self::Choice => "€1 or €2 choice",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RailInputs {
    pub trenitalia_riders: u64,
    pub italo_riders: u64,
    pub digital_share: f64,
    pub eligible_share: f64,
    pub ask_type: AskType,
    /// Share of riders picking €1 when offered a choice.
    pub choice_share_eur1: f64,
    pub optin_web_1: f64,
    pub optin_web_2: f64,
    pub optin_pos: f64,
    /// Twelve monthly multipliers, January first.
    pub seasonality: Vec<f64>,
    pub fee_rate: f64,
    pub fee_fixed: f64,
    pub processor: Processor,
}

impl Default for RailInputs {
    fn default() -> Self {
        Self {
            trenitalia_riders: 470_000_000,
            italo_riders: 22_000_000,
            digital_share: 0.65,
            eligible_share: 0.90,
            ask_type: AskType::FixedEur1,
            choice_share_eur1: 0.7,
            optin_web_1: 0.04,
            optin_web_2: 0.02,
            optin_pos: 0.015,
            seasonality: vec![1.0; MONTHS_PER_YEAR],
            fee_rate: 0.0,
            fee_fixed: 0.0,
            processor: Processor::AdyenGiving,
        }
    }
}

impl RailInputs {
    pub fn total_riders(&self) -> u64 {
        self.trenitalia_riders.saturating_add(self.italo_riders)
    }

    /// Expected € per donor for the configured ask.
    pub fn avg_donation(&self) -> f64 {
        match self.ask_type {
            AskType::FixedEur1 => 1.0,
            AskType::FixedEur2 => 2.0,
            AskType::Choice => {
                self.choice_share_eur1 * 1.0 + (1.0 - self.choice_share_eur1) * 2.0
            }
        }
    }

    /// Opt-in rate matching the average ask, blending the €1 and €2
    /// rates by how close the ask sits to each.
    pub fn effective_optin(&self) -> f64 {
        let avg = self.avg_donation();
        if avg <= EUR1_THRESHOLD {
            self.optin_web_1
        } else if avg >= EUR2_THRESHOLD {
            self.optin_web_2
        } else {
            let w1 = 2.0 - avg;
            let w2 = avg - 1.0;
            self.optin_web_1 * w1 + self.optin_web_2 * w2
        }
    }

    /// Share of the horizon's riders travelling in each month.
    ///
    /// Short horizons renormalize the first `months` weights so the
    /// horizon still carries the full rider count. Horizons past a year
    /// repeat the annual weights, one full rider count per year.
    pub fn seasonality_weights(&self, months: Months) -> Vec<f64> {
        let months = months as usize;
        let annual_sum: f64 = self.seasonality.iter().sum();
        let annual: Vec<f64> = self.seasonality.iter().map(|w| w / annual_sum).collect();

        if months < MONTHS_PER_YEAR {
            let head = &annual[..months];
            let head_sum: f64 = head.iter().sum();
            head.iter().map(|w| w / head_sum).collect()
        } else {
            (0..months).map(|m| annual[m % MONTHS_PER_YEAR]).collect()
        }
    }
}

impl DonationModel for RailInputs {
    fn name(&self) -> &'static str {
        "rail"
    }

    fn slot(&self) -> ModelSlot {
        ModelSlot::Rail
    }

    fn validate(&self) -> EstimateResult<()> {
        validation::fraction("digital_share", self.digital_share)?;
        validation::fraction("eligible_share", self.eligible_share)?;
        validation::fraction("choice_share_eur1", self.choice_share_eur1)?;
        validation::fraction("optin_web_1", self.optin_web_1)?;
        validation::fraction("optin_web_2", self.optin_web_2)?;
        validation::fraction("optin_pos", self.optin_pos)?;
        validation::fraction("fee_rate", self.fee_rate)?;
        validation::non_negative("fee_fixed", self.fee_fixed)?;

        if self.seasonality.len() != MONTHS_PER_YEAR {
            return Err(EstimateError::invalid(
                "seasonality",
                format!(
                    "expected {MONTHS_PER_YEAR} monthly weights, got {}",
                    self.seasonality.len()
                ),
            ));
        }
        for weight in &self.seasonality {
            validation::within("seasonality", *weight, SEASONALITY_MIN, SEASONALITY_MAX)?;
        }
        Ok(())
    }

    fn project(&self, months: Months) -> EstimateResult<Projection> {
        compute_rail_monthly(self, months)
    }

    fn perturbed(&self, rng: &mut ModelRng) -> EstimateResult<Self> {
        let optin_web_1 = perturb_rate(rng, self.optin_web_1)?;
        let optin_web_2 = perturb_rate(rng, self.optin_web_2)?;

        let noise = crate::rng::normal(0.0, NOISE_STD_DEV)?;
        let seasonality = self
            .seasonality
            .iter()
            .map(|w| (w + rng.sample(&noise)).clamp(SEASONALITY_CLIP.0, SEASONALITY_CLIP.1))
            .collect();

        let digital_share = rng
            .normal(self.digital_share, NOISE_STD_DEV)?
            .clamp(DIGITAL_SHARE_CLIP.0, DIGITAL_SHARE_CLIP.1);

        Ok(Self {
            optin_web_1,
            optin_web_2,
            seasonality,
            digital_share,
            ..self.clone()
        })
    }
}

/// Project rail donations month by month.
///
/// Emits six rows per month (riders, eligible, exposed_digital, donors,
/// gross, net) followed by one whole-horizon net row per operator.
pub fn compute_rail_monthly(inputs: &RailInputs, months: Months) -> EstimateResult<Projection> {
    inputs.validate()?;
    validation::horizon(months)?;

    let total_riders = inputs.total_riders() as f64;
    let avg_donation = inputs.avg_donation();
    let optin = inputs.effective_optin();
    let weights = inputs.seasonality_weights(months);

    let mut projection = Projection::with_capacity(6 * weights.len() + 2);
    let mut horizon_net = 0.0;

    for (index, weight) in weights.iter().enumerate() {
        let month = index as u32 + 1;
        let year = (index / MONTHS_PER_YEAR) as u32 + 1;

        let riders = total_riders * weight;
        let eligible = riders * inputs.eligible_share;
        let exposed = eligible * inputs.digital_share;
        let donors = exposed * optin;
        let gross = donors * avg_donation;
        let net = net_of_fees(gross, donors, inputs.fee_rate, inputs.fee_fixed);
        horizon_net += net;

        for (metric, value) in [
            (Metric::Riders, riders),
            (Metric::Eligible, eligible),
            (Metric::ExposedDigital, exposed),
            (Metric::Donors, donors),
            (Metric::Gross, gross),
            (Metric::Net, net),
        ] {
            projection.push(month, year, Dimension::All, metric, value);
        }
    }

    let (trenitalia_ratio, italo_ratio) = if total_riders > 0.0 {
        (
            inputs.trenitalia_riders as f64 / total_riders,
            inputs.italo_riders as f64 / total_riders,
        )
    } else {
        (0.0, 0.0)
    };
    projection.push(0, 1, Dimension::Trenitalia, Metric::Net, horizon_net * trenitalia_ratio);
    projection.push(0, 1, Dimension::Italo, Metric::Net, horizon_net * italo_ratio);

    log::debug!(
        "rail: months={months} riders={total_riders:.0} optin={optin:.4} avg_donation={avg_donation:.2} net={horizon_net:.2}"
    );

    Ok(projection)
}
