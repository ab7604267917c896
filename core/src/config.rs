//! Assumption set behind the default scenario.
//!
//! Percentages are stored the way the dashboard edits them (0–100) and
//! converted to fractions when building model inputs. The organisation
//! baseline is only used for the overview share.

use crate::{
    rail_model::{AskType, RailInputs},
    retail_model::{RetailInputs, RetailMethod},
    types::{Processor, MONTHS_PER_YEAR},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    pub organisation: OrganisationAssumptions,
    pub rail: RailAssumptions,
    pub retail: RetailAssumptions,
    pub fees: FeeAssumptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganisationAssumptions {
    /// Annual fundraising the projections are compared against, in €.
    pub fundraising_baseline_eur: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailAssumptions {
    pub trenitalia_riders: u64,
    pub italo_riders: u64,
    pub digital_share_pct: f64,
    pub eligible_share_pct: f64,
    pub ask_type: AskType,
    pub choice_share_eur1_pct: f64,
    pub optin_web_1_pct: f64,
    pub optin_web_2_pct: f64,
    pub optin_pos_pct: f64,
    pub seasonality: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetailAssumptions {
    pub monthly_spend_2023: f64,
    pub monthly_spend_2024: f64,
    pub grocery_share_pct: f64,
    pub avg_receipt_eur: f64,
    pub households: u64,
    pub optin_pct: f64,
    pub charm_prevalence_pct: f64,
    pub payment_card_share_pct: f64,
    pub daily_receipts: u64,
    pub stores: u64,
    pub active_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeAssumptions {
    pub processor: Processor,
    pub rate_pct: f64,
    pub fixed_eur: f64,
}

impl FeeAssumptions {
    /// (rate, fixed €) actually charged by the configured processor.
    pub fn effective(&self) -> (f64, f64) {
        if self.processor.covers_fees() {
            (0.0, 0.0)
        } else {
            (self.rate_pct / 100.0, self.fixed_eur)
        }
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            organisation: OrganisationAssumptions {
                fundraising_baseline_eur: 79_900_000.0,
            },
            rail: RailAssumptions {
                trenitalia_riders: 470_000_000,
                italo_riders: 22_000_000,
                digital_share_pct: 65.0,
                eligible_share_pct: 90.0,
                ask_type: AskType::FixedEur1,
                choice_share_eur1_pct: 70.0,
                optin_web_1_pct: 4.0,
                optin_web_2_pct: 2.0,
                optin_pos_pct: 2.0,
                seasonality: vec![1.0; MONTHS_PER_YEAR],
            },
            retail: RetailAssumptions {
                monthly_spend_2023: 2738.0,
                monthly_spend_2024: 2755.0,
                grocery_share_pct: 18.0,
                avg_receipt_eur: 25.12,
                households: 1_000_000,
                optin_pct: 5.0,
                charm_prevalence_pct: 80.0,
                payment_card_share_pct: 70.0,
                daily_receipts: 500,
                stores: 100,
                active_days: 360,
            },
            fees: FeeAssumptions {
                processor: Processor::AdyenGiving,
                rate_pct: 1.4,
                fixed_eur: 0.10,
            },
        }
    }
}

impl Assumptions {
    /// Load from a JSON file.
    /// In tests, use Assumptions::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let assumptions: Assumptions = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        log::debug!("Loaded assumptions from {path}");
        Ok(assumptions)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn rail_inputs(&self) -> RailInputs {
        let rail = &self.rail;
        let (fee_rate, fee_fixed) = self.fees.effective();
        RailInputs {
            trenitalia_riders: rail.trenitalia_riders,
            italo_riders: rail.italo_riders,
            digital_share: rail.digital_share_pct / 100.0,
            eligible_share: rail.eligible_share_pct / 100.0,
            ask_type: rail.ask_type,
            choice_share_eur1: rail.choice_share_eur1_pct / 100.0,
            optin_web_1: rail.optin_web_1_pct / 100.0,
            optin_web_2: rail.optin_web_2_pct / 100.0,
            optin_pos: rail.optin_pos_pct / 100.0,
            seasonality: rail.seasonality.clone(),
            fee_rate,
            fee_fixed,
            processor: self.fees.processor,
        }
    }

    /// Retail inputs using the 2023 household spend survey.
    pub fn retail_inputs(&self, method: RetailMethod) -> RetailInputs {
        let retail = &self.retail;
        let (fee_rate, fee_fixed) = self.fees.effective();
        RetailInputs {
            method,
            monthly_spend: retail.monthly_spend_2023,
            grocery_share: retail.grocery_share_pct / 100.0,
            avg_receipt: retail.avg_receipt_eur,
            households: retail.households,
            daily_receipts: retail.daily_receipts,
            stores: retail.stores,
            active_days: retail.active_days,
            charm_prevalence: retail.charm_prevalence_pct / 100.0,
            optin: retail.optin_pct / 100.0,
            fee_rate,
            fee_fixed,
            processor: self.fees.processor,
            ..RetailInputs::default()
        }
    }
}
