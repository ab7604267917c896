//! Shared primitive types used across the estimation engine.

use serde::{Deserialize, Serialize};

/// A projection horizon, in months.
pub type Months = u32;

/// Longest horizon the rail model accepts.
pub const MAX_MONTHS: Months = 36;

pub const MONTHS_PER_YEAR: usize = 12;

/// Metric vocabulary shared by the rail and retail projection tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Riders,
    Eligible,
    ExposedDigital,
    Transactions,
    Donors,
    Gross,
    Net,
}

impl Metric {
    /// Every metric, in funnel order.
    pub const ALL: [Metric; 7] = [
        Metric::Riders,
        Metric::Eligible,
        Metric::ExposedDigital,
        Metric::Transactions,
        Metric::Donors,
        Metric::Gross,
        Metric::Net,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Riders => "riders",
            Self::Eligible => "eligible",
            Self::ExposedDigital => "exposed_digital",
            Self::Transactions => "transactions",
            Self::Donors => "donors",
            Self::Gross => "gross",
            Self::Net => "net",
        }
    }
}

/// Which slice of the money a projection row describes.
///
/// `All` rows form the monthly time series. The operator and channel
/// variants re-express part of the same total for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    All,
    Trenitalia,
    Italo,
    Online,
    InStore,
}

impl Dimension {
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Trenitalia => "trenitalia",
            Self::Italo => "italo",
            Self::Online => "online",
            Self::InStore => "in_store",
        }
    }
}

/// Payment processor handling the donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Processor {
    #[default]
    AdyenGiving,
    Stripe,
    Nexi,
}

impl Processor {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AdyenGiving => "Adyen Giving",
            Self::Stripe => "Stripe",
            Self::Nexi => "Nexi",
        }
    }

    /// Adyen Giving waives its fees, so the full donation reaches the charity.
    pub fn covers_fees(&self) -> bool {
        matches!(self, Self::AdyenGiving)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_match_serialized_tags() {
        for metric in Metric::ALL {
            let tag = serde_json::to_string(&metric).unwrap();
            assert_eq!(tag, format!("\"{}\"", metric.name()));
        }
    }

    #[test]
    fn only_adyen_giving_covers_fees() {
        assert_eq!(Processor::default().name(), "Adyen Giving");
        assert!(Processor::AdyenGiving.covers_fees());
        assert!(!Processor::Stripe.covers_fees());
        assert!(!Processor::Nexi.covers_fees());
    }
}
