//! Plausibility advisories on model inputs.
//!
//! Advisories never block a computation. They flag inputs that sit
//! outside published figures or the checkout-giving literature.

use crate::{rail_model::RailInputs, retail_model::RetailInputs};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Italo's published annual ridership is well below this.
pub const ITALO_RIDERS_CEILING: u64 = 40_000_000;
pub const DIGITAL_SHARE_TYPICAL: (f64, f64) = (0.2, 0.95);
pub const RAIL_OPTIN_AGGRESSIVE: f64 = 0.15;
pub const RETAIL_OPTIN_AGGRESSIVE: f64 = 0.12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    ItaloRidersAbovePublicFigures { riders: u64 },
    AtypicalDigitalShare { share: f64 },
    AggressiveOptIn { field: String, rate: f64 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItaloRidersAbovePublicFigures { riders } => write!(
                f,
                "Italo riders {riders} above current public figures; double-check"
            ),
            Self::AtypicalDigitalShare { share } => {
                write!(f, "atypical digital share {:.0}%; verify", share * 100.0)
            }
            Self::AggressiveOptIn { field, rate } => write!(
                f,
                "{field} {:.1}% is aggressive vs literature; run sensitivity",
                rate * 100.0
            ),
        }
    }
}

pub fn rail_advisories(inputs: &RailInputs) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    if inputs.italo_riders > ITALO_RIDERS_CEILING {
        advisories.push(Advisory::ItaloRidersAbovePublicFigures {
            riders: inputs.italo_riders,
        });
    }
    if inputs.digital_share < DIGITAL_SHARE_TYPICAL.0 || inputs.digital_share > DIGITAL_SHARE_TYPICAL.1
    {
        advisories.push(Advisory::AtypicalDigitalShare {
            share: inputs.digital_share,
        });
    }
    for (field, rate) in [
        ("optin_web_1", inputs.optin_web_1),
        ("optin_web_2", inputs.optin_web_2),
        ("optin_pos", inputs.optin_pos),
    ] {
        if rate > RAIL_OPTIN_AGGRESSIVE {
            advisories.push(Advisory::AggressiveOptIn {
                field: field.to_string(),
                rate,
            });
        }
    }

    advisories
}

pub fn retail_advisories(inputs: &RetailInputs) -> Vec<Advisory> {
    if inputs.optin > RETAIL_OPTIN_AGGRESSIVE {
        vec![Advisory::AggressiveOptIn {
            field: "optin".to_string(),
            rate: inputs.optin,
        }]
    } else {
        Vec::new()
    }
}
