//! Scenario overview — headline totals against the fundraising baseline.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOverview {
    pub rail_net: f64,
    pub retail_net: f64,
    /// Rail + retail, or retail alone when `retail_only` is set.
    pub total_net: f64,
    pub baseline: f64,
    /// `total_net / baseline`; zero when there is no baseline.
    pub share_of_baseline: f64,
    pub retail_only: bool,
}

impl ScenarioOverview {
    pub fn new(rail_net: f64, retail_net: f64, baseline: f64, retail_only: bool) -> Self {
        let total_net = if retail_only {
            retail_net
        } else {
            rail_net + retail_net
        };
        let share_of_baseline = if baseline > 0.0 {
            total_net / baseline
        } else {
            0.0
        };

        Self {
            rail_net,
            retail_net,
            total_net,
            baseline,
            share_of_baseline,
            retail_only,
        }
    }
}
