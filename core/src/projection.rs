//! Projection tables: the typed rows both models emit, plus the
//! aggregations the dashboard builds its funnels and bar charts from.
//!
//! A table is append-only while a model fills it and read-only after.
//! Totals are always taken over `Dimension::All` rows; the operator and
//! channel rows split the same money and would double count it.

use crate::types::{Dimension, Metric};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// 1-based month within the horizon. 0 marks a whole-horizon row.
    pub month: u32,
    pub year: u32,
    pub dimension: Dimension,
    pub metric: Metric,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    rows: Vec<ProjectionRow>,
}

impl Projection {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(
        &mut self,
        month: u32,
        year: u32,
        dimension: Dimension,
        metric: Metric,
        value: f64,
    ) {
        self.rows.push(ProjectionRow {
            month,
            year,
            dimension,
            metric,
            value,
        });
    }

    pub fn rows(&self) -> &[ProjectionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of a metric over the monthly time series.
    pub fn total(&self, metric: Metric) -> f64 {
        self.rows
            .iter()
            .filter(|r| r.metric == metric && r.dimension == Dimension::All)
            .map(|r| r.value)
            .sum()
    }

    /// (month, value) pairs of the monthly time series for one metric.
    pub fn monthly(&self, metric: Metric) -> Vec<(u32, f64)> {
        self.rows
            .iter()
            .filter(|r| r.metric == metric && r.dimension == Dimension::All)
            .map(|r| (r.month, r.value))
            .collect()
    }

    /// Whole-horizon totals for each requested metric, in the order given.
    pub fn funnel(&self, metrics: &[Metric]) -> Vec<(Metric, f64)> {
        metrics.iter().map(|m| (*m, self.total(*m))).collect()
    }

    /// Per-dimension sums of the split rows (operators or channels),
    /// in first-seen order.
    pub fn dimension_totals(&self, metric: Metric) -> Vec<(Dimension, f64)> {
        let mut totals: Vec<(Dimension, f64)> = Vec::new();
        for row in self
            .rows
            .iter()
            .filter(|r| r.metric == metric && r.dimension != Dimension::All)
        {
            match totals.iter_mut().find(|(d, _)| *d == row.dimension) {
                Some((_, sum)) => *sum += row.value,
                None => totals.push((row.dimension, row.value)),
            }
        }
        totals
    }

    fn has_metric(&self, metric: Metric) -> bool {
        self.rows.iter().any(|r| r.metric == metric)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initiative {
    Rail,
    Retail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub initiative: Initiative,
    pub metric: Metric,
    pub value: f64,
}

/// Per (initiative, metric) totals for a rail and a retail projection.
pub fn scenario_summary(rail: &Projection, retail: &Projection) -> Vec<SummaryRow> {
    [(Initiative::Rail, rail), (Initiative::Retail, retail)]
        .into_iter()
        .flat_map(|(initiative, projection)| {
            Metric::ALL
                .into_iter()
                .filter(move |m| projection.has_metric(*m))
                .map(move |metric| SummaryRow {
                    initiative,
                    metric,
                    value: projection.total(metric),
                })
        })
        .collect()
}
