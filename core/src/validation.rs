//! Field checks shared by the model input types.
//!
//! Every check names the offending field so callers can point the user
//! at the exact input that was rejected.

use crate::{
    error::{EstimateError, EstimateResult},
    types::{Months, MAX_MONTHS},
};

/// A probability-like share in [0, 1].
pub(crate) fn fraction(field: &'static str, value: f64) -> EstimateResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EstimateError::invalid(field, format!("{value} is not in [0, 1]")))
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> EstimateResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EstimateError::invalid(field, format!("{value} must be a finite value >= 0")))
    }
}

pub(crate) fn within(field: &'static str, value: f64, min: f64, max: f64) -> EstimateResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(EstimateError::invalid(field, format!("{value} is not in [{min}, {max}]")))
    }
}

pub(crate) fn horizon(months: Months) -> EstimateResult<()> {
    if (1..=MAX_MONTHS).contains(&months) {
        Ok(())
    } else {
        Err(EstimateError::invalid(
            "months",
            format!("{months} is not in 1..={MAX_MONTHS}"),
        ))
    }
}
