//! Rail model tests — funnel arithmetic, seasonality, operator split.

use microdonation_core::{
    compute_rail_monthly,
    rail_model::{AskType, RailInputs},
    types::{Dimension, Metric},
    EstimateError,
};

fn base_inputs() -> RailInputs {
    RailInputs {
        trenitalia_riders: 470_000_000,
        italo_riders: 22_000_000,
        digital_share: 0.65,
        eligible_share: 0.90,
        ask_type: AskType::FixedEur1,
        optin_web_1: 0.04,
        optin_web_2: 0.02,
        fee_rate: 0.0,
        fee_fixed: 0.0,
        seasonality: vec![1.0; 12],
        ..RailInputs::default()
    }
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "{what}: expected {expected}, got {actual}"
    );
}

/// Default scenario: donors = riders × eligible × digital × opt-in, net == gross.
#[test]
fn annual_funnel_matches_hand_calculation() {
    let projection = compute_rail_monthly(&base_inputs(), 12).unwrap();

    let expected_donors = 492_000_000.0 * 0.90 * 0.65 * 0.04;
    assert_close(projection.total(Metric::Donors), expected_donors, "donors");
    assert_close(projection.total(Metric::Gross), expected_donors, "gross");
    assert_close(
        projection.total(Metric::Net),
        projection.total(Metric::Gross),
        "net with zero fees",
    );
}

#[test]
fn twelve_month_riders_sum_to_total() {
    let mut inputs = base_inputs();
    inputs.seasonality = vec![0.8, 0.9, 1.0, 1.1, 1.2, 1.5, 1.8, 1.9, 1.2, 1.0, 0.9, 1.4];

    let projection = compute_rail_monthly(&inputs, 12).unwrap();

    assert_close(projection.total(Metric::Riders), 492_000_000.0, "riders");
}

#[test]
fn short_horizon_carries_full_rider_count() {
    let projection = compute_rail_monthly(&base_inputs(), 3).unwrap();
    assert_close(projection.total(Metric::Riders), 492_000_000.0, "riders over 3 months");
}

#[test]
fn two_year_horizon_carries_two_years_of_riders() {
    let projection = compute_rail_monthly(&base_inputs(), 24).unwrap();
    assert_close(projection.total(Metric::Riders), 2.0 * 492_000_000.0, "riders over 24 months");

    let years: Vec<u32> = projection
        .rows()
        .iter()
        .filter(|r| r.dimension == Dimension::All && r.metric == Metric::Riders)
        .map(|r| r.year)
        .collect();
    assert_eq!(years[11], 1);
    assert_eq!(years[12], 2);
}

#[test]
fn row_count_is_six_per_month_plus_operator_split() {
    for months in [1, 6, 12, 36] {
        let projection = compute_rail_monthly(&base_inputs(), months).unwrap();
        assert_eq!(projection.len(), 6 * months as usize + 2, "months={months}");
    }
}

#[test]
fn operator_split_is_proportional_to_riders() {
    let projection = compute_rail_monthly(&base_inputs(), 12).unwrap();
    let net = projection.total(Metric::Net);

    let split = projection.dimension_totals(Metric::Net);
    assert_eq!(split.len(), 2);
    assert_eq!(split[0].0, Dimension::Trenitalia);
    assert_eq!(split[1].0, Dimension::Italo);
    assert_close(split[0].1, net * 470.0 / 492.0, "trenitalia net");
    assert_close(split[1].1, net * 22.0 / 492.0, "italo net");
    assert!(projection
        .rows()
        .iter()
        .filter(|r| r.dimension != Dimension::All)
        .all(|r| r.month == 0));
}

#[test]
fn zero_riders_yield_zero_everywhere() {
    let inputs = RailInputs {
        trenitalia_riders: 0,
        italo_riders: 0,
        ..base_inputs()
    };
    let projection = compute_rail_monthly(&inputs, 12).unwrap();
    assert!(projection.rows().iter().all(|r| r.value == 0.0));
}

#[test]
fn net_is_monotone_in_funnel_rates() {
    let net_for = |inputs: &RailInputs| compute_rail_monthly(inputs, 12).unwrap().total(Metric::Net);
    let steps = [0.0, 0.1, 0.25, 0.5, 0.75, 1.0];

    let setters: [(&str, fn(&mut RailInputs, f64)); 4] = [
        ("eligible_share", |i, v| i.eligible_share = v),
        ("digital_share", |i, v| i.digital_share = v),
        ("optin_web_1", |i, v| i.optin_web_1 = v),
        ("optin_web_2", |i, v| i.optin_web_2 = v),
    ];

    for ask_type in [AskType::FixedEur1, AskType::FixedEur2, AskType::Choice] {
        for (name, set) in setters {
            let mut previous = f64::NEG_INFINITY;
            for value in steps {
                let mut inputs = RailInputs {
                    ask_type,
                    ..base_inputs()
                };
                set(&mut inputs, value);
                let net = net_for(&inputs);
                assert!(
                    net >= previous,
                    "{name}={value} ({ask_type:?}) decreased net: {net} < {previous}"
                );
                previous = net;
            }
        }
    }
}

#[test]
fn fees_reduce_net() {
    let inputs = RailInputs {
        fee_rate: 0.014,
        fee_fixed: 0.10,
        ..base_inputs()
    };
    let projection = compute_rail_monthly(&inputs, 12).unwrap();
    let gross = projection.total(Metric::Gross);
    let donors = projection.total(Metric::Donors);
    assert_close(
        projection.total(Metric::Net),
        gross * (1.0 - 0.014) - 0.10 * donors,
        "net after fees",
    );
}

#[test]
fn seasonality_must_have_twelve_weights() {
    let inputs = RailInputs {
        seasonality: vec![1.0; 11],
        ..base_inputs()
    };
    let err = compute_rail_monthly(&inputs, 12).unwrap_err();
    assert!(
        matches!(err, EstimateError::Validation { field: "seasonality", .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn out_of_range_share_is_rejected_by_name() {
    let inputs = RailInputs {
        digital_share: 1.2,
        ..base_inputs()
    };
    let err = compute_rail_monthly(&inputs, 12).unwrap_err();
    assert!(err.to_string().contains("digital_share"), "unexpected error: {err}");
}

#[test]
fn horizon_outside_one_to_thirty_six_is_rejected() {
    for months in [0, 37] {
        let err = compute_rail_monthly(&base_inputs(), months).unwrap_err();
        assert!(matches!(err, EstimateError::Validation { field: "months", .. }));
    }
}
