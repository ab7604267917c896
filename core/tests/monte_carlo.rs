//! Monte Carlo tests — inclusion rules, spread, and component additivity.

use microdonation_core::{
    compute_rail_monthly, compute_retail_monthly,
    rail_model::RailInputs,
    retail_model::RetailInputs,
    run_monte_carlo,
    types::Metric,
};

/// Route the runner's `log` output through the test harness (`RUST_LOG=debug`).
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn zero_iterations_return_empty_samples() {
    init_logging();
    let rail = RailInputs::default();
    let retail = RetailInputs::default();
    let result = run_monte_carlo(Some(&rail), Some(&retail), 12, 0, 1, true, true).unwrap();
    assert!(result.is_empty());
}

#[test]
fn nothing_included_returns_empty_samples() {
    init_logging();
    let rail = RailInputs::default();
    let retail = RetailInputs::default();

    let excluded = run_monte_carlo(Some(&rail), Some(&retail), 12, 100, 1, false, false).unwrap();
    assert!(excluded.is_empty());

    let absent = run_monte_carlo(None, None, 12, 100, 1, true, true).unwrap();
    assert!(absent.is_empty());
}

#[test]
fn absent_inputs_are_skipped_not_an_error() {
    init_logging();
    let retail = RetailInputs::default();
    let result = run_monte_carlo(None, Some(&retail), 12, 50, 9, true, true).unwrap();
    assert_eq!(result.len(), 50);
}

#[test]
fn one_sample_per_iteration() {
    init_logging();
    let rail = RailInputs::default();
    let result = run_monte_carlo(Some(&rail), None, 12, 250, 3, true, false).unwrap();
    assert_eq!(result.len(), 250);
    assert!(result.samples.iter().all(|x| x.is_finite() && *x > 0.0));
}

/// Rail and retail draw from separate streams, so the combined run is
/// exactly the sum of the single-component runs.
#[test]
fn combined_run_is_sum_of_component_runs() {
    init_logging();
    let rail = RailInputs::default();
    let retail = RetailInputs::default();

    let rail_only = run_monte_carlo(Some(&rail), Some(&retail), 12, 200, 77, true, false).unwrap();
    let retail_only = run_monte_carlo(Some(&rail), Some(&retail), 12, 200, 77, false, true).unwrap();
    let combined = run_monte_carlo(Some(&rail), Some(&retail), 12, 200, 77, true, true).unwrap();

    for i in 0..200 {
        let expected = rail_only.samples[i] + retail_only.samples[i];
        assert_eq!(
            combined.samples[i].to_bits(),
            expected.to_bits(),
            "iteration {i}: combined {} != {expected}",
            combined.samples[i]
        );
    }
}

/// The sampled distribution should straddle the deterministic projection.
#[test]
fn samples_spread_around_deterministic_net() {
    init_logging();
    let rail = RailInputs::default();
    let deterministic = compute_rail_monthly(&rail, 12).unwrap().total(Metric::Net);

    let result = run_monte_carlo(Some(&rail), None, 12, 2_000, 123, true, false).unwrap();
    let summary = result.summary().unwrap();

    assert!(summary.p5 < deterministic && deterministic < summary.p95,
        "deterministic net {deterministic} outside [{}, {}]", summary.p5, summary.p95);
    assert!(summary.min < summary.max, "perturbation produced no spread");
}

#[test]
fn retail_charm_noise_stays_within_clip() {
    init_logging();
    let retail = RetailInputs {
        optin: 0.05,
        ..RetailInputs::default()
    };
    let base = compute_retail_monthly(&retail).unwrap();
    let tx = base.total(Metric::Transactions);
    let tri_mean = (0.01 + 0.50 + 0.99) / 3.0;

    let result = run_monte_carlo(None, Some(&retail), 12, 500, 5, false, true).unwrap();
    // net = tx × optin × tri_mean × prevalence, prevalence ∈ [0.6, 0.9], optin ∈ [0, 1]
    let ceiling = tx * tri_mean * 0.9 * (1.0 + 1e-9);
    assert!(result.samples.iter().all(|x| *x >= 0.0 && *x <= ceiling));
}

#[test]
fn invalid_inputs_fail_before_sampling() {
    init_logging();
    let rail = RailInputs {
        seasonality: vec![1.0; 5],
        ..RailInputs::default()
    };
    assert!(run_monte_carlo(Some(&rail), None, 12, 10, 1, true, false).is_err());

    // Excluded inputs are never validated.
    assert!(run_monte_carlo(Some(&rail), None, 12, 10, 1, false, false)
        .unwrap()
        .is_empty());
}

#[test]
fn rail_horizon_is_validated() {
    init_logging();
    let rail = RailInputs::default();
    assert!(run_monte_carlo(Some(&rail), None, 0, 10, 1, true, false).is_err());
}
