//! donation-sim: headless runner for the micro-donation estimation engine.
//!
//! Usage:
//!   donation-sim --months 12 --iterations 2000 --seed 123
//!   donation-sim --assumptions data/assumptions.json --method direct --json
//!   donation-sim --retail-only

use anyhow::{anyhow, Result};
use microdonation_core::{
    advisory::{rail_advisories, retail_advisories},
    compute_rail_monthly, compute_retail_monthly,
    config::Assumptions,
    monte_carlo::MonteCarloSummary,
    overview::ScenarioOverview,
    projection::{scenario_summary, Initiative, SummaryRow},
    retail_model::RetailMethod,
    run_monte_carlo,
    sample_size::sample_size_two_proportions,
    simulate_roundup_distribution,
    types::{Dimension, Metric},
};
use std::env;

const ROUNDUP_SAMPLES: usize = 10_000;
const ROUNDUP_SEED: u64 = 42;

#[derive(serde::Serialize)]
struct Report {
    generated_at: chrono::DateTime<chrono::Utc>,
    seed: u64,
    months: u32,
    iterations: usize,
    method: RetailMethod,
    ask: &'static str,
    processor: &'static str,
    overview: ScenarioOverview,
    rail_by_operator: Vec<(Dimension, f64)>,
    retail_by_channel: Vec<(Dimension, f64)>,
    summary: Vec<SummaryRow>,
    monte_carlo: Option<MonteCarloSummary>,
    roundup_mean: f64,
    ab_sample_size_per_arm: f64,
    advisories: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 123u64);
    let months = parse_arg(&args, "--months", 12u32);
    let iterations = parse_arg(&args, "--iterations", 2000usize);
    let retail_only = args.iter().any(|a| a == "--retail-only");
    let json = args.iter().any(|a| a == "--json");
    let method = match arg_value(&args, "--method").unwrap_or("top_down") {
        "top_down" => RetailMethod::TopDown,
        "direct" => RetailMethod::Direct,
        other => return Err(anyhow!("Unknown --method {other}; expected top_down or direct")),
    };

    let assumptions = match arg_value(&args, "--assumptions") {
        Some(path) => Assumptions::load(path)?,
        None => Assumptions::default(),
    };
    let rail_inputs = assumptions.rail_inputs();
    let retail_inputs = assumptions.retail_inputs(method);

    let advisories: Vec<String> = rail_advisories(&rail_inputs)
        .into_iter()
        .chain(retail_advisories(&retail_inputs))
        .map(|a| a.to_string())
        .collect();
    for advisory in &advisories {
        log::warn!("{advisory}");
    }

    let rail = compute_rail_monthly(&rail_inputs, months)?;
    let retail = compute_retail_monthly(&retail_inputs)?;

    let overview = ScenarioOverview::new(
        rail.total(Metric::Net),
        retail.total(Metric::Net),
        assumptions.organisation.fundraising_baseline_eur,
        retail_only,
    );

    let samples = run_monte_carlo(
        Some(&rail_inputs),
        Some(&retail_inputs),
        months,
        iterations,
        seed,
        !retail_only,
        true,
    )?;

    let roundups = simulate_roundup_distribution(&retail_inputs, ROUNDUP_SAMPLES, ROUNDUP_SEED)?;
    let roundup_mean = roundups.iter().sum::<f64>() / roundups.len().max(1) as f64;

    let report = Report {
        generated_at: chrono::Utc::now(),
        seed,
        months,
        iterations,
        method,
        ask: rail_inputs.ask_type.label(),
        processor: rail_inputs.processor.name(),
        overview,
        rail_by_operator: rail.dimension_totals(Metric::Net),
        retail_by_channel: retail.dimension_totals(Metric::Net),
        summary: scenario_summary(&rail, &retail),
        monte_carlo: samples.summary(),
        roundup_mean,
        ab_sample_size_per_arm: sample_size_two_proportions(
            rail_inputs.optin_web_1,
            rail_inputs.optin_web_2,
            0.05,
            0.8,
        )?,
        advisories,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &Report) {
    let o = &report.overview;
    let period = format!(
        "{} month{}",
        report.months,
        if report.months != 1 { "s" } else { "" }
    );

    println!("Micro-donation estimate");
    println!("  seed:        {}", report.seed);
    println!("  horizon:     {period}");
    println!("  method:      {:?}", report.method);
    println!("  rail ask:    {}", report.ask);
    println!("  processor:   {}", report.processor);
    println!();

    println!("=== OVERVIEW ===");
    let rail_label = if o.retail_only { "rail net (excluded)" } else { "rail net" };
    println!("  total net ({period}): {}", euro(o.total_net));
    println!("  {rail_label:<20} {}", euro(o.rail_net));
    println!("  {:<20} {}", "retail net", euro(o.retail_net));
    println!("  share of baseline:   {}", pct(o.share_of_baseline));
    println!();

    println!("=== SPLITS ===");
    for (dimension, value) in report.rail_by_operator.iter().chain(&report.retail_by_channel) {
        println!("  {:<12} {}", dimension.name(), euro(*value));
    }
    println!();

    println!("=== SUMMARY ===");
    for row in &report.summary {
        let initiative = match row.initiative {
            Initiative::Rail => "rail",
            Initiative::Retail => "retail",
        };
        println!("  {initiative:<7} {:<16} {:>18.0}", row.metric.name(), row.value);
    }
    println!();

    println!("=== MONTE CARLO ({} iterations) ===", report.iterations);
    match &report.monte_carlo {
        Some(mc) => {
            println!("  5th %:   {}", euro(mc.p5));
            println!("  median:  {}", euro(mc.p50));
            println!("  95th %:  {}", euro(mc.p95));
        }
        None => println!("  (no samples)"),
    }
    println!();

    println!("  mean round-up per transaction: €{:.3}", report.roundup_mean);
    println!(
        "  A/B sample size per arm (€1 vs €2 opt-in): {:.0}",
        report.ab_sample_size_per_arm
    );

    if !report.advisories.is_empty() {
        println!();
        println!("=== ADVISORIES ===");
        for advisory in &report.advisories {
            println!("  ! {advisory}");
        }
    }
}

/// Whole euros with space-separated thousands, e.g. `€11 512 800`.
fn euro(x: f64) -> String {
    let rounded = x.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}€{grouped}")
}

fn pct(x: f64) -> String {
    format!("{:.1}%", x * 100.0)
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    arg_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
