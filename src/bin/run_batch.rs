//! Run ROI calculations for every property in a CSV file
//!
//! Outputs one summary row per property

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use roi_calculator::property::load_properties;
use roi_calculator::{MarketAssumptions, ScenarioRunner};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Batch ROI calculation over a property CSV")]
struct Args {
    /// Property CSV (camelCase headers)
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "roi_batch_output.csv")]
    output: PathBuf,

    /// Directory containing market_defaults.csv
    #[arg(long)]
    assumptions: Option<PathBuf>,
}

/// One output row per property
#[derive(Debug, Serialize)]
struct SummaryRow {
    row: usize,
    purchase_price: f64,
    monthly_rent: f64,
    total_initial_investment: f64,
    loan_amount: f64,
    gross_yield_pct: f64,
    net_yield_pct: f64,
    cash_on_cash_pct: f64,
    monthly_cash_flow: f64,
    holding_years: u32,
    final_property_value: f64,
    mark_to_market_return: f64,
    exit_total_return: f64,
    exit_roi_pct: f64,
    exit_irr_pct: Option<f64>,
    generated_at: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let assumptions = match &args.assumptions {
        Some(dir) => MarketAssumptions::from_csv_path(dir)
            .with_context(|| format!("Failed to load assumptions from {}", dir.display()))?,
        None => MarketAssumptions::dubai_defaults(),
    };

    let start = Instant::now();
    println!("Loading properties from {}...", args.input.display());
    let properties = load_properties(&args.input, &assumptions)
        .with_context(|| format!("Failed to load properties from {}", args.input.display()))?;
    println!("Loaded {} properties in {:?}", properties.len(), start.elapsed());

    let runner = ScenarioRunner::with_assumptions(assumptions);
    let calc_start = Instant::now();
    let results = runner.run_batch(&properties);
    println!("Calculations complete in {:?}", calc_start.elapsed());

    let generated_at = Utc::now().to_rfc3339();
    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let mut negative_cash_flow = 0;
    for (idx, (inputs, result)) in properties.iter().zip(&results).enumerate() {
        let summary = result.summary();
        if summary.monthly_cash_flow < 0.0 {
            negative_cash_flow += 1;
        }
        writer.serialize(SummaryRow {
            row: idx + 1,
            purchase_price: inputs.purchase_price,
            monthly_rent: inputs.expected_monthly_rent,
            total_initial_investment: summary.total_initial_investment,
            loan_amount: result.loan_amount,
            gross_yield_pct: summary.gross_rental_yield.as_percent(),
            net_yield_pct: summary.net_rental_yield.as_percent(),
            cash_on_cash_pct: summary.cash_on_cash_return.as_percent(),
            monthly_cash_flow: summary.monthly_cash_flow,
            holding_years: summary.holding_period_years,
            final_property_value: summary.final_property_value,
            mark_to_market_return: summary.mark_to_market_return,
            exit_total_return: summary.exit_total_return,
            exit_roi_pct: summary.exit_roi_percent,
            exit_irr_pct: summary.exit_irr.map(|irr| irr.as_percent()),
            generated_at: generated_at.clone(),
        })?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());

    println!("\nBatch Summary:");
    println!("  Properties:             {}", results.len());
    println!("  Negative cash flow:     {}", negative_cash_flow);
    if !results.is_empty() {
        let avg_gross = results.iter().map(|r| r.gross_rental_yield.as_percent()).sum::<f64>()
            / results.len() as f64;
        let avg_coc = results.iter().map(|r| r.cash_on_cash_return.as_percent()).sum::<f64>()
            / results.len() as f64;
        println!("  Average gross yield:    {:.2}%", avg_gross);
        println!("  Average cash-on-cash:   {:.2}%", avg_coc);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
