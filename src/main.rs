//! ROI Calculator CLI
//!
//! Runs a single property calculation and prints the headline figures and
//! the year-by-year projection

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use roi_calculator::property::load_property_json;
use roi_calculator::{calculate, validate_all, CalculationResults, PropertyInputs};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roi_calculator", version, about = "Property investment ROI calculator")]
struct Args {
    /// JSON file with property inputs (camelCase fields). Uses the built-in
    /// reference scenario when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Print input warnings before the results
    #[arg(long)]
    validate: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    generated_at: String,
    inputs: &'a PropertyInputs,
    results: &'a CalculationResults,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let inputs = match &args.input {
        Some(path) => load_property_json(path)
            .with_context(|| format!("Failed to load inputs from {}", path.display()))?,
        None => PropertyInputs::reference_scenario(),
    };

    if args.validate {
        for warning in validate_all(&inputs) {
            eprintln!("{}", warning);
        }
    }

    let results = calculate(&inputs);

    if args.json {
        let report = Report {
            generated_at: Utc::now().to_rfc3339(),
            inputs: &inputs,
            results: &results,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_table(&inputs, &results);
    Ok(())
}

fn print_table(inputs: &PropertyInputs, r: &CalculationResults) {
    println!("ROI Calculator v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");

    println!("Property:");
    println!("  Purchase Price:      AED {:>14.2}", inputs.purchase_price);
    println!("  Area:                    {:>14.0} sqft", inputs.area_sqft);
    println!("  Monthly Rent:        AED {:>14.2}", inputs.expected_monthly_rent);
    println!();

    println!("Acquisition:");
    println!("  Down Payment:        AED {:>14.2}", r.down_payment);
    println!("  DLD Fee:             AED {:>14.2}", r.dld_fee);
    println!("  Agent Fee:           AED {:>14.2}", r.agent_fee);
    println!("  Total Investment:    AED {:>14.2}", r.total_initial_investment);
    println!("  Loan Amount:         AED {:>14.2}  (LTV {})", r.loan_amount, r.loan_to_value);
    println!("  Mortgage Payment:    AED {:>14.2} / month", r.monthly_mortgage_payment);
    println!();

    println!("Year 1:");
    println!("  Effective Rent:      AED {:>14.2}", r.effective_annual_rent);
    println!("  Operating Expenses:  AED {:>14.2}", r.total_annual_operating_expenses);
    println!("  Net Operating Income:AED {:>14.2}", r.net_operating_income);
    println!("  Gross Yield:             {:>14}", r.gross_rental_yield.to_string());
    println!("  Net Yield:               {:>14}", r.net_rental_yield.to_string());
    println!("  Cap Rate:                {:>14}", r.cap_rate.to_string());
    println!("  Cash-on-Cash:            {:>14}", r.cash_on_cash_return.to_string());
    println!("  Monthly Cash Flow:   AED {:>14.2}", r.monthly_cash_flow);
    println!();

    println!("Projection ({} years):", r.projection.len());
    println!(
        "{:>4} {:>14} {:>12} {:>12} {:>14} {:>14} {:>14} {:>9}",
        "Year", "Value", "Rent", "CashFlow", "CumCashFlow", "Equity", "TotalReturn", "ROI%"
    );
    println!("{}", "-".repeat(100));
    for y in &r.projection {
        println!(
            "{:>4} {:>14.2} {:>12.2} {:>12.2} {:>14.2} {:>14.2} {:>14.2} {:>9.2}",
            y.year,
            y.property_value,
            y.annual_rent,
            y.cash_flow,
            y.cumulative_cash_flow,
            y.equity_built,
            y.total_return,
            y.roi_percent,
        );
    }
    println!();

    let exit = &r.exit;
    println!("Exit (sale at end of year {}):", exit.year);
    println!("  Sale Price:          AED {:>14.2}", exit.sale_price);
    println!("  Selling Costs:       AED {:>14.2}", exit.selling_costs);
    println!("  Loan Payoff:         AED {:>14.2}", exit.remaining_loan_balance);
    println!("  Net Sale Proceeds:   AED {:>14.2}", exit.net_sale_proceeds);
    println!("  Total Return:        AED {:>14.2}  ({:.2}%)", exit.total_return, exit.roi_percent);
    match exit.annualized_irr {
        Some(irr) => println!("  Annualized IRR:          {:>14}", irr.to_string()),
        None => println!("  Annualized IRR:          {:>14}", "n/a"),
    }
}
