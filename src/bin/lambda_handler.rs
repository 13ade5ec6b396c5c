//! AWS Lambda handler for ROI calculations
//!
//! Accepts property inputs as JSON and returns the full calculation result
//! together with advisory input warnings. Persistence of the result is left
//! to the caller.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use roi_calculator::{
    calculate, validate_all, Adjustment, CalculationResults, Percent, PropertyInputs,
    ScenarioRunner, Warning,
};
use serde::{Deserialize, Serialize};

/// Request payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub inputs: PropertyInputs,

    /// Also return exit figures for these alternative rent growth rates
    #[serde(default)]
    pub rent_growth_scenarios: Vec<f64>,
}

/// Exit figures for one rent growth variant
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub label: String,
    pub exit_total_return: f64,
    pub exit_roi_percent: f64,
    pub monthly_cash_flow: f64,
}

/// Response payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub results: CalculationResults,
    pub warnings: Vec<Warning>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scenarios: Vec<ScenarioOutcome>,
    pub execution_time_us: u64,
}

async fn handler(event: LambdaEvent<CalculateRequest>) -> Result<CalculateResponse, Error> {
    let start = std::time::Instant::now();
    let LambdaEvent { payload: request, context } = event;

    let warnings = validate_all(&request.inputs);
    if !warnings.is_empty() {
        log::info!("Request {} has {} input warnings", context.request_id, warnings.len());
    }

    let results = calculate(&request.inputs);

    let adjustments: Vec<Adjustment> = request
        .rent_growth_scenarios
        .iter()
        .map(|&g| Adjustment::RentGrowth(Percent(g)))
        .collect();
    let scenarios = ScenarioRunner::new()
        .run_sensitivity(&request.inputs, &adjustments)
        .into_iter()
        .map(|(adj, r)| ScenarioOutcome {
            label: adj.label(),
            exit_total_return: r.exit.total_return,
            exit_roi_percent: r.exit.roi_percent,
            monthly_cash_flow: r.monthly_cash_flow,
        })
        .collect();

    Ok(CalculateResponse {
        results,
        warnings,
        scenarios,
        execution_time_us: start.elapsed().as_micros() as u64,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
