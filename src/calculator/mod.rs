//! ROI calculation engine

mod engine;
pub mod irr;
pub mod mortgage;
mod results;
mod state;

pub use engine::calculate;
pub use irr::{calculate_irr, hold_period_irr};
pub use mortgage::{AmortizationYear, Mortgage};
pub use results::{
    CalculationResults, ExitScenario, OperatingExpenses, ProjectionYear, ResultSummary,
};
pub use state::ProjectionState;
