//! ROI Calculator - deterministic investment engine for buy-to-let property
//!
//! This library provides:
//! - Acquisition cost, mortgage and operating expense calculations
//! - Gross/net yield, cap rate, cash flow and cash-on-cash return
//! - Multi-year projection with compounding growth and an exit scenario
//! - Advisory field validation for calculator forms
//! - Batch and sensitivity runs over many inputs

pub mod assumptions;
pub mod calculator;
pub mod error;
pub mod property;
pub mod rates;
pub mod scenario;
pub mod validation;

// Re-export commonly used types
pub use assumptions::MarketAssumptions;
pub use calculator::{calculate, CalculationResults, ExitScenario, ProjectionYear};
pub use error::{Result, RoiError};
pub use property::PropertyInputs;
pub use rates::{Fraction, Percent};
pub use scenario::{Adjustment, ScenarioRunner};
pub use validation::{validate, validate_all, InputField, Severity, Warning};
