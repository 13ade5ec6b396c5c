//! Scenario runner for batch and sensitivity calculations
//!
//! Holds market assumptions once, then runs many calculations: one per
//! property in a portfolio, or one per assumption variant of a single property.

use rayon::prelude::*;
use std::path::Path;

use crate::assumptions::MarketAssumptions;
use crate::calculator::{calculate, CalculationResults};
use crate::error::Result;
use crate::property::PropertyInputs;
use crate::rates::Percent;

/// A single-field change applied to a base set of inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    RentGrowth(Percent),
    CapitalGrowth(Percent),
    InterestRate(Percent),
    Vacancy(Percent),
    DownPayment(Percent),
}

impl Adjustment {
    /// Copy of `base` with this adjustment applied
    pub fn apply(&self, base: &PropertyInputs) -> PropertyInputs {
        let mut inputs = base.clone();
        match *self {
            Adjustment::RentGrowth(p) => inputs.rent_growth_percent = p,
            Adjustment::CapitalGrowth(p) => inputs.capital_growth_percent = p,
            Adjustment::InterestRate(p) => inputs.mortgage_interest_rate = p,
            Adjustment::Vacancy(p) => inputs.vacancy_rate_percent = p,
            Adjustment::DownPayment(p) => inputs.down_payment_percent = p,
        }
        inputs
    }

    /// Short label for tables, e.g. `rent_growth=3.00%`
    pub fn label(&self) -> String {
        match self {
            Adjustment::RentGrowth(p) => format!("rent_growth={}", p),
            Adjustment::CapitalGrowth(p) => format!("capital_growth={}", p),
            Adjustment::InterestRate(p) => format!("interest_rate={}", p),
            Adjustment::Vacancy(p) => format!("vacancy={}", p),
            Adjustment::DownPayment(p) => format!("down_payment={}", p),
        }
    }
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// let variants = [2.0, 3.0, 4.0].map(|g| Adjustment::RentGrowth(Percent(g)));
/// let results = runner.run_sensitivity(&inputs, &variants);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    assumptions: MarketAssumptions,
}

impl ScenarioRunner {
    /// Runner with Dubai market defaults
    pub fn new() -> Self {
        Self::with_assumptions(MarketAssumptions::dubai_defaults())
    }

    /// Runner with assumptions loaded from data/assumptions/
    pub fn from_csv() -> Result<Self> {
        Ok(Self::with_assumptions(MarketAssumptions::from_csv()?))
    }

    /// Runner with assumptions loaded from a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self::with_assumptions(MarketAssumptions::from_csv_path(path)?))
    }

    pub fn with_assumptions(assumptions: MarketAssumptions) -> Self {
        Self { assumptions }
    }

    /// Inputs for a property with market defaults filled in
    pub fn inputs_for(&self, purchase_price: f64, area_sqft: f64, monthly_rent: f64) -> PropertyInputs {
        PropertyInputs::with_defaults(&self.assumptions, purchase_price, area_sqft, monthly_rent)
    }

    pub fn run(&self, inputs: &PropertyInputs) -> CalculationResults {
        calculate(inputs)
    }

    /// Calculate every property in parallel. Output order matches input order.
    pub fn run_batch(&self, properties: &[PropertyInputs]) -> Vec<CalculationResults> {
        log::debug!("Running batch of {} properties", properties.len());
        properties.par_iter().map(calculate).collect()
    }

    /// One result per adjustment, each applied independently to `base`
    pub fn run_sensitivity(
        &self,
        base: &PropertyInputs,
        adjustments: &[Adjustment],
    ) -> Vec<(Adjustment, CalculationResults)> {
        adjustments
            .par_iter()
            .map(|adj| (*adj, calculate(&adj.apply(base))))
            .collect()
    }

    pub fn assumptions(&self) -> &MarketAssumptions {
        &self.assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut MarketAssumptions {
        &mut self.assumptions
    }
}
