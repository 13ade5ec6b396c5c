//! Output structures for an ROI calculation

use serde::{Deserialize, Serialize};

use crate::rates::Fraction;

/// Breakdown of first-year operating expenses
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingExpenses {
    pub service_charge: f64,
    pub maintenance: f64,
    /// Charged on gross (pre-vacancy) rent
    pub management_fee: f64,
    pub insurance: f64,
    pub other: f64,
}

impl OperatingExpenses {
    pub fn total(&self) -> f64 {
        self.service_charge + self.maintenance + self.management_fee + self.insurance + self.other
    }
}

/// A single year of the forward projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionYear {
    /// Projection year (1-indexed)
    pub year: u32,

    // Valuation
    pub property_value: f64,
    pub appreciation: f64,

    // Income and costs for the year
    pub annual_rent: f64,
    pub effective_rent: f64,
    pub operating_expenses: f64,
    pub mortgage_payment: f64,
    pub cash_flow: f64,
    pub cumulative_cash_flow: f64,

    // Debt
    pub principal_paid: f64,
    pub loan_balance: f64,

    // Mark-to-market return (no selling costs)
    pub equity_built: f64,
    pub total_return: f64,
    pub roi_percent: f64,
}

/// Realized-sale outcome at the end of the holding period
///
/// Distinct from the final `ProjectionYear::total_return`, which is
/// mark-to-market and deducts neither selling costs nor acquisition fees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitScenario {
    pub year: u32,
    pub sale_price: f64,
    pub selling_costs: f64,
    pub remaining_loan_balance: f64,
    pub net_sale_proceeds: f64,
    pub cumulative_cash_flow: f64,
    /// Cash collected plus net sale proceeds less total initial investment
    pub total_return: f64,
    pub roi_percent: f64,
    /// None when the hold's cash flows admit no IRR
    pub annualized_irr: Option<Fraction>,
}

/// Complete result of one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResults {
    // Acquisition
    pub down_payment: f64,
    pub dld_fee: f64,
    pub agent_fee: f64,
    pub total_initial_investment: f64,
    pub loan_amount: f64,
    pub loan_to_value: Fraction,

    // Financing
    pub monthly_mortgage_payment: f64,
    pub annual_mortgage_payment: f64,

    // Operations (year 1)
    pub gross_annual_rent: f64,
    pub effective_annual_rent: f64,
    pub operating_expenses: OperatingExpenses,
    pub total_annual_operating_expenses: f64,
    pub net_operating_income: f64,

    // Yields
    pub gross_rental_yield: Fraction,
    pub net_rental_yield: Fraction,
    pub cap_rate: Fraction,
    pub cash_on_cash_return: Fraction,

    // Cash flow
    pub annual_cash_flow: f64,
    pub monthly_cash_flow: f64,

    // Unit economics
    pub cost_per_sqft: f64,
    pub rent_per_sqft: f64,

    pub projection: Vec<ProjectionYear>,
    pub exit: ExitScenario,
}

impl CalculationResults {
    /// Final projection year, if the horizon is non-empty
    pub fn final_year(&self) -> Option<&ProjectionYear> {
        self.projection.last()
    }

    pub fn summary(&self) -> ResultSummary {
        let final_year = self.final_year();
        ResultSummary {
            holding_period_years: self.projection.len() as u32,
            total_initial_investment: self.total_initial_investment,
            gross_rental_yield: self.gross_rental_yield,
            net_rental_yield: self.net_rental_yield,
            cash_on_cash_return: self.cash_on_cash_return,
            monthly_cash_flow: self.monthly_cash_flow,
            final_property_value: final_year
                .map(|y| y.property_value)
                .unwrap_or(self.exit.sale_price),
            mark_to_market_return: final_year.map(|y| y.total_return).unwrap_or(0.0),
            exit_total_return: self.exit.total_return,
            exit_roi_percent: self.exit.roi_percent,
            exit_irr: self.exit.annualized_irr,
        }
    }
}

/// Headline figures, one row per property in batch output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub holding_period_years: u32,
    pub total_initial_investment: f64,
    pub gross_rental_yield: Fraction,
    pub net_rental_yield: Fraction,
    pub cash_on_cash_return: Fraction,
    pub monthly_cash_flow: f64,
    pub final_property_value: f64,
    pub mark_to_market_return: f64,
    pub exit_total_return: f64,
    pub exit_roi_percent: f64,
    pub exit_irr: Option<Fraction>,
}
