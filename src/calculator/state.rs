//! Running state carried from one projection year to the next

use super::mortgage::Mortgage;
use crate::rates::Fraction;

/// Accumulators for the year-by-year projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection year (0 = acquisition date)
    pub year: u32,

    /// Gross annual rent as entered (year 1)
    pub base_rent: f64,

    /// Gross annual rent for the current year
    pub annual_rent: f64,

    /// Running sum of annual cash flows
    pub cumulative_cash_flow: f64,

    /// Running sum of mortgage principal repaid
    pub cumulative_principal: f64,

    /// Outstanding loan balance at end of the current year
    pub loan_balance: f64,
}

impl ProjectionState {
    /// State at acquisition, before any year has elapsed
    pub fn at_acquisition(gross_annual_rent: f64, mortgage: &Mortgage) -> Self {
        Self {
            year: 0,
            base_rent: gross_annual_rent,
            annual_rent: gross_annual_rent,
            cumulative_cash_flow: 0.0,
            cumulative_principal: 0.0,
            loan_balance: mortgage.principal(),
        }
    }

    /// Advance to the next year. Rent escalates from year 2 onward, so year 1
    /// uses the rent as entered.
    pub fn advance_year(&mut self, rent_growth: Fraction) {
        self.year += 1;
        self.annual_rent = rent_growth.compound(self.base_rent, self.year - 1);
    }

    /// Fold the year's cash flow and debt service into the running totals
    pub fn record(&mut self, cash_flow: f64, principal_paid: f64, closing_balance: f64) {
        self.cumulative_cash_flow += cash_flow;
        self.cumulative_principal += principal_paid;
        self.loan_balance = closing_balance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::Percent;
    use approx::assert_relative_eq;

    #[test]
    fn test_rent_escalates_from_year_two() {
        let mortgage = Mortgage::new(0.0, Fraction::ZERO, 25);
        let mut state = ProjectionState::at_acquisition(96_000.0, &mortgage);

        let growth = Percent(3.0).to_fraction();
        state.advance_year(growth);
        assert_eq!(state.year, 1);
        assert_eq!(state.annual_rent, 96_000.0);

        state.advance_year(growth);
        assert_relative_eq!(state.annual_rent, 98_880.0, epsilon = 1e-9);
    }
}
