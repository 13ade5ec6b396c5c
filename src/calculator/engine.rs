//! Core ROI engine: acquisition costs, yields, cash flow and the forward projection

use super::irr::hold_period_irr;
use super::mortgage::Mortgage;
use super::results::{CalculationResults, ExitScenario, OperatingExpenses, ProjectionYear};
use super::state::ProjectionState;
use crate::property::{NormalizedRates, PropertyInputs};
use crate::rates::{ratio, Fraction};

/// Run a full ROI calculation
///
/// Pure and deterministic: the same inputs always produce the same results.
/// Non-finite inputs are treated as zero and over-long terms and holding
/// periods are capped. Every degenerate denominator resolves to zero rather
/// than NaN or infinity.
pub fn calculate(inputs: &PropertyInputs) -> CalculationResults {
    let (inputs, replaced) = inputs.sanitized();
    if !replaced.is_empty() {
        log::warn!("Out-of-range inputs replaced: {}", replaced.join(", "));
    }

    Calculation::new(&inputs).run()
}

/// Acquisition-date cash requirements
#[derive(Debug, Clone, Copy)]
struct Acquisition {
    down_payment: f64,
    dld_fee: f64,
    agent_fee: f64,
    loan_amount: f64,
}

impl Acquisition {
    fn total_initial_investment(&self) -> f64 {
        self.down_payment + self.dld_fee + self.agent_fee
    }
}

/// Year-level income statement, shared by the headline figures and each
/// projection year
#[derive(Debug, Clone, Copy)]
struct YearEconomics {
    gross_rent: f64,
    effective_rent: f64,
    expenses: OperatingExpenses,
    net_operating_income: f64,
}

/// One calculation run over sanitized inputs
struct Calculation<'a> {
    inputs: &'a PropertyInputs,
    rates: NormalizedRates,
    acquisition: Acquisition,
    mortgage: Mortgage,
}

impl<'a> Calculation<'a> {
    fn new(inputs: &'a PropertyInputs) -> Self {
        let rates = inputs.rates();
        let price = inputs.purchase_price;

        let down_payment = rates.down_payment.of(price);
        let acquisition = Acquisition {
            down_payment,
            dld_fee: rates.dld_fee.of(price),
            agent_fee: rates.agent_fee.of(price),
            loan_amount: (price - down_payment).max(0.0),
        };

        let mortgage = Mortgage::new(
            acquisition.loan_amount,
            rates.mortgage_interest,
            inputs.mortgage_term_years,
        );

        if acquisition.loan_amount > 0.0 && inputs.mortgage_term_years == 0 {
            log::debug!(
                "Zero mortgage term with loan of {:.2}; no debt service applied",
                acquisition.loan_amount
            );
        }

        Self {
            inputs,
            rates,
            acquisition,
            mortgage,
        }
    }

    fn run(&self) -> CalculationResults {
        let inputs = self.inputs;
        let price = inputs.purchase_price;
        let total_initial_investment = self.acquisition.total_initial_investment();

        let year_one = self.economics(inputs.gross_annual_rent());
        let annual_mortgage_payment = self.mortgage.annual_payment();
        let annual_cash_flow = year_one.net_operating_income - annual_mortgage_payment;

        let projection = self.project();
        let exit = self.exit_scenario(&projection, total_initial_investment);

        // Net yield and cap rate share a definition in this model: both are
        // property-level and pre-debt-service.
        let net_yield = Fraction(ratio(year_one.net_operating_income, price));

        CalculationResults {
            down_payment: self.acquisition.down_payment,
            dld_fee: self.acquisition.dld_fee,
            agent_fee: self.acquisition.agent_fee,
            total_initial_investment,
            loan_amount: self.acquisition.loan_amount,
            loan_to_value: Fraction(ratio(self.acquisition.loan_amount, price)),
            monthly_mortgage_payment: self.mortgage.monthly_payment(),
            annual_mortgage_payment,
            gross_annual_rent: year_one.gross_rent,
            effective_annual_rent: year_one.effective_rent,
            operating_expenses: year_one.expenses,
            total_annual_operating_expenses: year_one.expenses.total(),
            net_operating_income: year_one.net_operating_income,
            gross_rental_yield: Fraction(ratio(year_one.gross_rent, price)),
            net_rental_yield: net_yield,
            cap_rate: net_yield,
            cash_on_cash_return: Fraction(ratio(annual_cash_flow, total_initial_investment)),
            annual_cash_flow,
            monthly_cash_flow: annual_cash_flow / 12.0,
            cost_per_sqft: ratio(price, inputs.area_sqft),
            rent_per_sqft: ratio(year_one.gross_rent, inputs.area_sqft),
            projection,
            exit,
        }
    }

    /// Income statement for a year with the given gross rent. Expenses other
    /// than the management fee stay flat in nominal terms.
    fn economics(&self, gross_rent: f64) -> YearEconomics {
        let inputs = self.inputs;
        let effective_rent = gross_rent * (1.0 - self.rates.vacancy.value());

        let expenses = OperatingExpenses {
            service_charge: inputs.service_charge_annual,
            maintenance: self.rates.maintenance.of(inputs.purchase_price),
            // Management fee applies to gross rent, not vacancy-adjusted rent
            management_fee: self.rates.management_fee.of(gross_rent),
            insurance: inputs.insurance_annual,
            other: inputs.other_costs_annual,
        };

        YearEconomics {
            gross_rent,
            effective_rent,
            net_operating_income: effective_rent - expenses.total(),
            expenses,
        }
    }

    /// Year-by-year projection over the holding period
    fn project(&self) -> Vec<ProjectionYear> {
        let price = self.inputs.purchase_price;
        let total_initial_investment = self.acquisition.total_initial_investment();
        let horizon = self.inputs.holding_period_years;

        let mut state = ProjectionState::at_acquisition(self.inputs.gross_annual_rent(), &self.mortgage);
        let mut years = Vec::with_capacity(horizon as usize);

        for _ in 0..horizon {
            state.advance_year(self.rates.rent_growth);

            let economics = self.economics(state.annual_rent);
            let debt = self.mortgage.year(state.year);
            let cash_flow = economics.net_operating_income - debt.payment;
            state.record(cash_flow, debt.principal_paid, debt.closing_balance);

            let property_value = self.rates.capital_growth.compound(price, state.year);
            let appreciation = property_value - price;
            let equity_built = state.cumulative_principal + appreciation;
            let total_return = state.cumulative_cash_flow + equity_built;

            years.push(ProjectionYear {
                year: state.year,
                property_value,
                appreciation,
                annual_rent: economics.gross_rent,
                effective_rent: economics.effective_rent,
                operating_expenses: economics.expenses.total(),
                mortgage_payment: debt.payment,
                cash_flow,
                cumulative_cash_flow: state.cumulative_cash_flow,
                principal_paid: state.cumulative_principal,
                loan_balance: state.loan_balance,
                equity_built,
                total_return,
                roi_percent: ratio(total_return, total_initial_investment) * 100.0,
            });
        }

        years
    }

    /// Realized sale at the end of the horizon, net of selling costs and the
    /// outstanding loan. With an empty horizon this is an immediate resale at
    /// the purchase price.
    fn exit_scenario(&self, projection: &[ProjectionYear], total_initial_investment: f64) -> ExitScenario {
        let (year, sale_price, remaining_loan_balance, cumulative_cash_flow) = match projection.last() {
            Some(last) => (last.year, last.property_value, last.loan_balance, last.cumulative_cash_flow),
            None => (0, self.inputs.purchase_price, self.mortgage.principal(), 0.0),
        };

        let selling_costs = self.rates.selling_cost.of(sale_price);
        let net_sale_proceeds = sale_price - selling_costs - remaining_loan_balance;
        let total_return = cumulative_cash_flow + net_sale_proceeds - total_initial_investment;

        let yearly: Vec<f64> = projection.iter().map(|y| y.cash_flow).collect();
        let annualized_irr = if total_initial_investment > 0.0 {
            hold_period_irr(total_initial_investment, &yearly, net_sale_proceeds).map(Fraction)
        } else {
            None
        };

        ExitScenario {
            year,
            sale_price,
            selling_costs,
            remaining_loan_balance,
            net_sale_proceeds,
            cumulative_cash_flow,
            total_return,
            roi_percent: ratio(total_return, total_initial_investment) * 100.0,
            annualized_irr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::MAX_HOLDING_YEARS;
    use crate::rates::Percent;
    use approx::assert_relative_eq;

    fn reference() -> PropertyInputs {
        PropertyInputs::reference_scenario()
    }

    #[test]
    fn test_reference_scenario() {
        let r = calculate(&reference());

        assert_relative_eq!(r.gross_rental_yield.value(), 0.064, epsilon = 1e-12);
        assert_relative_eq!(r.loan_amount, 1_200_000.0);
        assert_relative_eq!(r.total_initial_investment, 390_000.0, epsilon = 1e-6);
        assert_relative_eq!(r.projection[0].property_value, 1_575_000.0, epsilon = 1e-6);
        assert_relative_eq!(r.loan_to_value.value(), 0.8);

        // 96,000 × 0.95
        assert_relative_eq!(r.effective_annual_rent, 91_200.0, epsilon = 1e-6);
        // 15,000 + 15,000 + 4,800 + 2,000 + 1,000
        assert_relative_eq!(r.total_annual_operating_expenses, 37_800.0, epsilon = 1e-6);
        assert_relative_eq!(r.net_operating_income, 53_400.0, epsilon = 1e-6);
        assert_relative_eq!(r.cap_rate.value(), 0.0356, epsilon = 1e-12);
        assert_eq!(r.cap_rate, r.net_rental_yield);
        assert_relative_eq!(r.cost_per_sqft, 1_500.0);
        assert_relative_eq!(r.rent_per_sqft, 96.0);
    }

    #[test]
    fn test_determinism() {
        let inputs = reference();
        assert_eq!(calculate(&inputs), calculate(&inputs));
    }

    #[test]
    fn test_zero_loan() {
        let mut inputs = reference();
        inputs.down_payment_percent = Percent(100.0);
        let r = calculate(&inputs);

        assert_eq!(r.loan_amount, 0.0);
        assert_eq!(r.annual_mortgage_payment, 0.0);
        assert_eq!(r.annual_cash_flow, r.net_operating_income);
        assert!(r.projection.iter().all(|y| y.mortgage_payment == 0.0 && y.loan_balance == 0.0));
    }

    #[test]
    fn test_zero_rate() {
        let mut inputs = reference();
        inputs.mortgage_interest_rate = Percent(0.0);
        let r = calculate(&inputs);

        assert_eq!(r.monthly_mortgage_payment, 1_200_000.0 / (25.0 * 12.0));
        assert!(r.annual_cash_flow.is_finite());
    }

    #[test]
    fn test_gross_yield_ignores_vacancy() {
        for vacancy in [0.0, 5.0, 25.0, 100.0] {
            let mut inputs = reference();
            inputs.vacancy_rate_percent = Percent(vacancy);
            let r = calculate(&inputs);
            let expected = inputs.expected_monthly_rent * 12.0 / inputs.purchase_price;
            assert_relative_eq!(r.gross_rental_yield.value(), expected);
        }
    }

    #[test]
    fn test_management_fee_on_gross_rent() {
        let mut inputs = reference();
        inputs.vacancy_rate_percent = Percent(50.0);
        let r = calculate(&inputs);
        assert_relative_eq!(r.operating_expenses.management_fee, 4_800.0, epsilon = 1e-9);
    }

    #[test]
    fn test_projection_monotonic() {
        let mut inputs = reference();
        inputs.down_payment_percent = Percent(60.0);
        let r = calculate(&inputs);

        for pair in r.projection.windows(2) {
            assert!(pair[1].property_value >= pair[0].property_value);
            assert!(pair[1].annual_rent >= pair[0].annual_rent);
        }
        // Positive cash flow every year, so the running total grows
        assert!(r.projection.iter().all(|y| y.cash_flow > 0.0));
        for pair in r.projection.windows(2) {
            assert!(pair[1].cumulative_cash_flow >= pair[0].cumulative_cash_flow);
        }
    }

    #[test]
    fn test_cash_on_cash_consistency() {
        let r = calculate(&reference());
        assert_relative_eq!(
            r.cash_on_cash_return.value() * r.total_initial_investment,
            r.annual_cash_flow,
            epsilon = 1e-6
        );
        assert_relative_eq!(r.monthly_cash_flow * 12.0, r.annual_cash_flow, epsilon = 1e-9);
    }

    #[test]
    fn test_projection_length() {
        for years in [0, 1, 5, 10, 30] {
            let mut inputs = reference();
            inputs.holding_period_years = years;
            assert_eq!(calculate(&inputs).projection.len(), years as usize);
        }
    }

    #[test]
    fn test_projection_year_formulas() {
        let r = calculate(&reference());
        let y2 = &r.projection[1];

        assert_eq!(y2.year, 2);
        assert_relative_eq!(y2.property_value, 1_500_000.0 * 1.05_f64.powi(2), epsilon = 1e-6);
        assert_relative_eq!(y2.annual_rent, 96_000.0 * 1.03, epsilon = 1e-6);
        assert_relative_eq!(
            y2.cumulative_cash_flow,
            r.projection[0].cash_flow + y2.cash_flow,
            epsilon = 1e-9
        );
        assert_relative_eq!(y2.equity_built, y2.principal_paid + y2.appreciation, epsilon = 1e-9);
        assert_relative_eq!(
            y2.roi_percent,
            y2.total_return / r.total_initial_investment * 100.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            y2.loan_balance,
            r.loan_amount - y2.principal_paid,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_negative_cash_flow() {
        let mut inputs = reference();
        inputs.down_payment_percent = Percent(10.0);
        let r = calculate(&inputs);

        assert!(r.monthly_cash_flow < 0.0);
        assert!(r.cash_on_cash_return.value() < 0.0);
        assert!(r.monthly_cash_flow.is_finite());
    }

    #[test]
    fn test_exit_differs_from_mark_to_market() {
        let r = calculate(&reference());
        let last = r.final_year().unwrap();

        assert_eq!(r.exit.year, 5);
        assert_relative_eq!(r.exit.sale_price, last.property_value);
        assert_relative_eq!(r.exit.selling_costs, last.property_value * 0.02, epsilon = 1e-6);
        assert_relative_eq!(r.exit.remaining_loan_balance, last.loan_balance);

        // Exit = mark-to-market less selling costs and acquisition fees
        let expected = last.total_return - r.exit.selling_costs - r.dld_fee - r.agent_fee;
        assert_relative_eq!(r.exit.total_return, expected, epsilon = 1e-4);
        assert!(r.exit.total_return < last.total_return);
        assert!(r.exit.annualized_irr.is_some());
    }

    #[test]
    fn test_zero_purchase_price() {
        let mut inputs = reference();
        inputs.purchase_price = 0.0;
        let r = calculate(&inputs);

        assert_eq!(r.gross_rental_yield.value(), 0.0);
        assert_eq!(r.net_rental_yield.value(), 0.0);
        assert_eq!(r.cash_on_cash_return.value(), 0.0);
        assert_eq!(r.loan_to_value.value(), 0.0);
        assert!(r.projection.iter().all(|y| y.roi_percent == 0.0));
        assert_eq!(r.exit.annualized_irr, None);
    }

    #[test]
    fn test_zero_holding_period() {
        let mut inputs = reference();
        inputs.holding_period_years = 0;
        let r = calculate(&inputs);

        assert!(r.projection.is_empty());
        assert_eq!(r.exit.year, 0);
        assert_relative_eq!(r.exit.sale_price, 1_500_000.0);
        assert_relative_eq!(r.exit.remaining_loan_balance, 1_200_000.0);
        // Immediate resale loses selling costs and acquisition fees
        assert_relative_eq!(r.exit.total_return, -(30_000.0 + 60_000.0 + 30_000.0), epsilon = 1e-6);
    }

    #[test]
    fn test_zero_term() {
        let mut inputs = reference();
        inputs.mortgage_term_years = 0;
        let r = calculate(&inputs);

        assert_eq!(r.annual_mortgage_payment, 0.0);
        assert_relative_eq!(r.exit.remaining_loan_balance, 1_200_000.0);
        assert!(r.exit.total_return.is_finite());
    }

    #[test]
    fn test_holding_beyond_term() {
        let mut inputs = reference();
        inputs.mortgage_term_years = 3;
        inputs.holding_period_years = 5;
        let r = calculate(&inputs);

        assert!(r.projection[2].mortgage_payment > 0.0);
        assert_eq!(r.projection[3].mortgage_payment, 0.0);
        assert_relative_eq!(r.projection[4].principal_paid, 1_200_000.0, epsilon = 1e-4);
        assert_eq!(r.exit.remaining_loan_balance, 0.0);
    }

    #[test]
    fn test_non_finite_inputs_do_not_propagate() {
        let mut inputs = reference();
        inputs.expected_monthly_rent = f64::NAN;
        inputs.capital_growth_percent = Percent(f64::INFINITY);
        let r = calculate(&inputs);

        assert_eq!(r.gross_annual_rent, 0.0);
        assert_eq!(r.gross_rental_yield.value(), 0.0);
        assert!(r.annual_cash_flow.is_finite());
        assert!(r
            .projection
            .iter()
            .all(|y| y.property_value == inputs.purchase_price && y.total_return.is_finite()));
    }

    #[test]
    fn test_oversized_term_and_horizon_are_capped() {
        let mut inputs = reference();
        inputs.mortgage_term_years = u32::MAX;
        inputs.holding_period_years = u32::MAX;
        let r = calculate(&inputs);

        assert_eq!(r.projection.len(), MAX_HOLDING_YEARS as usize);
        assert!(r.monthly_mortgage_payment.is_finite() && r.monthly_mortgage_payment > 0.0);
        assert!(r.exit.remaining_loan_balance.abs() < 1e-6);

        inputs.mortgage_term_years = 400_000_000;
        inputs.holding_period_years = 5;
        let capped = calculate(&inputs);
        assert_eq!(capped.monthly_mortgage_payment, r.monthly_mortgage_payment);
    }

    #[test]
    fn test_overflowing_growth_keeps_value() {
        let mut inputs = reference();
        inputs.capital_growth_percent = Percent(1_000_000.0);
        inputs.holding_period_years = 100;
        let r = calculate(&inputs);

        let last = r.final_year().unwrap();
        assert_eq!(last.property_value, f64::MAX);
        assert!(last.appreciation > 0.0);
        assert!(last.equity_built > 0.0 && last.total_return.is_finite());
        for pair in r.projection.windows(2) {
            assert!(pair[1].property_value >= pair[0].property_value);
        }
    }

    #[test]
    fn test_extreme_rate_is_computed() {
        let mut inputs = reference();
        inputs.mortgage_interest_rate = Percent(200.0);
        let r = calculate(&inputs);

        assert!(r.annual_mortgage_payment > r.loan_amount);
        assert!(r.annual_cash_flow.is_finite());
    }
}
