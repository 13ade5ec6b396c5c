//! Property input record as submitted by the calculator form

use serde::{Deserialize, Serialize};

use crate::assumptions::MarketAssumptions;
use crate::calculator::mortgage::MAX_TERM_YEARS;
use crate::rates::{finite_or_zero, Fraction, Percent};

/// Inputs for a single ROI calculation
///
/// Money amounts are AED. Every `Percent` field is on the 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInputs {
    pub purchase_price: f64,
    pub area_sqft: f64,
    pub expected_monthly_rent: f64,

    /// Down payment as % of purchase price
    pub down_payment_percent: Percent,

    /// Annual nominal mortgage rate
    pub mortgage_interest_rate: Percent,

    pub mortgage_term_years: u32,

    /// Annual service charge (per-sqft rate × area)
    pub service_charge_annual: f64,

    /// Maintenance reserve as % of purchase price
    pub annual_maintenance_percent: Percent,

    /// Management fee as % of gross rental income
    pub property_management_fee_percent: Percent,

    /// Dubai Land Department transfer fee
    #[serde(default = "default_dld_fee")]
    pub dld_fee_percent: Percent,

    #[serde(default = "default_agent_fee")]
    pub agent_fee_percent: Percent,

    pub capital_growth_percent: Percent,
    pub rent_growth_percent: Percent,
    pub vacancy_rate_percent: Percent,

    #[serde(default = "default_holding_period")]
    pub holding_period_years: u32,

    #[serde(default)]
    pub insurance_annual: f64,

    #[serde(default)]
    pub other_costs_annual: f64,

    /// Transaction cost on sale at the end of the holding period
    #[serde(default = "default_selling_cost")]
    pub selling_cost_percent: Percent,
}

fn default_dld_fee() -> Percent {
    MarketAssumptions::dubai_defaults().dld_fee_percent
}
fn default_agent_fee() -> Percent {
    MarketAssumptions::dubai_defaults().agent_fee_percent
}
fn default_holding_period() -> u32 {
    MarketAssumptions::dubai_defaults().holding_period_years
}
fn default_selling_cost() -> Percent {
    MarketAssumptions::dubai_defaults().selling_cost_percent
}

/// Longest holding period projected; longer periods are capped
pub const MAX_HOLDING_YEARS: u32 = 100;

/// Every percent input converted to fractional form
#[derive(Debug, Clone, Copy)]
pub struct NormalizedRates {
    pub down_payment: Fraction,
    pub mortgage_interest: Fraction,
    pub maintenance: Fraction,
    pub management_fee: Fraction,
    pub dld_fee: Fraction,
    pub agent_fee: Fraction,
    pub capital_growth: Fraction,
    pub rent_growth: Fraction,
    pub vacancy: Fraction,
    pub selling_cost: Fraction,
}

impl PropertyInputs {
    /// Inputs with market defaults for everything except price, area and rent
    pub fn with_defaults(
        assumptions: &MarketAssumptions,
        purchase_price: f64,
        area_sqft: f64,
        expected_monthly_rent: f64,
    ) -> Self {
        Self {
            purchase_price,
            area_sqft,
            expected_monthly_rent,
            down_payment_percent: Percent(20.0),
            mortgage_interest_rate: Percent(4.5),
            mortgage_term_years: 25,
            service_charge_annual: 0.0,
            annual_maintenance_percent: assumptions.default_maintenance_percent,
            property_management_fee_percent: assumptions.default_management_fee_percent,
            dld_fee_percent: assumptions.dld_fee_percent,
            agent_fee_percent: assumptions.agent_fee_percent,
            capital_growth_percent: Percent(0.0),
            rent_growth_percent: Percent(0.0),
            vacancy_rate_percent: assumptions.default_vacancy_percent,
            holding_period_years: assumptions.holding_period_years,
            insurance_annual: 0.0,
            other_costs_annual: 0.0,
            selling_cost_percent: assumptions.selling_cost_percent,
        }
    }

    /// Set the annual service charge from a per-sqft rate
    pub fn with_service_charge_rate(mut self, rate_per_sqft: f64) -> Self {
        self.service_charge_annual = rate_per_sqft * self.area_sqft;
        self
    }

    /// Gross annual rent before vacancy
    pub fn gross_annual_rent(&self) -> f64 {
        self.expected_monthly_rent * 12.0
    }

    /// Convert every percent field to a fraction. This is the only place the
    /// 0-100 to 0-1 conversion happens.
    pub fn rates(&self) -> NormalizedRates {
        NormalizedRates {
            down_payment: self.down_payment_percent.to_fraction(),
            mortgage_interest: self.mortgage_interest_rate.to_fraction(),
            maintenance: self.annual_maintenance_percent.to_fraction(),
            management_fee: self.property_management_fee_percent.to_fraction(),
            dld_fee: self.dld_fee_percent.to_fraction(),
            agent_fee: self.agent_fee_percent.to_fraction(),
            capital_growth: self.capital_growth_percent.to_fraction(),
            rent_growth: self.rent_growth_percent.to_fraction(),
            vacancy: self.vacancy_rate_percent.to_fraction(),
            selling_cost: self.selling_cost_percent.to_fraction(),
        }
    }

    /// Copy with non-finite amounts and rates replaced by zero, and the loan
    /// term and holding period capped at `MAX_TERM_YEARS` and
    /// `MAX_HOLDING_YEARS`
    ///
    /// Returns the sanitized copy and the names of the fields that were replaced.
    pub fn sanitized(&self) -> (Self, Vec<&'static str>) {
        let mut clean = self.clone();
        let mut replaced = Vec::new();

        let money: [(&'static str, &mut f64); 6] = [
            ("purchasePrice", &mut clean.purchase_price),
            ("areaSqft", &mut clean.area_sqft),
            ("expectedMonthlyRent", &mut clean.expected_monthly_rent),
            ("serviceChargeAnnual", &mut clean.service_charge_annual),
            ("insuranceAnnual", &mut clean.insurance_annual),
            ("otherCostsAnnual", &mut clean.other_costs_annual),
        ];
        for (name, value) in money {
            if !value.is_finite() {
                *value = finite_or_zero(*value);
                replaced.push(name);
            }
        }

        let percents: [(&'static str, &mut Percent); 10] = [
            ("downPaymentPercent", &mut clean.down_payment_percent),
            ("mortgageInterestRate", &mut clean.mortgage_interest_rate),
            ("annualMaintenancePercent", &mut clean.annual_maintenance_percent),
            ("propertyManagementFeePercent", &mut clean.property_management_fee_percent),
            ("dldFeePercent", &mut clean.dld_fee_percent),
            ("agentFeePercent", &mut clean.agent_fee_percent),
            ("capitalGrowthPercent", &mut clean.capital_growth_percent),
            ("rentGrowthPercent", &mut clean.rent_growth_percent),
            ("vacancyRatePercent", &mut clean.vacancy_rate_percent),
            ("sellingCostPercent", &mut clean.selling_cost_percent),
        ];
        for (name, pct) in percents {
            if !pct.0.is_finite() {
                pct.0 = 0.0;
                replaced.push(name);
            }
        }

        if clean.mortgage_term_years > MAX_TERM_YEARS {
            clean.mortgage_term_years = MAX_TERM_YEARS;
            replaced.push("mortgageTermYears");
        }
        if clean.holding_period_years > MAX_HOLDING_YEARS {
            clean.holding_period_years = MAX_HOLDING_YEARS;
            replaced.push("holdingPeriodYears");
        }

        (clean, replaced)
    }

    /// Reference scenario used by the CLI and tests
    pub fn reference_scenario() -> Self {
        Self {
            purchase_price: 1_500_000.0,
            area_sqft: 1_000.0,
            expected_monthly_rent: 8_000.0,
            down_payment_percent: Percent(20.0),
            mortgage_interest_rate: Percent(5.5),
            mortgage_term_years: 25,
            service_charge_annual: 15_000.0,
            annual_maintenance_percent: Percent(1.0),
            property_management_fee_percent: Percent(5.0),
            dld_fee_percent: Percent(4.0),
            agent_fee_percent: Percent(2.0),
            capital_growth_percent: Percent(5.0),
            rent_growth_percent: Percent(3.0),
            vacancy_rate_percent: Percent(5.0),
            holding_period_years: 5,
            insurance_annual: 2_000.0,
            other_costs_annual: 1_000.0,
            selling_cost_percent: Percent(2.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_service_charge_from_rate() {
        let inputs = PropertyInputs::with_defaults(
            &MarketAssumptions::dubai_defaults(),
            1_200_000.0,
            850.0,
            7_000.0,
        )
        .with_service_charge_rate(18.0);

        assert_relative_eq!(inputs.service_charge_annual, 15_300.0);
        assert_eq!(inputs.dld_fee_percent, Percent(4.0));
        assert_eq!(inputs.holding_period_years, 5);
    }

    #[test]
    fn test_sanitized_replaces_non_finite() {
        let mut inputs = PropertyInputs::reference_scenario();
        inputs.expected_monthly_rent = f64::NAN;
        inputs.vacancy_rate_percent = Percent(f64::INFINITY);

        let (clean, replaced) = inputs.sanitized();
        assert_eq!(clean.expected_monthly_rent, 0.0);
        assert_eq!(clean.vacancy_rate_percent, Percent(0.0));
        assert_eq!(replaced, vec!["expectedMonthlyRent", "vacancyRatePercent"]);
    }

    #[test]
    fn test_sanitized_caps_years() {
        let mut inputs = PropertyInputs::reference_scenario();
        inputs.mortgage_term_years = u32::MAX;
        inputs.holding_period_years = u32::MAX;

        let (clean, replaced) = inputs.sanitized();
        assert_eq!(clean.mortgage_term_years, MAX_TERM_YEARS);
        assert_eq!(clean.holding_period_years, MAX_HOLDING_YEARS);
        assert_eq!(replaced, vec!["mortgageTermYears", "holdingPeriodYears"]);

        let (untouched, replaced) = PropertyInputs::reference_scenario().sanitized();
        assert_eq!(untouched, PropertyInputs::reference_scenario());
        assert!(replaced.is_empty());
    }

    #[test]
    fn test_json_defaults_applied() {
        let json = r#"{
            "purchasePrice": 900000, "areaSqft": 700, "expectedMonthlyRent": 5500,
            "downPaymentPercent": 25, "mortgageInterestRate": 4.99, "mortgageTermYears": 20,
            "serviceChargeAnnual": 10500, "annualMaintenancePercent": 1,
            "propertyManagementFeePercent": 5, "capitalGrowthPercent": 3,
            "rentGrowthPercent": 2, "vacancyRatePercent": 5
        }"#;
        let inputs: PropertyInputs = serde_json::from_str(json).unwrap();

        assert_eq!(inputs.dld_fee_percent, Percent(4.0));
        assert_eq!(inputs.agent_fee_percent, Percent(2.0));
        assert_eq!(inputs.selling_cost_percent, Percent(2.0));
        assert_eq!(inputs.holding_period_years, 5);
        assert_eq!(inputs.insurance_annual, 0.0);
    }
}
