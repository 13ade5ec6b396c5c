//! Field-level input warnings for the calculator form
//!
//! Validation is advisory: it never alters inputs and `calculate` never calls
//! it. The form calls `validate` for the field being edited, or `validate_all`
//! before submitting.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::property::PropertyInputs;
use crate::rates::{ratio, Percent};

/// Interest rates above this are flagged as unusual for the UAE market
const HIGH_INTEREST_RATE: f64 = 15.0;
/// Minimum down payment for expatriate buyers on a first property under AED 5M
const MIN_EXPAT_DOWN_PAYMENT: f64 = 20.0;
const HIGH_VACANCY: f64 = 50.0;
const HIGH_SERVICE_CHARGE_PER_SQFT: f64 = 50.0;
const LOW_GROSS_YIELD: f64 = 0.03;
const HIGH_GROSS_YIELD: f64 = 0.15;
const MAX_TERM_YEARS: f64 = 30.0;
const MAX_HOLDING_YEARS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    PurchasePrice,
    AreaSqft,
    ExpectedMonthlyRent,
    DownPaymentPercent,
    MortgageInterestRate,
    MortgageTermYears,
    ServiceChargeAnnual,
    AnnualMaintenancePercent,
    PropertyManagementFeePercent,
    DldFeePercent,
    AgentFeePercent,
    CapitalGrowthPercent,
    RentGrowthPercent,
    VacancyRatePercent,
    HoldingPeriodYears,
    InsuranceAnnual,
    OtherCostsAnnual,
    SellingCostPercent,
}

impl InputField {
    pub const ALL: [InputField; 18] = [
        InputField::PurchasePrice,
        InputField::AreaSqft,
        InputField::ExpectedMonthlyRent,
        InputField::DownPaymentPercent,
        InputField::MortgageInterestRate,
        InputField::MortgageTermYears,
        InputField::ServiceChargeAnnual,
        InputField::AnnualMaintenancePercent,
        InputField::PropertyManagementFeePercent,
        InputField::DldFeePercent,
        InputField::AgentFeePercent,
        InputField::CapitalGrowthPercent,
        InputField::RentGrowthPercent,
        InputField::VacancyRatePercent,
        InputField::HoldingPeriodYears,
        InputField::InsuranceAnnual,
        InputField::OtherCostsAnnual,
        InputField::SellingCostPercent,
    ];

    /// Name as used in the form payload
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::PurchasePrice => "purchasePrice",
            InputField::AreaSqft => "areaSqft",
            InputField::ExpectedMonthlyRent => "expectedMonthlyRent",
            InputField::DownPaymentPercent => "downPaymentPercent",
            InputField::MortgageInterestRate => "mortgageInterestRate",
            InputField::MortgageTermYears => "mortgageTermYears",
            InputField::ServiceChargeAnnual => "serviceChargeAnnual",
            InputField::AnnualMaintenancePercent => "annualMaintenancePercent",
            InputField::PropertyManagementFeePercent => "propertyManagementFeePercent",
            InputField::DldFeePercent => "dldFeePercent",
            InputField::AgentFeePercent => "agentFeePercent",
            InputField::CapitalGrowthPercent => "capitalGrowthPercent",
            InputField::RentGrowthPercent => "rentGrowthPercent",
            InputField::VacancyRatePercent => "vacancyRatePercent",
            InputField::HoldingPeriodYears => "holdingPeriodYears",
            InputField::InsuranceAnnual => "insuranceAnnual",
            InputField::OtherCostsAnnual => "otherCostsAnnual",
            InputField::SellingCostPercent => "sellingCostPercent",
        }
    }

    /// Current value of this field in `inputs`, as a plain number
    pub fn value_in(&self, inputs: &PropertyInputs) -> f64 {
        match self {
            InputField::PurchasePrice => inputs.purchase_price,
            InputField::AreaSqft => inputs.area_sqft,
            InputField::ExpectedMonthlyRent => inputs.expected_monthly_rent,
            InputField::DownPaymentPercent => inputs.down_payment_percent.value(),
            InputField::MortgageInterestRate => inputs.mortgage_interest_rate.value(),
            InputField::MortgageTermYears => inputs.mortgage_term_years as f64,
            InputField::ServiceChargeAnnual => inputs.service_charge_annual,
            InputField::AnnualMaintenancePercent => inputs.annual_maintenance_percent.value(),
            InputField::PropertyManagementFeePercent => {
                inputs.property_management_fee_percent.value()
            }
            InputField::DldFeePercent => inputs.dld_fee_percent.value(),
            InputField::AgentFeePercent => inputs.agent_fee_percent.value(),
            InputField::CapitalGrowthPercent => inputs.capital_growth_percent.value(),
            InputField::RentGrowthPercent => inputs.rent_growth_percent.value(),
            InputField::VacancyRatePercent => inputs.vacancy_rate_percent.value(),
            InputField::HoldingPeriodYears => inputs.holding_period_years as f64,
            InputField::InsuranceAnnual => inputs.insurance_annual,
            InputField::OtherCostsAnnual => inputs.other_costs_annual,
            InputField::SellingCostPercent => inputs.selling_cost_percent.value(),
        }
    }

    fn is_money(&self) -> bool {
        matches!(
            self,
            InputField::PurchasePrice
                | InputField::AreaSqft
                | InputField::ExpectedMonthlyRent
                | InputField::ServiceChargeAnnual
                | InputField::InsuranceAnnual
                | InputField::OtherCostsAnnual
        )
    }

    /// Percent fields bounded to [0, 100]. Growth rates may be negative.
    fn is_bounded_percent(&self) -> bool {
        matches!(
            self,
            InputField::DownPaymentPercent
                | InputField::MortgageInterestRate
                | InputField::AnnualMaintenancePercent
                | InputField::PropertyManagementFeePercent
                | InputField::DldFeePercent
                | InputField::AgentFeePercent
                | InputField::VacancyRatePercent
                | InputField::SellingCostPercent
        )
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Info,
    Caution,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub field: InputField,
    pub severity: Severity,
    pub message: String,
}

impl Warning {
    fn new(field: InputField, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            field,
            severity,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}: {}", self.severity, self.field, self.message)
    }
}

/// Warnings for a single field holding `value`, judged against the rest of
/// the form in `context`
pub fn validate(field: InputField, value: f64, context: &PropertyInputs) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if !value.is_finite() {
        warnings.push(Warning::new(field, Severity::Error, "Value must be a number"));
        return warnings;
    }

    if field.is_money() && value < 0.0 {
        warnings.push(Warning::new(field, Severity::Error, "Value cannot be negative"));
    }

    if field.is_bounded_percent() && !(0.0..=100.0).contains(&value) {
        warnings.push(Warning::new(
            field,
            Severity::Error,
            format!("{} is outside 0-100%", Percent(value)),
        ));
    }

    match field {
        InputField::PurchasePrice if value == 0.0 => {
            warnings.push(Warning::new(
                field,
                Severity::Error,
                "Purchase price is required; yields cannot be computed without it",
            ));
        }
        InputField::PurchasePrice | InputField::ExpectedMonthlyRent => {
            let (price, rent) = match field {
                InputField::PurchasePrice => (value, context.expected_monthly_rent),
                _ => (context.purchase_price, value),
            };
            if price > 0.0 && rent > 0.0 {
                let gross_yield = ratio(rent * 12.0, price);
                if gross_yield < LOW_GROSS_YIELD {
                    warnings.push(Warning::new(
                        field,
                        Severity::Info,
                        format!("Gross yield of {:.2}% is below the typical market range", gross_yield * 100.0),
                    ));
                } else if gross_yield > HIGH_GROSS_YIELD {
                    warnings.push(Warning::new(
                        field,
                        Severity::Info,
                        format!("Gross yield of {:.2}% is unusually high; check the rent", gross_yield * 100.0),
                    ));
                }
            }
        }
        InputField::DownPaymentPercent if (0.0..MIN_EXPAT_DOWN_PAYMENT).contains(&value) => {
            warnings.push(Warning::new(
                field,
                Severity::Caution,
                "UAE lenders usually require at least 20% down for expatriate buyers",
            ));
        }
        InputField::MortgageInterestRate if value > HIGH_INTEREST_RATE && value <= 100.0 => {
            warnings.push(Warning::new(
                field,
                Severity::Caution,
                format!("{} is well above current mortgage rates", Percent(value)),
            ));
        }
        InputField::MortgageTermYears if value < 1.0 || value > MAX_TERM_YEARS => {
            warnings.push(Warning::new(
                field,
                Severity::Error,
                "Mortgage term must be between 1 and 30 years",
            ));
        }
        InputField::VacancyRatePercent if value > HIGH_VACANCY && value <= 100.0 => {
            warnings.push(Warning::new(
                field,
                Severity::Caution,
                "Vacancy above 50% is unusual for a let property",
            ));
        }
        InputField::ServiceChargeAnnual if context.area_sqft > 0.0 => {
            let per_sqft = value / context.area_sqft;
            if per_sqft > HIGH_SERVICE_CHARGE_PER_SQFT {
                warnings.push(Warning::new(
                    field,
                    Severity::Caution,
                    format!("Service charge of AED {:.2}/sqft is unusually high", per_sqft),
                ));
            }
        }
        InputField::HoldingPeriodYears if value < 1.0 || value > MAX_HOLDING_YEARS => {
            warnings.push(Warning::new(
                field,
                Severity::Caution,
                "Holding period should be between 1 and 30 years",
            ));
        }
        _ => {}
    }

    warnings
}

/// Warnings for every field of the form
pub fn validate_all(inputs: &PropertyInputs) -> Vec<Warning> {
    InputField::ALL
        .iter()
        .flat_map(|field| validate(*field, field.value_in(inputs), inputs))
        .collect()
}
