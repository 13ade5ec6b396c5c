//! Load property inputs from CSV or JSON files

use super::PropertyInputs;
use crate::assumptions::MarketAssumptions;
use crate::error::{Result, RoiError};
use crate::rates::Percent;
use csv::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Raw CSV row. Optional columns fall back to market assumptions.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    purchase_price: f64,
    area_sqft: f64,
    expected_monthly_rent: f64,
    down_payment_percent: f64,
    mortgage_interest_rate: f64,
    mortgage_term_years: u32,
    #[serde(default)]
    service_charge_annual: Option<f64>,
    /// Alternative to `serviceChargeAnnual`: AED per sqft per year
    #[serde(default)]
    service_charge_per_sqft: Option<f64>,
    #[serde(default)]
    annual_maintenance_percent: Option<f64>,
    #[serde(default)]
    property_management_fee_percent: Option<f64>,
    #[serde(default)]
    dld_fee_percent: Option<f64>,
    #[serde(default)]
    agent_fee_percent: Option<f64>,
    #[serde(default)]
    capital_growth_percent: Option<f64>,
    #[serde(default)]
    rent_growth_percent: Option<f64>,
    #[serde(default)]
    vacancy_rate_percent: Option<f64>,
    #[serde(default)]
    holding_period_years: Option<u32>,
    #[serde(default)]
    insurance_annual: Option<f64>,
    #[serde(default)]
    other_costs_annual: Option<f64>,
    #[serde(default)]
    selling_cost_percent: Option<f64>,
}

impl CsvRow {
    fn into_inputs(self, row: usize, assumptions: &MarketAssumptions) -> Result<PropertyInputs> {
        for (name, value) in [
            ("purchasePrice", self.purchase_price),
            ("areaSqft", self.area_sqft),
            ("expectedMonthlyRent", self.expected_monthly_rent),
            ("downPaymentPercent", self.down_payment_percent),
            ("mortgageInterestRate", self.mortgage_interest_rate),
        ] {
            if !value.is_finite() {
                return Err(RoiError::InvalidRecord {
                    row,
                    reason: format!("{} is not a finite number", name),
                });
            }
        }

        let service_charge_annual = match (self.service_charge_annual, self.service_charge_per_sqft) {
            (Some(annual), _) => annual,
            (None, Some(rate)) => rate * self.area_sqft,
            (None, None) => 0.0,
        };

        let pct = |value: Option<f64>, default: Percent| value.map(Percent).unwrap_or(default);

        Ok(PropertyInputs {
            purchase_price: self.purchase_price,
            area_sqft: self.area_sqft,
            expected_monthly_rent: self.expected_monthly_rent,
            down_payment_percent: Percent(self.down_payment_percent),
            mortgage_interest_rate: Percent(self.mortgage_interest_rate),
            mortgage_term_years: self.mortgage_term_years,
            service_charge_annual,
            annual_maintenance_percent: pct(
                self.annual_maintenance_percent,
                assumptions.default_maintenance_percent,
            ),
            property_management_fee_percent: pct(
                self.property_management_fee_percent,
                assumptions.default_management_fee_percent,
            ),
            dld_fee_percent: pct(self.dld_fee_percent, assumptions.dld_fee_percent),
            agent_fee_percent: pct(self.agent_fee_percent, assumptions.agent_fee_percent),
            capital_growth_percent: pct(self.capital_growth_percent, Percent(0.0)),
            rent_growth_percent: pct(self.rent_growth_percent, Percent(0.0)),
            vacancy_rate_percent: pct(self.vacancy_rate_percent, assumptions.default_vacancy_percent),
            holding_period_years: self
                .holding_period_years
                .unwrap_or(assumptions.holding_period_years),
            insurance_annual: self.insurance_annual.unwrap_or(0.0),
            other_costs_annual: self.other_costs_annual.unwrap_or(0.0),
            selling_cost_percent: pct(self.selling_cost_percent, assumptions.selling_cost_percent),
        })
    }
}

/// Load all properties from a CSV file
pub fn load_properties<P: AsRef<Path>>(
    path: P,
    assumptions: &MarketAssumptions,
) -> Result<Vec<PropertyInputs>> {
    let file = File::open(path.as_ref())?;
    log::debug!("Loading properties from {}", path.as_ref().display());
    load_properties_from_reader(file, assumptions)
}

/// Load properties from any reader (e.g., string buffer, request body)
pub fn load_properties_from_reader<R: std::io::Read>(
    reader: R,
    assumptions: &MarketAssumptions,
) -> Result<Vec<PropertyInputs>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut properties = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // Row 1 is the header
        properties.push(row.into_inputs(idx + 2, assumptions)?);
    }

    log::info!("Loaded {} properties", properties.len());
    Ok(properties)
}

/// Load a single property record from a JSON file (camelCase field names)
pub fn load_property_json<P: AsRef<Path>>(path: P) -> Result<PropertyInputs> {
    let file = File::open(path)?;
    let inputs = serde_json::from_reader(BufReader::new(file))?;
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = "\
purchasePrice,areaSqft,expectedMonthlyRent,downPaymentPercent,mortgageInterestRate,mortgageTermYears,serviceChargePerSqft,vacancyRatePercent,holdingPeriodYears
1500000,1000,8000,20,5.5,25,15,5,
900000,650,5200,25,4.99,20,,,10
";

    #[test]
    fn test_load_properties_from_reader() {
        let assumptions = MarketAssumptions::dubai_defaults();
        let properties = load_properties_from_reader(SAMPLE.as_bytes(), &assumptions)
            .expect("Failed to load properties");

        assert_eq!(properties.len(), 2);

        let p1 = &properties[0];
        assert_relative_eq!(p1.service_charge_annual, 15_000.0);
        assert_eq!(p1.vacancy_rate_percent, Percent(5.0));
        assert_eq!(p1.holding_period_years, 5);
        assert_eq!(p1.dld_fee_percent, Percent(4.0));

        let p2 = &properties[1];
        assert_eq!(p2.service_charge_annual, 0.0);
        assert_eq!(p2.vacancy_rate_percent, assumptions.default_vacancy_percent);
        assert_eq!(p2.holding_period_years, 10);
    }

    #[test]
    fn test_load_sample_files() {
        let assumptions = MarketAssumptions::dubai_defaults();
        let properties = load_properties("data/properties_sample.csv", &assumptions)
            .expect("Failed to load sample properties");
        assert_eq!(properties.len(), 4);
        assert_eq!(properties[2].holding_period_years, 7);

        let reference = load_property_json("data/reference_property.json")
            .expect("Failed to load reference property");
        assert_eq!(reference, PropertyInputs::reference_scenario());
    }

    #[test]
    fn test_non_finite_field_rejected() {
        let data = "\
purchasePrice,areaSqft,expectedMonthlyRent,downPaymentPercent,mortgageInterestRate,mortgageTermYears
inf,1000,8000,20,5.5,25
";
        let err = load_properties_from_reader(data.as_bytes(), &MarketAssumptions::dubai_defaults())
            .unwrap_err();
        assert!(matches!(err, RoiError::InvalidRecord { row: 2, .. }));
    }
}
