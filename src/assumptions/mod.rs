//! Market assumptions: fee policy and default rates for the Dubai market

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, RoiError};
use crate::rates::Percent;

/// Policy defaults applied when an input record leaves a field unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAssumptions {
    /// Dubai Land Department transfer fee
    pub dld_fee_percent: Percent,
    /// Buyer-side agent commission
    pub agent_fee_percent: Percent,
    /// Transaction cost on exit (agent + transfer costs borne by seller)
    pub selling_cost_percent: Percent,
    /// Projection horizon
    pub holding_period_years: u32,
    pub default_vacancy_percent: Percent,
    pub default_management_fee_percent: Percent,
    pub default_maintenance_percent: Percent,
}

impl MarketAssumptions {
    pub fn dubai_defaults() -> Self {
        Self {
            dld_fee_percent: Percent(4.0),
            agent_fee_percent: Percent(2.0),
            selling_cost_percent: Percent(2.0),
            holding_period_years: 5,
            default_vacancy_percent: Percent(5.0),
            default_management_fee_percent: Percent(5.0),
            default_maintenance_percent: Percent(1.0),
        }
    }

    /// Load assumptions from `market_defaults.csv` in the default location
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from `market_defaults.csv` in a specific directory.
    /// Keys absent from the file keep their Dubai default.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let overrides = loader::load_market_defaults(path)?;
        let mut assumptions = Self::dubai_defaults();
        for (key, value) in overrides {
            assumptions.apply(&key, &value)?;
        }
        log::debug!("Loaded market assumptions from {}: {:?}", path.display(), assumptions);
        Ok(assumptions)
    }

    /// Set one assumption by key
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || RoiError::InvalidAssumption {
            key: key.to_string(),
            value: value.to_string(),
        };
        let percent = || -> Result<Percent> {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Percent)
                .ok_or_else(invalid)
        };

        match key {
            "dld_fee_percent" => self.dld_fee_percent = percent()?,
            "agent_fee_percent" => self.agent_fee_percent = percent()?,
            "selling_cost_percent" => self.selling_cost_percent = percent()?,
            "default_vacancy_percent" => self.default_vacancy_percent = percent()?,
            "default_management_fee_percent" => self.default_management_fee_percent = percent()?,
            "default_maintenance_percent" => self.default_maintenance_percent = percent()?,
            "holding_period_years" => {
                self.holding_period_years = value.trim().parse().map_err(|_| invalid())?
            }
            other => return Err(RoiError::UnknownAssumption(other.to_string())),
        }
        Ok(())
    }
}

impl Default for MarketAssumptions {
    fn default() -> Self {
        Self::dubai_defaults()
    }
}
