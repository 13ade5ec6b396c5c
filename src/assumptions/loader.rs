//! CSV-based assumption loader
//!
//! Reads `key,value` pairs from data/assumptions/market_defaults.csv

use std::fs::File;
use std::path::Path;

use crate::error::Result;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// File name of the market defaults table
pub const MARKET_DEFAULTS_FILE: &str = "market_defaults.csv";

/// Load raw `(key, value)` pairs from the market defaults table
pub fn load_market_defaults(path: &Path) -> Result<Vec<(String, String)>> {
    let file = File::open(path.join(MARKET_DEFAULTS_FILE))?;
    load_market_defaults_from_reader(file)
}

/// Load raw `(key, value)` pairs from any reader
pub fn load_market_defaults_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<(String, String)>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut pairs = Vec::new();

    for result in reader.records() {
        let record = result?;
        let key = record.get(0).unwrap_or_default().trim();
        if key.is_empty() {
            continue;
        }
        let value = record.get(1).unwrap_or_default().to_string();
        pairs.push((key.to_string(), value));
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_pairs_skips_blank_keys() {
        let data = "key,value\ndld_fee_percent,4\n,\nholding_period_years,7\n";
        let pairs = load_market_defaults_from_reader(data.as_bytes()).unwrap();

        assert_eq!(
            pairs,
            vec![
                ("dld_fee_percent".to_string(), "4".to_string()),
                ("holding_period_years".to_string(), "7".to_string()),
            ]
        );
    }
}
