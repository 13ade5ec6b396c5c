//! Percent and fraction newtypes
//!
//! Inputs arrive on the 0-100 scale the web form uses (`Percent`). The engine
//! works exclusively with 0-1 values (`Fraction`). The only conversion path is
//! `Percent::to_fraction`, called once per field when inputs are normalized.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A rate on the 0-100 scale, as entered by the user (e.g. `5.5` for 5.5%)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

/// A rate on the 0-1 scale (e.g. `0.055` for 5.5%)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fraction(pub f64);

impl Percent {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to fractional form. Non-finite values become zero.
    pub fn to_fraction(self) -> Fraction {
        Fraction(finite_or_zero(self.0) / 100.0)
    }
}

impl Fraction {
    pub const ZERO: Fraction = Fraction(0.0);

    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Apply this rate to an amount
    pub fn of(self, amount: f64) -> f64 {
        amount * self.0
    }

    /// Display-only conversion back to the 0-100 scale
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }

    /// `amount × (1 + rate)^periods`
    /// Overflow saturates at the largest finite value instead of going to
    /// infinity.
    pub fn compound(self, amount: f64, periods: u32) -> f64 {
        let periods = i32::try_from(periods).unwrap_or(i32::MAX);
        saturate(amount * (1.0 + self.0).powi(periods))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.as_percent())
    }
}

/// Division that resolves degenerate denominators to zero instead of NaN/inf
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let q = numerator / denominator;
    if q.is_finite() {
        q
    } else {
        0.0
    }
}

/// Clamp infinities to the largest finite value of the same sign. NaN becomes
/// zero.
pub(crate) fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percent_to_fraction() {
        assert_relative_eq!(Percent(5.5).to_fraction().value(), 0.055);
        assert_eq!(Percent(f64::NAN).to_fraction(), Fraction::ZERO);
    }

    #[test]
    fn test_compound() {
        let g = Percent(5.0).to_fraction();
        assert_relative_eq!(g.compound(1_500_000.0, 1), 1_575_000.0, epsilon = 1e-6);
        assert_relative_eq!(g.compound(100.0, 0), 100.0);
    }

    #[test]
    fn test_compound_saturates() {
        let g = Percent(1_000_000.0).to_fraction();
        assert_eq!(g.compound(1_500_000.0, 100), f64::MAX);
        assert_eq!(g.compound(-1.0, 100), f64::MIN);
        assert_eq!(g.compound(0.0, 100), 0.0);
        assert_eq!(Percent(5.0).to_fraction().compound(100.0, u32::MAX), f64::MAX);
    }

    #[test]
    fn test_ratio_degenerate() {
        assert_eq!(ratio(10.0, 0.0), 0.0);
        assert_eq!(ratio(f64::INFINITY, 1.0), 0.0);
        assert_relative_eq!(ratio(96_000.0, 1_500_000.0), 0.064);
    }
}
