//! Fixed-rate amortizing mortgage and its yearly schedule

use serde::{Deserialize, Serialize};

use crate::rates::Fraction;

/// Longest loan term modelled; longer terms are capped
pub const MAX_TERM_YEARS: u32 = 100;

/// A standard fixed-rate, monthly-amortizing loan
#[derive(Debug, Clone, Copy)]
pub struct Mortgage {
    principal: f64,
    annual_rate: Fraction,
    term_years: u32,
}

/// One loan year of the amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub opening_balance: f64,
    pub payment: f64,
    pub interest_paid: f64,
    pub principal_paid: f64,
    pub closing_balance: f64,
}

impl Mortgage {
    /// Negative or non-finite principals are treated as no loan. Terms
    /// beyond `MAX_TERM_YEARS` are capped.
    pub fn new(principal: f64, annual_rate: Fraction, term_years: u32) -> Self {
        let principal = if principal.is_finite() { principal.max(0.0) } else { 0.0 };
        Self {
            principal,
            annual_rate,
            term_years: term_years.min(MAX_TERM_YEARS),
        }
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn total_months(&self) -> u32 {
        self.term_years * 12
    }

    fn monthly_rate(&self) -> f64 {
        self.annual_rate.value() / 12.0
    }

    /// Level monthly payment
    ///
    /// `L·r / (1 − (1+r)^−n)` for r > 0, `L / n` for r == 0. A zero-length
    /// term or zero principal has no payment.
    pub fn monthly_payment(&self) -> f64 {
        let n = self.total_months();
        if n == 0 || self.principal <= 0.0 {
            return 0.0;
        }

        let r = self.monthly_rate();
        if r == 0.0 {
            return self.principal / n as f64;
        }

        let denom = 1.0 - (1.0 + r).powi(-(n as i32));
        let payment = self.principal * r / denom;
        if payment.is_finite() {
            payment
        } else {
            // r <= -1 or underflow in the discount term
            self.principal / n as f64
        }
    }

    pub fn annual_payment(&self) -> f64 {
        self.monthly_payment() * 12.0
    }

    /// Outstanding balance after `months` scheduled payments
    pub fn balance_after(&self, months: u32) -> f64 {
        let mut balance = self.principal;
        let payment = self.monthly_payment();
        let r = self.monthly_rate();

        for _ in 0..months.min(self.total_months()) {
            let interest = balance * r;
            balance -= (payment - interest).min(balance);
        }

        if months >= self.total_months() && self.total_months() > 0 {
            0.0
        } else {
            balance
        }
    }

    /// Full yearly schedule over the loan term
    pub fn schedule(&self) -> Vec<AmortizationYear> {
        (1..=self.term_years).map(|y| self.year(y)).collect()
    }

    /// Schedule row for loan year `year` (1-indexed). Years past the term
    /// return a zero-payment row with the closing balance carried forward.
    pub fn year(&self, year: u32) -> AmortizationYear {
        if year == 0 {
            return AmortizationYear {
                year,
                opening_balance: self.principal,
                closing_balance: self.principal,
                ..Default::default()
            };
        }

        let payment = self.monthly_payment();
        let r = self.monthly_rate();
        let first_month = (year - 1).saturating_mul(12);
        let opening_balance = self.balance_after(first_month);

        let mut row = AmortizationYear {
            year,
            opening_balance,
            closing_balance: opening_balance,
            ..Default::default()
        };

        let term = self.total_months();
        let mut balance = opening_balance;
        for month in first_month..first_month.saturating_add(12).min(term) {
            let interest = balance * r;
            // Final payment absorbs floating-point residue
            let principal = if month + 1 == term {
                balance
            } else {
                (payment - interest).min(balance)
            };
            row.interest_paid += interest;
            row.principal_paid += principal;
            row.payment += interest + principal;
            balance -= principal;
        }
        row.closing_balance = balance.max(0.0);

        row
    }
}
