//! Internal Rate of Return (IRR) calculation
//!
//! Used for the annualized return of a buy, hold and sell scenario

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;

/// Calculate the IRR of a series of cash flows using Newton-Raphson,
/// falling back to bisection when the derivative vanishes or iteration stalls.
///
/// # Arguments
/// * `cashflows` - Cash flows per period, index 0 = today (positive = inflow)
/// * `periods_per_year` - Number of periods per year (1 for annual)
///
/// # Returns
/// Annual IRR as a decimal (e.g., 0.05 for 5%), or None if no solution exists
pub fn calculate_irr(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    if cashflows.is_empty() || cashflows.iter().any(|cf| !cf.is_finite()) {
        return None;
    }

    if cashflows.iter().all(|&cf| cf.abs() < TOLERANCE) {
        return Some(0.0);
    }

    // An IRR needs at least one sign change
    let has_positive = cashflows.iter().any(|&cf| cf > TOLERANCE);
    let has_negative = cashflows.iter().any(|&cf| cf < -TOLERANCE);
    if !has_positive || !has_negative {
        return None;
    }

    let periods_per_year = periods_per_year.max(1);
    let mut rate = 0.05 / periods_per_year as f64;

    for _ in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 {
            return irr_bisection(cashflows, periods_per_year);
        }

        let new_rate = (rate - npv / dnpv).clamp(-0.99, 10.0);

        if (new_rate - rate).abs() < TOLERANCE {
            return Some(annualize(new_rate, periods_per_year));
        }

        rate = new_rate;
    }

    irr_bisection(cashflows, periods_per_year)
}

/// IRR of a hold: pay `initial_investment` today, collect `yearly_cash_flows`
/// at each year end, and receive `net_sale_proceeds` with the final year
pub fn hold_period_irr(
    initial_investment: f64,
    yearly_cash_flows: &[f64],
    net_sale_proceeds: f64,
) -> Option<f64> {
    let mut flows = Vec::with_capacity(yearly_cash_flows.len() + 1);
    flows.push(-initial_investment);
    flows.extend_from_slice(yearly_cash_flows);

    if yearly_cash_flows.is_empty() {
        // Sold immediately: proceeds arrive one period later by convention
        flows.push(net_sale_proceeds);
    } else {
        let last = flows.len() - 1;
        flows[last] += net_sale_proceeds;
    }

    calculate_irr(&flows, 1)
}

fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

/// NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

fn irr_bisection(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    let mut low = -0.99_f64;
    let mut high = 10.0_f64;

    let mut npv_low = npv_at_rate(cashflows, low);
    if npv_low * npv_at_rate(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(annualize(mid, periods_per_year));
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple_irr() {
        // 1000 out, 1100 back after one year
        let irr = calculate_irr(&[-1000.0, 1100.0], 1).unwrap();
        assert_relative_eq!(irr, 0.10, epsilon = 1e-8);
    }

    #[test]
    fn test_monthly_irr_annualized() {
        let mut cashflows = vec![-1000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1100.0);

        let irr = calculate_irr(&cashflows, 12).unwrap();
        assert!((irr - 0.10).abs() < 0.001, "Expected ~10% IRR, got {}", irr);
    }

    #[test]
    fn test_no_sign_change() {
        assert_eq!(calculate_irr(&[100.0, 200.0], 1), None);
        assert_eq!(calculate_irr(&[], 1), None);
        assert_eq!(calculate_irr(&[0.0, 0.0], 1), Some(0.0));
    }

    #[test]
    fn test_hold_period_irr() {
        // 100k in, 5k/yr for 2 years, sale nets 110k at end of year 2
        let irr = hold_period_irr(100_000.0, &[5_000.0, 5_000.0], 110_000.0).unwrap();
        let npv = -100_000.0 + 5_000.0 / (1.0 + irr) + 115_000.0 / (1.0 + irr).powi(2);
        assert_relative_eq!(npv, 0.0, epsilon = 1e-4);

        // Immediate resale at cost
        let flat = hold_period_irr(100_000.0, &[], 100_000.0).unwrap();
        assert_relative_eq!(flat, 0.0, epsilon = 1e-8);
    }
}
