//! # Time-Value-of-Money Formulas
//!
//! ## Notation
//!
//! - `P` = Principal (present value)
//! - `r` = Nominal annual rate as a decimal (5 % → 0.05)
//! - `n` = Compounding periods per year
//! - `m` = Contributions per year
//! - `t` = Time in years
//! - `PMT` = Contribution per contribution period
//!
//! Contributions are made at the end of each contribution period (ordinary
//! annuity). When `m ≠ n`, each contribution compounds at the effective rate
//! per contribution period, `i = (1 + r/n)^(n/m) − 1`.

/// Growth factor of a balance over `years`: (1 + r/n)^(n·t)
///
/// # Example
/// ```
/// use calc_core::equations::finance::growth_factor;
/// let f = growth_factor(0.05, 1.0, 10.0);
/// assert!((1000.0 * f - 1628.894627).abs() < 1e-6);
/// ```
#[inline]
pub fn growth_factor(annual_rate: f64, periods_per_year: f64, years: f64) -> f64 {
    (1.0 + annual_rate / periods_per_year).powf(periods_per_year * years)
}

/// Effective annual rate (1 + r/n)^n − 1
#[inline]
pub fn effective_annual_rate(annual_rate: f64, periods_per_year: f64) -> f64 {
    growth_factor(annual_rate, periods_per_year, 1.0) - 1.0
}

/// Rate per contribution period equivalent to `r` compounded `n` times a year
#[inline]
pub fn rate_per_contribution(annual_rate: f64, periods_per_year: f64, contributions_per_year: f64) -> f64 {
    (1.0 + annual_rate / periods_per_year).powf(periods_per_year / contributions_per_year) - 1.0
}

/// Future value of an ordinary annuity: PMT·((1 + i)^k − 1) / i
///
/// Falls back to PMT·k when `i` is zero.
pub fn annuity_future_value(payment: f64, rate_per_period: f64, payments: f64) -> f64 {
    if rate_per_period == 0.0 {
        payment * payments
    } else {
        payment * ((1.0 + rate_per_period).powf(payments) - 1.0) / rate_per_period
    }
}

/// Future value with contributions:
/// A = P(1 + r/n)^(nt) + PMT·((1 + i)^(mt) − 1) / i
pub fn future_value(
    principal: f64,
    annual_rate: f64,
    periods_per_year: f64,
    years: f64,
    payment: f64,
    contributions_per_year: f64,
) -> f64 {
    let balance = principal * growth_factor(annual_rate, periods_per_year, years);
    if payment == 0.0 {
        return balance;
    }
    let i = rate_per_contribution(annual_rate, periods_per_year, contributions_per_year);
    balance + annuity_future_value(payment, i, contributions_per_year * years)
}

/// Return on investment in percent: (final − initial) / initial × 100
#[inline]
pub fn roi_percent(initial: f64, final_value: f64) -> f64 {
    (final_value - initial) / initial * 100.0
}

/// Compound annual growth rate in percent: ((final / initial)^(1/t) − 1) × 100
#[inline]
pub fn cagr_percent(initial: f64, final_value: f64, years: f64) -> f64 {
    ((final_value / initial).powf(1.0 / years) - 1.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_factor_baseline() {
        let balance = 1000.0 * growth_factor(0.05, 1.0, 10.0);
        assert!((balance - 1628.89).abs() < 0.01);
    }

    #[test]
    fn test_monthly_compounding() {
        // 1000 at 6% monthly for 1 year: 1000 × 1.005^12
        let balance = 1000.0 * growth_factor(0.06, 12.0, 1.0);
        assert!((balance - 1061.68).abs() < 0.01);
        assert!((effective_annual_rate(0.06, 12.0) - 0.061_678).abs() < 1e-6);
    }

    #[test]
    fn test_annuity_matches_simple_sum_at_zero_rate() {
        assert_eq!(annuity_future_value(100.0, 0.0, 12.0), 1200.0);
    }

    #[test]
    fn test_future_value_with_matching_frequencies() {
        // 100/month at 12%/yr compounded monthly for 1 year:
        // 100 × (1.01^12 − 1) / 0.01 = 1268.25
        let fv = future_value(0.0, 0.12, 12.0, 1.0, 100.0, 12.0);
        assert!((fv - 1268.25).abs() < 0.01);
    }

    #[test]
    fn test_contribution_rate_equivalence() {
        // Monthly contributions with annual compounding compound at 1.05^(1/12) − 1
        let i = rate_per_contribution(0.05, 1.0, 12.0);
        assert!(((1.0 + i).powi(12) - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_roi_and_cagr() {
        assert_eq!(roi_percent(10_000.0, 12_500.0), 25.0);
        assert!((cagr_percent(10_000.0, 12_500.0, 1.0) - 25.0).abs() < 1e-9);
        // Doubling in 10 years ≈ 7.177% per year
        assert!((cagr_percent(100.0, 200.0, 10.0) - 7.177_346).abs() < 1e-5);
    }
}
