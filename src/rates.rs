//! Periodic-rate helpers shared by the loan and savings calculators
//!
//! Every calculator quotes a nominal annual percentage rate and compounds
//! monthly at `annual / 100 / 12`. Annuity factors go through `ln_1p` /
//! `exp_m1` so very small rates keep full precision instead of cancelling
//! in `(1 + r)^n - 1`.

use crate::error::{CalcError, Result};

/// Compounding periods per year
pub const PERIODS_PER_YEAR: u32 = 12;

/// Convert a nominal annual percentage (5.99 for 5.99%) to a monthly decimal rate
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / PERIODS_PER_YEAR as f64
}

/// `(1 + r)^n`
pub fn growth_factor(monthly_rate: f64, periods: u32) -> f64 {
    match i32::try_from(periods) {
        Ok(n) => (1.0 + monthly_rate).powi(n),
        Err(_) => (1.0 + monthly_rate).powf(periods as f64),
    }
}

/// Future value of 1 paid at the end of each of `periods` months: `((1 + r)^n - 1) / r`
pub fn annuity_fv_factor(monthly_rate: f64, periods: u32) -> f64 {
    if monthly_rate == 0.0 {
        return periods as f64;
    }
    (periods as f64 * monthly_rate.ln_1p()).exp_m1() / monthly_rate
}

/// Present value of 1 paid at the end of each of `periods` months: `(1 - (1 + r)^-n) / r`
pub fn annuity_pv_factor(monthly_rate: f64, periods: u32) -> f64 {
    if monthly_rate == 0.0 {
        return periods as f64;
    }
    -(-(periods as f64) * monthly_rate.ln_1p()).exp_m1() / monthly_rate
}

/// Annual percentage yield for a nominal annual rate compounded monthly
///
/// 5.0 (nominal) -> ~5.116 (APY)
pub fn effective_annual_rate(annual_rate_percent: f64) -> f64 {
    let r = monthly_rate(annual_rate_percent);
    (growth_factor(r, PERIODS_PER_YEAR) - 1.0) * 100.0
}

/// Fail with `InvalidInput` when a derived figure left double precision range
pub(crate) fn ensure_finite(value: f64, term_months: u32) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid(
            "term_months",
            term_months as f64,
            "rate and term overflow double precision",
        ))
    }
}
