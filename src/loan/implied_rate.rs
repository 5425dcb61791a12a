//! Solve for the annual rate implied by a quoted loan payment
//!
//! Inverts the amortization formula: given principal, level payment and term,
//! find the nominal annual rate that makes the payment stream's present value
//! equal the principal.

use log::debug;

use crate::error::{require_positive, require_term, CalcError, Result};
use crate::rates::{annuity_pv_factor, growth_factor, PERIODS_PER_YEAR};

const TOLERANCE: f64 = 1e-12;
/// Largest accepted PV mismatch, relative to the principal
const GAP_TOLERANCE: f64 = 1e-9;
const MAX_ITERATIONS: usize = 200;
/// Upper bound for the monthly rate search (1000% per month)
const MAX_MONTHLY_RATE: f64 = 10.0;

/// Annual percentage rate implied by `monthly_payment` on `principal` over `term_months`.
///
/// Returns 0 when the payments add up to exactly the principal.
///
/// # Errors
/// `InvalidInput` for non-positive or non-finite amounts, a zero term, or when the
/// payments total less than the principal (no non-negative rate exists).
pub fn implied_annual_rate(principal: f64, monthly_payment: f64, term_months: u32) -> Result<f64> {
    require_positive("principal", principal)?;
    require_positive("monthly_payment", monthly_payment)?;
    require_term(term_months)?;

    let total = monthly_payment * term_months as f64;
    if (total - principal).abs() <= TOLERANCE * principal {
        return Ok(0.0);
    }
    if total < principal {
        return Err(CalcError::invalid(
            "monthly_payment",
            monthly_payment,
            format!(
                "payments total {:.2}, less than the principal {:.2}",
                total, principal
            ),
        ));
    }

    let monthly = if term_months == 1 {
        monthly_payment / principal - 1.0
    } else {
        solve_newton(principal, monthly_payment, term_months)
            .or_else(|| solve_bisection(principal, monthly_payment, term_months))
            .ok_or_else(|| {
                CalcError::invalid(
                    "monthly_payment",
                    monthly_payment,
                    "no rate within range reproduces this payment",
                )
            })?
    };

    let annual_percent = monthly * PERIODS_PER_YEAR as f64 * 100.0;
    debug!(
        "Implied rate for {:.2} paying {:.2} x {}m: {:.6}%",
        principal, monthly_payment, term_months, annual_percent
    );
    Ok(annual_percent)
}

/// Present value of the payment stream minus the principal, and its derivative
fn pv_gap_and_derivative(principal: f64, payment: f64, n: u32, r: f64) -> (f64, f64) {
    let factor = annuity_pv_factor(r, n);
    let gap = payment * factor - principal;
    let discount = 1.0 / growth_factor(r, n + 1);
    let dfactor = (n as f64 * discount - factor) / r;
    (gap, payment * dfactor)
}

fn solve_newton(principal: f64, payment: f64, n: u32) -> Option<f64> {
    // Initial guess: 5% annual
    let mut rate = 0.05 / PERIODS_PER_YEAR as f64;

    for _ in 0..MAX_ITERATIONS {
        let (gap, dgap) = pv_gap_and_derivative(principal, payment, n, rate);
        if !dgap.is_finite() || dgap.abs() < 1e-20 {
            return None;
        }

        // A step outside the search range is left to bisection
        let new_rate = rate - gap / dgap;
        if !(TOLERANCE..MAX_MONTHLY_RATE).contains(&new_rate) {
            return None;
        }
        if (new_rate - rate).abs() < TOLERANCE {
            let (settled_gap, _) = pv_gap_and_derivative(principal, payment, n, new_rate);
            return (settled_gap.abs() <= GAP_TOLERANCE * principal).then_some(new_rate);
        }
        rate = new_rate;
    }

    None
}

fn solve_bisection(principal: f64, payment: f64, n: u32) -> Option<f64> {
    let gap = |r: f64| payment * annuity_pv_factor(r, n) - principal;

    // Gap is positive at zero and falls as the rate rises
    let mut low = 0.0_f64;
    let mut high = MAX_MONTHLY_RATE;
    if gap(high) > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        if (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }
        if gap(mid) > 0.0 {
            low = mid;
        } else {
            high = mid;
        }
    }

    Some((low + high) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::compute_loan_payment;

    #[test]
    fn test_recovers_quoted_rate() {
        for &(principal, rate, term) in &[
            (50_000.0, 5.99, 60),
            (250_000.0, 6.5, 360),
            (3_000.0, 24.0, 12),
            (10_000.0, 0.25, 48),
        ] {
            let payment = compute_loan_payment(principal, rate, term).unwrap().monthly_payment;
            let implied = implied_annual_rate(principal, payment, term).unwrap();
            assert!(
                (implied - rate).abs() < 1e-6,
                "Expected {}%, got {}%",
                rate,
                implied
            );
        }
    }

    #[test]
    fn test_interest_free_payments() {
        assert_eq!(implied_annual_rate(1_200.0, 100.0, 12).unwrap(), 0.0);
    }

    #[test]
    fn test_single_payment() {
        let implied = implied_annual_rate(1_000.0, 1_010.0, 1).unwrap();
        assert!((implied - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_bisection_agrees_with_newton() {
        let payment = compute_loan_payment(20_000.0, 9.0, 72).unwrap().monthly_payment;
        let newton = solve_newton(20_000.0, payment, 72).unwrap();
        let bisection = solve_bisection(20_000.0, payment, 72).unwrap();
        assert!((newton - bisection).abs() < 1e-9);
    }

    #[test]
    fn test_rate_reproduces_principal_across_payments() {
        for &payment in &[84.0, 90.0, 100.0, 150.0, 500.0, 2_000.0, 9_000.0, 9_900.0] {
            let annual = implied_annual_rate(1_000.0, payment, 12).unwrap();
            let r = annual / 1_200.0;
            let pv = payment * annuity_pv_factor(r, 12);
            assert!(
                (pv - 1_000.0).abs() < 1e-6,
                "payment {} -> {}% gives PV {}",
                payment,
                annual,
                pv
            );
        }
    }

    #[test]
    fn test_bisection_result_reproduces_principal() {
        // Newton overshoots below zero here and hands over to bisection
        let annual = implied_annual_rate(10_000.0, 208.5, 48).unwrap();
        let pv = 208.5 * annuity_pv_factor(annual / 1_200.0, 48);
        assert!((pv - 10_000.0).abs() < 1e-6, "got PV {}", pv);
    }

    #[test]
    fn test_rate_above_search_range_is_rejected() {
        // Requires more than 1000% per month
        let err = implied_annual_rate(100.0, 1_200.0, 12).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(solve_newton(100.0, 1_200.0, 12).is_none());
        assert!(solve_bisection(100.0, 1_200.0, 12).is_none());
    }

    #[test]
    fn test_underpayment_is_rejected() {
        let err = implied_annual_rate(10_000.0, 100.0, 12).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(implied_annual_rate(10_000.0, 0.0, 12).is_err());
        assert!(implied_annual_rate(10_000.0, 900.0, 0).is_err());
    }
}
