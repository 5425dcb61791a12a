//! Fixed monthly payment for an amortizing loan

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_positive, require_term, Result};
use crate::rates::{annuity_pv_factor, ensure_finite, monthly_rate};

/// Loan terms as entered on the loan calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed
    pub principal: f64,
    /// Nominal annual rate in percent (5.99 for 5.99%)
    pub annual_rate_percent: f64,
    /// Number of monthly payments
    pub term_months: u32,
}

impl LoanInput {
    pub fn new(principal: f64, annual_rate_percent: f64, term_months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
        }
    }

    /// Check every precondition before any arithmetic runs
    pub fn validate(&self) -> Result<()> {
        require_positive("principal", self.principal)?;
        require_non_negative("annual_rate_percent", self.annual_rate_percent)?;
        require_term(self.term_months)?;
        Ok(())
    }

    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.annual_rate_percent)
    }

    pub fn compute(&self) -> Result<LoanResult> {
        compute_loan_payment(self.principal, self.annual_rate_percent, self.term_months)
    }
}

/// Payment and lifetime totals for a loan.
///
/// `total_payment == monthly_payment * term_months` and
/// `total_interest == total_payment - principal`. Values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

/// Compute the level monthly payment that retires `principal` over `term_months`.
///
/// Uses the standard annuity formula `P * r / (1 - (1 + r)^-n)` with
/// `r = annual_rate_percent / 100 / 12`; at a zero rate the payment is `P / n`.
///
/// # Errors
/// `InvalidInput` when `principal <= 0`, the rate is negative, `term_months == 0`,
/// any input is not finite, or the totals overflow.
pub fn compute_loan_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_months: u32,
) -> Result<LoanResult> {
    LoanInput::new(principal, annual_rate_percent, term_months).validate()?;

    let r = monthly_rate(annual_rate_percent);
    let monthly_payment = if r > 0.0 {
        principal / annuity_pv_factor(r, term_months)
    } else {
        principal / term_months as f64
    };

    let total_payment = ensure_finite(monthly_payment * term_months as f64, term_months)?;
    // Floating-point residue can push a zero-rate loan a hair below zero
    let total_interest = (total_payment - principal).max(0.0);

    debug!(
        "Loan {:.2} @ {}% x {}m: payment={:.6} total={:.6} interest={:.6}",
        principal, annual_rate_percent, term_months, monthly_payment, total_payment, total_interest
    );

    Ok(LoanResult {
        monthly_payment,
        total_payment,
        total_interest,
    })
}
