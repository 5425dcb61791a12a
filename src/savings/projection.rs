//! Compound-savings projection with a level monthly contribution

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_term, Result};
use crate::rates::{annuity_fv_factor, ensure_finite, growth_factor, monthly_rate};

/// Savings plan as entered on the savings calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsInput {
    pub initial_deposit: f64,
    /// Deposited at the end of every month
    pub monthly_contribution: f64,
    /// Nominal annual rate in percent, compounded monthly
    pub annual_rate_percent: f64,
    pub term_months: u32,
}

impl SavingsInput {
    pub fn new(
        initial_deposit: f64,
        monthly_contribution: f64,
        annual_rate_percent: f64,
        term_months: u32,
    ) -> Self {
        Self {
            initial_deposit,
            monthly_contribution,
            annual_rate_percent,
            term_months,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_non_negative("initial_deposit", self.initial_deposit)?;
        require_non_negative("monthly_contribution", self.monthly_contribution)?;
        require_non_negative("annual_rate_percent", self.annual_rate_percent)?;
        require_term(self.term_months)?;
        Ok(())
    }

    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.annual_rate_percent)
    }

    pub fn compute(&self) -> Result<SavingsResult> {
        project_savings(
            self.initial_deposit,
            self.monthly_contribution,
            self.annual_rate_percent,
            self.term_months,
        )
    }
}

/// Projected balance after the term.
///
/// `total_contributions == initial_deposit + monthly_contribution * term_months`
/// and `total_interest == final_balance - total_contributions`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsResult {
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
}

/// Future value of the initial deposit alone: `initial_deposit * (1 + r)^n`
pub(crate) fn fv_initial(initial_deposit: f64, r: f64, term_months: u32) -> f64 {
    // An overflowing factor times zero would be NaN
    if initial_deposit == 0.0 {
        return 0.0;
    }
    initial_deposit * growth_factor(r, term_months)
}

/// Assemble totals for an already-validated plan
pub(crate) fn savings_totals(
    initial_deposit: f64,
    monthly_contribution: f64,
    r: f64,
    term_months: u32,
) -> Result<SavingsResult> {
    let fv_contrib = if monthly_contribution == 0.0 {
        0.0
    } else {
        monthly_contribution * annuity_fv_factor(r, term_months)
    };
    let final_balance = ensure_finite(
        fv_initial(initial_deposit, r, term_months) + fv_contrib,
        term_months,
    )?;
    let total_contributions = initial_deposit + monthly_contribution * term_months as f64;
    let total_interest = (final_balance - total_contributions).max(0.0);

    Ok(SavingsResult {
        final_balance,
        total_contributions,
        total_interest,
    })
}

/// Project the balance of a savings plan after `term_months`.
///
/// The deposit compounds for the full term; contributions form an ordinary
/// annuity `C * ((1 + r)^n - 1) / r` (or `C * n` at a zero rate).
///
/// # Errors
/// `InvalidInput` for negative or non-finite amounts or rate, a zero term, or
/// a balance that overflows.
pub fn project_savings(
    initial_deposit: f64,
    monthly_contribution: f64,
    annual_rate_percent: f64,
    term_months: u32,
) -> Result<SavingsResult> {
    let input = SavingsInput::new(
        initial_deposit,
        monthly_contribution,
        annual_rate_percent,
        term_months,
    );
    input.validate()?;

    let result = savings_totals(
        initial_deposit,
        monthly_contribution,
        input.monthly_rate(),
        term_months,
    )?;

    debug!(
        "Savings {:.2} + {:.2}/m @ {}% x {}m: balance={:.6} interest={:.6}",
        initial_deposit,
        monthly_contribution,
        annual_rate_percent,
        term_months,
        result.final_balance,
        result.total_interest
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_known_plan() {
        // 1000 up front, 200/month, 3.25% for five years
        let result = project_savings(1_000.0, 200.0, 3.25, 60).unwrap();
        let r: f64 = 3.25 / 100.0 / 12.0;
        let g = (1.0 + r).powi(60);
        let oracle = 1_000.0 * g + 200.0 * (g - 1.0) / r;

        assert_relative_eq!(result.final_balance, oracle, max_relative = 1e-10);
        assert!((result.final_balance - 14_187.14).abs() < 0.01);
        assert_eq!(result.total_contributions, 13_000.0);
        assert!((result.total_interest - 1_187.14).abs() < 0.01);
    }

    #[test]
    fn test_zero_rate_is_sum_of_deposits() {
        let result = project_savings(500.0, 50.0, 0.0, 24).unwrap();
        assert_eq!(result.final_balance, 1_700.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_zero_plan_is_valid() {
        let result = project_savings(0.0, 0.0, 4.0, 12).unwrap();
        assert_eq!(result.final_balance, 0.0);
        assert_eq!(result.total_contributions, 0.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_totals_are_consistent() {
        let result = project_savings(2_500.0, 175.0, 4.1, 84).unwrap();
        assert_eq!(result.total_contributions, 2_500.0 + 175.0 * 84.0);
        assert_abs_diff_eq!(
            result.final_balance - result.total_contributions,
            result.total_interest,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_monotone_in_every_input() {
        let base = project_savings(1_000.0, 200.0, 3.25, 60).unwrap().final_balance;

        let more_deposit = project_savings(1_001.0, 200.0, 3.25, 60).unwrap().final_balance;
        let more_contrib = project_savings(1_000.0, 201.0, 3.25, 60).unwrap().final_balance;
        let more_rate = project_savings(1_000.0, 200.0, 3.26, 60).unwrap().final_balance;
        let more_term = project_savings(1_000.0, 200.0, 3.25, 61).unwrap().final_balance;

        assert!(more_deposit >= base);
        assert!(more_contrib >= base);
        assert!(more_rate >= base);
        assert!(more_term >= base);
    }

    #[test]
    fn test_monotone_across_rate_grid() {
        let mut previous = 0.0;
        for tenths in 0..=200 {
            let rate = tenths as f64 / 10.0;
            let balance = project_savings(750.0, 125.0, rate, 120).unwrap().final_balance;
            assert!(balance >= previous, "balance fell at {}%", rate);
            previous = balance;
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(project_savings(-1.0, 100.0, 3.0, 12).unwrap_err().is_invalid_input());
        assert!(project_savings(100.0, -1.0, 3.0, 12).is_err());
        assert!(project_savings(100.0, 100.0, -0.5, 12).is_err());
        assert!(project_savings(100.0, 100.0, 3.0, 0).is_err());
        assert!(project_savings(f64::NAN, 100.0, 3.0, 12).is_err());
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert!(project_savings(1.0, 1.0, 1_000.0, 100_000).is_err());
        assert!(project_savings(1.0, 0.0, 1_000.0, 100_000).is_err());
        assert!(project_savings(0.0, 1.0, 1_000.0, 100_000).is_err());
    }

    #[test]
    fn test_empty_plan_survives_overflowing_factors() {
        let result = project_savings(0.0, 0.0, 1_000.0, 100_000).unwrap();
        assert_eq!(result.final_balance, 0.0);
        assert_eq!(result.total_contributions, 0.0);
        assert_eq!(result.total_interest, 0.0);
    }
}
