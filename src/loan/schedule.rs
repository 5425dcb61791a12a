//! Month-by-month amortization table

use chrono::{Months, NaiveDate};
use log::trace;
use serde::{Deserialize, Serialize};

use super::payment::{LoanInput, LoanResult};
use crate::error::Result;

/// One scheduled payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based payment number
    pub month: u32,
    pub due_date: Option<NaiveDate>,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub remaining_balance: f64,
}

/// Full amortization table plus the closed-form result it was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub input: LoanInput,
    pub result: LoanResult,
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    /// Get summary statistics
    pub fn summary(&self) -> AmortizationSummary {
        let total_interest: f64 = self.rows.iter().map(|r| r.interest).sum();
        let total_paid: f64 = self.rows.iter().map(|r| r.payment).sum();
        let first_year_interest: f64 = self.rows.iter().take(12).map(|r| r.interest).sum();
        let last = self.rows.last();

        AmortizationSummary {
            payoff_month: last.map(|r| r.month).unwrap_or(0),
            payoff_date: last.and_then(|r| r.due_date),
            total_paid,
            total_interest,
            first_year_interest,
        }
    }
}

/// Summary statistics for an amortization table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSummary {
    pub payoff_month: u32,
    pub payoff_date: Option<NaiveDate>,
    pub total_paid: f64,
    pub total_interest: f64,
    pub first_year_interest: f64,
}

/// Build the amortization table for a loan.
///
/// Interest for each month accrues on the opening balance. The final payment
/// absorbs floating-point residue so the balance closes at exactly zero.
/// When `first_payment` is given, payment `m` is due `m - 1` calendar months after it.
pub fn amortization_schedule(
    input: &LoanInput,
    first_payment: Option<NaiveDate>,
) -> Result<AmortizationSchedule> {
    let result = input.compute()?;
    let r = input.monthly_rate();

    let mut rows = Vec::with_capacity(input.term_months as usize);
    let mut balance = input.principal;

    for month in 1..=input.term_months {
        let interest = balance * r;
        let (payment, principal) = if month == input.term_months {
            (balance + interest, balance)
        } else {
            (result.monthly_payment, result.monthly_payment - interest)
        };
        balance = if month == input.term_months {
            0.0
        } else {
            (balance - principal).max(0.0)
        };

        let due_date = first_payment.and_then(|d| d.checked_add_months(Months::new(month - 1)));

        trace!(
            "Month {}: payment={:.6} interest={:.6} principal={:.6} balance={:.6}",
            month, payment, interest, principal, balance
        );

        rows.push(AmortizationRow {
            month,
            due_date,
            payment,
            interest,
            principal,
            remaining_balance: balance,
        });
    }

    Ok(AmortizationSchedule {
        input: *input,
        result,
        rows,
    })
}
