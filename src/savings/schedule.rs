//! Month-by-month balance path for a savings plan, and its yearly roll-up

use log::trace;
use serde::{Deserialize, Serialize};

use super::projection::{SavingsInput, SavingsResult};
use crate::error::Result;
use crate::rates::PERIODS_PER_YEAR;

/// A single month of a savings projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsRow {
    pub month: u32,
    pub opening_balance: f64,
    /// Deposited at month end, after interest
    pub contribution: f64,
    pub interest: f64,
    pub closing_balance: f64,
    /// Initial deposit plus every contribution so far
    pub cumulative_contributions: f64,
}

/// One point of a yearly growth chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyPoint {
    pub year: u32,
    pub contributions: f64,
    pub interest: f64,
    pub closing_balance: f64,
    pub cumulative_contributions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsSchedule {
    pub input: SavingsInput,
    pub result: SavingsResult,
    pub rows: Vec<SavingsRow>,
}

impl SavingsSchedule {
    /// Aggregate monthly rows into plan years. A partial final year is kept.
    pub fn yearly(&self) -> Vec<YearlyPoint> {
        self.rows
            .chunks(PERIODS_PER_YEAR as usize)
            .enumerate()
            .map(|(idx, months)| {
                let last = months[months.len() - 1];
                YearlyPoint {
                    year: idx as u32 + 1,
                    contributions: months.iter().map(|r| r.contribution).sum(),
                    interest: months.iter().map(|r| r.interest).sum(),
                    closing_balance: last.closing_balance,
                    cumulative_contributions: last.cumulative_contributions,
                }
            })
            .collect()
    }
}

/// Roll the plan forward one month at a time.
///
/// Each month the balance earns `r` and then receives the contribution, so the
/// last closing balance matches the closed-form `final_balance`.
pub fn savings_schedule(input: &SavingsInput) -> Result<SavingsSchedule> {
    let result = input.compute()?;
    let r = input.monthly_rate();

    let mut rows = Vec::with_capacity(input.term_months as usize);
    let mut balance = input.initial_deposit;
    let mut cumulative = input.initial_deposit;

    for month in 1..=input.term_months {
        let opening_balance = balance;
        let interest = opening_balance * r;
        balance = opening_balance + interest + input.monthly_contribution;
        cumulative += input.monthly_contribution;

        trace!(
            "Month {}: opening={:.6} interest={:.6} closing={:.6}",
            month, opening_balance, interest, balance
        );

        rows.push(SavingsRow {
            month,
            opening_balance,
            contribution: input.monthly_contribution,
            interest,
            closing_balance: balance,
            cumulative_contributions: cumulative,
        });
    }

    Ok(SavingsSchedule {
        input: *input,
        result,
        rows,
    })
}
