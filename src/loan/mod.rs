//! Amortized loan calculators: payment, schedule and implied rate

mod payment;
mod schedule;
mod implied_rate;

pub use payment::{compute_loan_payment, LoanInput, LoanResult};
pub use schedule::{
    amortization_schedule, AmortizationRow, AmortizationSchedule, AmortizationSummary,
};
pub use implied_rate::implied_annual_rate;
