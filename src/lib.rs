//! Banking Calculators - loan and savings math behind the online-banking dashboards
//!
//! This library provides:
//! - Amortized loan payments, amortization tables and implied-rate solving
//! - Compound-savings projections with monthly contributions
//! - Savings-goal solving for the required monthly contribution
//! - Parallel what-if batches over any of the above
//!
//! All calculators are pure functions over `f64` inputs. Invalid input fails
//! with [`CalcError::InvalidInput`] before any arithmetic runs; results are
//! never rounded.

pub mod error;
pub mod rates;
pub mod loan;
pub mod savings;
pub mod scenario;
pub mod config;
pub mod format;

// Re-export commonly used types
pub use error::{CalcError, Result};
pub use loan::{compute_loan_payment, LoanInput, LoanResult};
pub use savings::{
    project_savings, solve_required_contribution, GoalInput, GoalResult, SavingsInput,
    SavingsResult,
};
pub use scenario::{Scenario, ScenarioKind, ScenarioRunner};
pub use config::CalculatorConfig;
