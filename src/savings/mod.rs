//! Savings calculators: compound projection, goal solver and balance path

mod projection;
mod goal;
mod schedule;

pub use projection::{project_savings, SavingsInput, SavingsResult};
pub use goal::{solve_required_contribution, GoalInput, GoalResult};
pub use schedule::{savings_schedule, SavingsRow, SavingsSchedule, YearlyPoint};
