//! Batch runner for what-if comparisons
//!
//! Every calculator is a pure function, so scenarios are independent and a
//! batch is evaluated in parallel with rayon. Results keep the input order and
//! a failing scenario does not affect its neighbours.

pub mod loader;

use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loan::{LoanInput, LoanResult};
use crate::savings::{GoalInput, GoalResult, SavingsInput, SavingsResult};

pub use loader::{load_scenarios, load_scenarios_from_reader};

/// Which calculator a scenario runs, with its inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioKind {
    Loan(LoanInput),
    Savings(SavingsInput),
    Goal(GoalInput),
}

impl ScenarioKind {
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Loan(_) => "loan",
            ScenarioKind::Savings(_) => "savings",
            ScenarioKind::Goal(_) => "goal",
        }
    }

    /// Same inputs at a different annual rate
    pub fn with_rate(&self, annual_rate_percent: f64) -> Self {
        match *self {
            ScenarioKind::Loan(input) => ScenarioKind::Loan(LoanInput {
                annual_rate_percent,
                ..input
            }),
            ScenarioKind::Savings(input) => ScenarioKind::Savings(SavingsInput {
                annual_rate_percent,
                ..input
            }),
            ScenarioKind::Goal(input) => ScenarioKind::Goal(GoalInput {
                annual_rate_percent,
                ..input
            }),
        }
    }
}

/// A labelled calculator invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub label: String,
    #[serde(flatten)]
    pub kind: ScenarioKind,
}

impl Scenario {
    pub fn new(label: impl Into<String>, kind: ScenarioKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }

    pub fn evaluate(&self) -> Result<ScenarioOutcome> {
        Ok(match &self.kind {
            ScenarioKind::Loan(input) => ScenarioOutcome::Loan(input.compute()?),
            ScenarioKind::Savings(input) => ScenarioOutcome::Savings(input.compute()?),
            ScenarioKind::Goal(input) => ScenarioOutcome::Goal(input.compute()?),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioOutcome {
    Loan(LoanResult),
    Savings(SavingsResult),
    Goal(GoalResult),
}

impl ScenarioOutcome {
    /// The figure a comparison table leads with
    pub fn headline(&self) -> f64 {
        match self {
            ScenarioOutcome::Loan(r) => r.monthly_payment,
            ScenarioOutcome::Savings(r) => r.final_balance,
            ScenarioOutcome::Goal(r) => r.required_monthly_contribution,
        }
    }
}

/// Outcome of one scenario in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub label: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ScenarioOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScenarioReport {
    fn from_scenario(scenario: &Scenario) -> Self {
        let (outcome, error) = match scenario.evaluate() {
            Ok(outcome) => (Some(outcome), None),
            Err(e) => {
                warn!("Scenario '{}' failed: {}", scenario.label, e);
                (None, Some(e.to_string()))
            }
        };
        Self {
            label: scenario.label.clone(),
            kind: scenario.kind.name().to_string(),
            outcome,
            error,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Evaluates scenario batches
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let loan = Scenario::new("auto", ScenarioKind::Loan(LoanInput::new(50_000.0, 5.99, 60)));
/// for report in runner.rate_sweep(&loan, &[4.99, 5.99, 6.99]) {
///     println!("{}: {:?}", report.label, report.outcome);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Batches shorter than this run on the calling thread
    parallel_threshold: usize,
}

impl ScenarioRunner {
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

    pub fn new() -> Self {
        Self {
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// Run a single scenario
    pub fn run(&self, scenario: &Scenario) -> Result<ScenarioOutcome> {
        scenario.evaluate()
    }

    /// Run every scenario, preserving input order
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<ScenarioReport> {
        if scenarios.len() < self.parallel_threshold {
            scenarios.iter().map(ScenarioReport::from_scenario).collect()
        } else {
            scenarios.par_iter().map(ScenarioReport::from_scenario).collect()
        }
    }

    /// Re-run one scenario at each of `rates` (annual percent)
    pub fn rate_sweep(&self, scenario: &Scenario, rates: &[f64]) -> Vec<ScenarioReport> {
        let variants: Vec<Scenario> = rates
            .iter()
            .map(|&rate| Scenario {
                label: format!("{} @ {}%", scenario.label, rate),
                kind: scenario.kind.with_rate(rate),
            })
            .collect();
        self.run_batch(&variants)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
