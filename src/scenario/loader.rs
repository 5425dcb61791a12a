//! Load scenario batches from CSV
//!
//! Columns, in order:
//! `label,kind,amount,initial_deposit,monthly_contribution,annual_rate_percent,term_months`.
//! `amount` is the principal for a loan and the target for a goal. Columns a
//! kind does not use may be left empty.

use csv::{Reader, ReaderBuilder, Trim};
use log::info;
use std::path::Path;

use super::{Scenario, ScenarioKind};
use crate::error::{CalcError, Result};
use crate::loan::LoanInput;
use crate::savings::{GoalInput, SavingsInput};

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    label: String,
    kind: String,
    amount: Option<f64>,
    initial_deposit: Option<f64>,
    monthly_contribution: Option<f64>,
    annual_rate_percent: f64,
    term_months: u32,
}

impl CsvRow {
    fn to_scenario(self, line: u64) -> Result<Scenario> {
        let missing = |column: &str| CalcError::InvalidScenario {
            line,
            message: format!("{} scenario requires '{}'", self.kind, column),
        };

        let kind = match self.kind.to_ascii_lowercase().as_str() {
            "loan" => ScenarioKind::Loan(LoanInput::new(
                self.amount.ok_or_else(|| missing("amount"))?,
                self.annual_rate_percent,
                self.term_months,
            )),
            "savings" => ScenarioKind::Savings(SavingsInput::new(
                self.initial_deposit.unwrap_or(0.0),
                self.monthly_contribution.unwrap_or(0.0),
                self.annual_rate_percent,
                self.term_months,
            )),
            "goal" => ScenarioKind::Goal(GoalInput::new(
                self.amount.ok_or_else(|| missing("amount"))?,
                self.initial_deposit.unwrap_or(0.0),
                self.annual_rate_percent,
                self.term_months,
            )),
            other => {
                return Err(CalcError::InvalidScenario {
                    line,
                    message: format!("Unknown scenario kind: {}", other),
                })
            }
        };

        Ok(Scenario::new(self.label, kind))
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>> {
    let path = path.as_ref();
    let scenarios = read_scenarios(ReaderBuilder::new().trim(Trim::All).from_path(path)?)?;
    info!("Loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Scenario>> {
    read_scenarios(ReaderBuilder::new().trim(Trim::All).from_reader(reader))
}

fn read_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Scenario>> {
    let mut scenarios = Vec::new();
    let headers = reader.headers()?.clone();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: CsvRow = record.deserialize(Some(&headers))?;
        scenarios.push(row.to_scenario(line)?);
    }

    Ok(scenarios)
}
