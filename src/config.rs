//! Display and default-rate configuration for the CLI
//!
//! Load order: built-in defaults, then an optional JSON file, then
//! `BANKCALC_*` environment variables.

use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use crate::error::Result;

/// Default loan APR shown on the loan calculator
pub const DEFAULT_LOAN_RATE_PERCENT: f64 = 5.99;
/// Default savings APY shown on the savings calculator
pub const DEFAULT_SAVINGS_RATE_PERCENT: f64 = 3.25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub currency_symbol: String,
    /// Rows of a schedule printed before truncating
    pub schedule_preview_rows: usize,
    pub default_loan_rate_percent: f64,
    pub default_savings_rate_percent: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            schedule_preview_rows: 12,
            default_loan_rate_percent: DEFAULT_LOAN_RATE_PERCENT,
            default_savings_rate_percent: DEFAULT_SAVINGS_RATE_PERCENT,
        }
    }
}

impl CalculatorConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults, then the optional file, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(p) => Self::from_json_path(p)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(|key| env::var(key).ok()))
    }

    /// Apply `BANKCALC_*` overrides from `lookup`. Unparseable values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(symbol) = lookup("BANKCALC_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }
        if let Some(rows) = parse_var(&lookup, "BANKCALC_PREVIEW_ROWS") {
            self.schedule_preview_rows = rows;
        }
        if let Some(rate) = parse_var(&lookup, "BANKCALC_LOAN_RATE") {
            self.default_loan_rate_percent = rate;
        }
        if let Some(rate) = parse_var(&lookup, "BANKCALC_SAVINGS_RATE") {
            self.default_savings_rate_percent = rate;
        }
        self
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}
