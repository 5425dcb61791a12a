//! Banking Calculators CLI
//!
//! Command-line front end for the loan, savings and goal calculators

use anyhow::{Context, Result};
use banking_calculators::{
    format::{format_currency, format_percent},
    loan::{amortization_schedule, implied_annual_rate, AmortizationSchedule},
    rates::effective_annual_rate,
    savings::{savings_schedule, SavingsSchedule, YearlyPoint},
    scenario::{load_scenarios, ScenarioOutcome, ScenarioReport},
    CalculatorConfig, GoalInput, GoalResult, LoanInput, SavingsInput, SavingsResult,
    ScenarioRunner,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bankcalc", version)]
#[command(about = "Loan, savings and savings-goal calculators")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Monthly payment and totals for an amortizing loan
    Loan {
        #[arg(long, allow_negative_numbers = true)]
        principal: f64,
        /// Annual rate in percent (defaults to the configured loan rate)
        #[arg(long, allow_negative_numbers = true)]
        rate: Option<f64>,
        /// Term in months
        #[arg(long)]
        term: u32,
        /// Print the amortization table
        #[arg(long)]
        schedule: bool,
        /// Due date of the first payment (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },
    /// Future balance of a savings plan
    Savings {
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        initial: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        monthly: f64,
        /// Annual rate in percent (defaults to the configured savings rate)
        #[arg(long, allow_negative_numbers = true)]
        rate: Option<f64>,
        #[arg(long)]
        term: u32,
        /// Print the yearly balance path
        #[arg(long)]
        schedule: bool,
    },
    /// Monthly contribution needed to reach a savings target
    Goal {
        #[arg(long, allow_negative_numbers = true)]
        target: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        initial: f64,
        #[arg(long, allow_negative_numbers = true)]
        rate: Option<f64>,
        #[arg(long)]
        term: u32,
    },
    /// Annual rate implied by a quoted monthly payment
    Rate {
        #[arg(long, allow_negative_numbers = true)]
        principal: f64,
        #[arg(long, allow_negative_numbers = true)]
        payment: f64,
        #[arg(long)]
        term: u32,
    },
    /// Run every scenario in a CSV file
    Batch {
        file: PathBuf,
        /// Re-run each scenario at these annual rates (comma separated)
        #[arg(long, value_delimiter = ',')]
        sweep: Vec<f64>,
    },
}

#[derive(Serialize)]
struct ImpliedRateOutput {
    principal: f64,
    monthly_payment: f64,
    term_months: u32,
    annual_rate_percent: f64,
    effective_annual_rate_percent: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = CalculatorConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let printer = Printer {
        config: &config,
        json: cli.json,
    };

    match cli.command {
        Command::Loan {
            principal,
            rate,
            term,
            schedule,
            start_date,
        } => {
            let input = LoanInput::new(
                principal,
                rate.unwrap_or(config.default_loan_rate_percent),
                term,
            );
            let table = amortization_schedule(&input, start_date)
                .context("Loan calculation failed")?;
            printer.loan(&table, schedule)?;
        }
        Command::Savings {
            initial,
            monthly,
            rate,
            term,
            schedule,
        } => {
            let input = SavingsInput::new(
                initial,
                monthly,
                rate.unwrap_or(config.default_savings_rate_percent),
                term,
            );
            let path = savings_schedule(&input).context("Savings projection failed")?;
            printer.savings(&path, schedule)?;
        }
        Command::Goal {
            target,
            initial,
            rate,
            term,
        } => {
            let input = GoalInput::new(
                target,
                initial,
                rate.unwrap_or(config.default_savings_rate_percent),
                term,
            );
            let result = input.compute().context("Goal calculation failed")?;
            printer.goal(&input, &result)?;
        }
        Command::Rate {
            principal,
            payment,
            term,
        } => {
            let annual = implied_annual_rate(principal, payment, term)
                .context("Implied rate calculation failed")?;
            printer.implied_rate(&ImpliedRateOutput {
                principal,
                monthly_payment: payment,
                term_months: term,
                annual_rate_percent: annual,
                effective_annual_rate_percent: effective_annual_rate(annual),
            })?;
        }
        Command::Batch { file, sweep } => {
            let scenarios = load_scenarios(&file)
                .with_context(|| format!("Failed to load scenarios from {}", file.display()))?;
            let runner = ScenarioRunner::new();
            let reports = if sweep.is_empty() {
                runner.run_batch(&scenarios)
            } else {
                scenarios
                    .iter()
                    .flat_map(|s| runner.rate_sweep(s, &sweep))
                    .collect()
            };
            printer.batch(&reports)?;
        }
    }

    Ok(())
}

struct Printer<'a> {
    config: &'a CalculatorConfig,
    json: bool,
}

impl Printer<'_> {
    fn money(&self, amount: f64) -> String {
        format_currency(amount, &self.config.currency_symbol)
    }

    fn emit_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn loan(&self, table: &AmortizationSchedule, show_rows: bool) -> Result<()> {
        if self.json {
            return if show_rows {
                self.emit_json(table)
            } else {
                self.emit_json(&table.result)
            };
        }

        let input = &table.input;
        let result = &table.result;
        println!("Loan");
        println!("  Principal:       {}", self.money(input.principal));
        println!(
            "  Rate:            {} APR ({} APY)",
            format_percent(input.annual_rate_percent, 2),
            format_percent(effective_annual_rate(input.annual_rate_percent), 3)
        );
        println!("  Term:            {} months", input.term_months);
        println!("  Monthly Payment: {}", self.money(result.monthly_payment));
        println!("  Total Payment:   {}", self.money(result.total_payment));
        println!("  Total Interest:  {}", self.money(result.total_interest));

        if !show_rows {
            return Ok(());
        }

        let summary = table.summary();
        if let Some(date) = summary.payoff_date {
            println!("  Payoff Date:     {}", date);
        }
        println!("  Year 1 Interest: {}", self.money(summary.first_year_interest));
        println!();
        println!(
            "{:>5} {:>10} {:>14} {:>14} {:>14} {:>16}",
            "Month", "Due", "Payment", "Interest", "Principal", "Balance"
        );
        println!("{}", "-".repeat(78));

        let preview = self.config.schedule_preview_rows;
        for row in table.rows.iter().take(preview) {
            let due = row.due_date.map(|d| d.to_string()).unwrap_or_default();
            println!(
                "{:>5} {:>10} {:>14} {:>14} {:>14} {:>16}",
                row.month,
                due,
                self.money(row.payment),
                self.money(row.interest),
                self.money(row.principal),
                self.money(row.remaining_balance),
            );
        }
        if table.rows.len() > preview {
            println!("... ({} more months)", table.rows.len() - preview);
        }
        Ok(())
    }

    fn savings(&self, path: &SavingsSchedule, show_rows: bool) -> Result<()> {
        if self.json {
            return if show_rows {
                #[derive(Serialize)]
                struct Out<'a> {
                    input: &'a SavingsInput,
                    result: &'a SavingsResult,
                    yearly: Vec<YearlyPoint>,
                }
                self.emit_json(&Out {
                    input: &path.input,
                    result: &path.result,
                    yearly: path.yearly(),
                })
            } else {
                self.emit_json(&path.result)
            };
        }

        let input = &path.input;
        let result = &path.result;
        println!("Savings");
        println!("  Initial Deposit:     {}", self.money(input.initial_deposit));
        println!("  Monthly:             {}", self.money(input.monthly_contribution));
        println!(
            "  Rate:                {} ({} APY)",
            format_percent(input.annual_rate_percent, 2),
            format_percent(effective_annual_rate(input.annual_rate_percent), 3)
        );
        println!("  Term:                {} months", input.term_months);
        println!("  Final Balance:       {}", self.money(result.final_balance));
        println!("  Total Contributions: {}", self.money(result.total_contributions));
        println!("  Total Interest:      {}", self.money(result.total_interest));

        if !show_rows {
            return Ok(());
        }

        println!();
        println!(
            "{:>4} {:>14} {:>14} {:>16}",
            "Year", "Deposited", "Interest", "Balance"
        );
        println!("{}", "-".repeat(52));
        for point in path.yearly() {
            println!(
                "{:>4} {:>14} {:>14} {:>16}",
                point.year,
                self.money(point.cumulative_contributions),
                self.money(point.interest),
                self.money(point.closing_balance),
            );
        }
        Ok(())
    }

    fn goal(&self, input: &GoalInput, result: &GoalResult) -> Result<()> {
        if self.json {
            return self.emit_json(result);
        }

        println!("Savings Goal");
        println!("  Target:              {}", self.money(input.target_amount));
        println!("  Initial Deposit:     {}", self.money(input.initial_deposit));
        println!("  Rate:                {}", format_percent(input.annual_rate_percent, 2));
        println!("  Term:                {} months", input.term_months);
        println!(
            "  Required Monthly:    {}",
            self.money(result.required_monthly_contribution)
        );
        println!("  Projected Balance:   {}", self.money(result.final_balance));
        println!("  Total Contributions: {}", self.money(result.total_contributions));
        println!("  Total Interest:      {}", self.money(result.total_interest));
        if result.met_by_initial_deposit {
            println!("  The initial deposit alone reaches the target.");
        }
        Ok(())
    }

    fn implied_rate(&self, out: &ImpliedRateOutput) -> Result<()> {
        if self.json {
            return self.emit_json(out);
        }

        println!("Implied Rate");
        println!("  Principal:       {}", self.money(out.principal));
        println!("  Monthly Payment: {}", self.money(out.monthly_payment));
        println!("  Term:            {} months", out.term_months);
        println!("  APR:             {}", format_percent(out.annual_rate_percent, 3));
        println!(
            "  APY:             {}",
            format_percent(out.effective_annual_rate_percent, 3)
        );
        Ok(())
    }

    fn batch(&self, reports: &[ScenarioReport]) -> Result<()> {
        if self.json {
            return self.emit_json(&reports);
        }

        println!("{:<28} {:<8} {:>16}  {}", "Scenario", "Kind", "Headline", "Detail");
        println!("{}", "-".repeat(78));
        for report in reports {
            match (&report.outcome, &report.error) {
                (Some(outcome), _) => {
                    let detail = match outcome {
                        ScenarioOutcome::Loan(r) => {
                            format!("monthly payment, interest {}", self.money(r.total_interest))
                        }
                        ScenarioOutcome::Savings(r) => {
                            format!("final balance, interest {}", self.money(r.total_interest))
                        }
                        ScenarioOutcome::Goal(r) => {
                            format!("required monthly, balance {}", self.money(r.final_balance))
                        }
                    };
                    println!(
                        "{:<28} {:<8} {:>16}  {}",
                        report.label,
                        report.kind,
                        self.money(outcome.headline()),
                        detail
                    );
                }
                (None, error) => {
                    println!(
                        "{:<28} {:<8} {:>16}  {}",
                        report.label,
                        report.kind,
                        "ERROR",
                        error.as_deref().unwrap_or("unknown error")
                    );
                }
            }
        }

        let failed = reports.iter().filter(|r| !r.is_ok()).count();
        println!("\n{} scenarios, {} failed", reports.len(), failed);
        Ok(())
    }
}
