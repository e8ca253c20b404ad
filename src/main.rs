//! Household Finance CLI
//!
//! Runs one calculator per subcommand and prints the result as JSON or CSV.
//! Numeric flags accept Danish formatting (`12.500,50`).

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;

use household_finance::debt::loader::load_loans_csv;
use household_finance::input::{parse_locale_number, parse_percent, validate_mortgage, validate_rental};
use household_finance::investment::{FeePreset, MonteCarloInputs, ProjectionInputs};
use household_finance::tax::{self, FormField, TaxInputs, TaxTopic};
use household_finance::{
    calculate_mortgage, calculate_rental, EngineConfig, MortgageInputs, RentalInputs,
    RepaymentStrategy, ScenarioRunner,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(
    name = "household-finance",
    about = "Debt payoff, investment, mortgage, rental and tax calculators"
)]
struct Cli {
    #[arg(long, global = true, help = "JSON file with engine limits; defaults come from the environment")]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Payoff plan for a CSV list of loans
    Debt {
        #[arg(long)]
        loans: PathBuf,
        #[arg(long, default_value = "avalanche")]
        strategy: RepaymentStrategy,
    },

    /// Snowball against avalanche for the same loans
    Compare {
        #[arg(long)]
        loans: PathBuf,
    },

    /// Deterministic growth of a monthly savings plan
    Invest {
        #[arg(long, default_value = "0")]
        initial: String,
        #[arg(long, default_value = "0")]
        monthly: String,
        #[arg(long)]
        years: u32,
        #[arg(long, help = "Expected annual return in percent, e.g. 7")]
        return_pct: String,
        #[arg(long, default_value = "0", help = "Annual fee in percent")]
        fee_pct: String,
        #[arg(long, help = "Fee preset, overrides --fee-pct (e.g. global_index, robo)")]
        fee_preset: Option<FeePreset>,
    },

    /// Monte Carlo p10/p50/p90 bands for a savings plan
    MonteCarlo {
        #[arg(long, default_value = "0")]
        initial: String,
        #[arg(long, default_value = "0")]
        monthly: String,
        #[arg(long)]
        years: u32,
        #[arg(long)]
        return_pct: String,
        #[arg(long, default_value = "0")]
        fee_pct: String,
        #[arg(long, help = "Annual volatility in percent, e.g. 15")]
        volatility_pct: String,
        #[arg(long, help = "Number of paths; clamped to the configured range")]
        paths: Option<u32>,
        #[arg(long, help = "Seed for a reproducible parallel run")]
        seed: Option<u64>,
    },

    /// Fixed-rate mortgage schedule
    Mortgage {
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "0")]
        down_payment: String,
        #[arg(long)]
        years: u32,
        #[arg(long)]
        rate_pct: String,
        #[arg(long, default_value_t = 0)]
        interest_only_years: u32,
    },

    /// Monthly cashflow of a rental property
    Rental {
        #[arg(long)]
        rent: String,
        #[arg(long, default_value = "0")]
        vacancy_pct: String,
        #[arg(long, default_value = "0")]
        utilities: String,
        #[arg(long, default_value = "0")]
        maintenance: String,
        #[arg(long, default_value = "0", help = "Yearly")]
        property_tax: String,
        #[arg(long, default_value = "0", help = "Yearly")]
        insurance: String,
        #[arg(long, default_value = "0")]
        loan_payment: String,
    },

    /// Capital tax estimate and the matching tax return boxes
    Tax {
        #[arg(long, default_value = "0")]
        stock_gain: String,
        #[arg(long, default_value = "0")]
        stock_loss: String,
        #[arg(long, default_value = "0")]
        stock_dividend: String,
        #[arg(long, default_value = "0")]
        stock_threshold: String,
        #[arg(long, default_value = "0")]
        capital_change: String,
        #[arg(long, default_value = "0")]
        capital_dividend: String,
        #[arg(long, default_value = "0")]
        capital_rate_pct: String,
        #[arg(long, default_value = "0")]
        crypto_gain: String,
        #[arg(long, default_value = "0")]
        crypto_loss: String,
        #[arg(long, default_value = "0")]
        crypto_rate_pct: String,
        #[arg(long = "topic", help = "Topic to list tax return boxes for; repeatable")]
        topics: Vec<TaxTopic>,
    },
}

#[derive(Serialize)]
struct ComparisonRow {
    strategy: RepaymentStrategy,
    monthly_payment: f64,
    total_interest: f64,
    months: u32,
    debt_free_date: String,
}

#[derive(Serialize)]
struct MortgageRow {
    loan_amount: f64,
    monthly_payment: String,
    total_interest: f64,
    balance_after_5y: f64,
    balance_after_10y: f64,
}

#[derive(Serialize)]
struct TaxReport {
    #[serde(flatten)]
    estimate: tax::TaxEstimate,
    form_fields: Vec<FormField>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::from_env(),
    };
    let runner = ScenarioRunner::with_config(config);

    run(&runner, cli.command, cli.format)
}

fn run(runner: &ScenarioRunner, command: Command, format: OutputFormat) -> Result<()> {
    match command {
        Command::Debt { loans, strategy } => {
            info!("debt plan for {} ({strategy})", loans.display());
            let loans = load_loans_csv(&loans)
                .with_context(|| format!("failed to load loans from {}", loans.display()))?;
            let plan = runner.run_debt(&loans, strategy);
            info!(
                "debt free {} after {} months",
                plan.summary
                    .debt_free_date
                    .map(|d| d.label())
                    .unwrap_or_else(|| "-".to_string()),
                plan.summary.months
            );
            emit(format, &plan, &plan.table)
        }

        Command::Compare { loans } => {
            info!("comparing strategies for {}", loans.display());
            let loans = load_loans_csv(&loans)
                .with_context(|| format!("failed to load loans from {}", loans.display()))?;
            let comparison = runner.compare_strategies(&loans);
            let rows: Vec<ComparisonRow> = RepaymentStrategy::ALL
                .iter()
                .map(|&strategy| {
                    let summary = &comparison.plan(strategy).summary;
                    ComparisonRow {
                        strategy,
                        monthly_payment: summary.monthly_payment,
                        total_interest: summary.total_interest,
                        months: summary.months,
                        debt_free_date: summary.debt_free_date.map(|d| d.label()).unwrap_or_default(),
                    }
                })
                .collect();
            emit(format, &comparison, &rows)
        }

        Command::Invest {
            initial,
            monthly,
            years,
            return_pct,
            fee_pct,
            fee_preset,
        } => {
            let annual_fee_pct = fee_preset
                .and_then(|p| p.annual_fee_pct())
                .unwrap_or_else(|| parse_percent(&fee_pct));
            let inputs = ProjectionInputs {
                initial: parse_locale_number(&initial),
                monthly_contribution: parse_locale_number(&monthly),
                years,
                annual_return_pct: parse_percent(&return_pct),
                annual_fee_pct,
            };
            info!("projecting {years} years at {}% less {annual_fee_pct}% fees", inputs.annual_return_pct);
            let result = runner.investment_engine().project(&inputs);
            emit(format, &result, &result.rows)
        }

        Command::MonteCarlo {
            initial,
            monthly,
            years,
            return_pct,
            fee_pct,
            volatility_pct,
            paths,
            seed,
        } => {
            let engine = runner.monte_carlo_engine();
            let inputs = MonteCarloInputs {
                years,
                annual_return: parse_percent(&return_pct) / 100.0,
                annual_fee: parse_percent(&fee_pct) / 100.0,
                initial: parse_locale_number(&initial),
                monthly: parse_locale_number(&monthly),
                path_count: engine.resolve_path_count(paths),
                annual_volatility_pct: parse_percent(&volatility_pct),
            };
            info!("monte carlo: {years} years, {} paths", inputs.path_count);
            let band = match seed {
                Some(seed) => engine.simulate_parallel(&inputs, seed)?,
                None => engine.simulate(&inputs, &mut rand::thread_rng())?,
            };
            emit(format, &band, &band.rows())
        }

        Command::Mortgage {
            price,
            down_payment,
            years,
            rate_pct,
            interest_only_years,
        } => {
            let inputs = MortgageInputs {
                price: parse_locale_number(&price),
                down_payment: parse_locale_number(&down_payment),
                term_years: years,
                annual_rate_pct: parse_percent(&rate_pct),
                interest_only_years,
            };
            validate_mortgage(&inputs).context("invalid mortgage")?;
            info!("mortgage of {:.0} over {years} years", inputs.loan_amount());
            let schedule = calculate_mortgage(&inputs);
            let row = MortgageRow {
                loan_amount: schedule.loan_amount,
                monthly_payment: schedule.payment.to_string(),
                total_interest: schedule.total_interest,
                balance_after_5y: schedule.balance_after_5y,
                balance_after_10y: schedule.balance_after_10y,
            };
            emit(format, &schedule, &[row])
        }

        Command::Rental {
            rent,
            vacancy_pct,
            utilities,
            maintenance,
            property_tax,
            insurance,
            loan_payment,
        } => {
            let inputs = RentalInputs {
                rent: parse_locale_number(&rent),
                vacancy_pct: parse_percent(&vacancy_pct),
                utilities: parse_locale_number(&utilities),
                maintenance: parse_locale_number(&maintenance),
                property_tax: parse_locale_number(&property_tax),
                insurance: parse_locale_number(&insurance),
                loan_payment: parse_locale_number(&loan_payment),
            };
            validate_rental(&inputs).context("invalid rental")?;
            info!("rental cashflow for rent {:.0}", inputs.rent);
            let result = calculate_rental(&inputs);
            emit(format, &result, std::slice::from_ref(&result))
        }

        Command::Tax {
            stock_gain,
            stock_loss,
            stock_dividend,
            stock_threshold,
            capital_change,
            capital_dividend,
            capital_rate_pct,
            crypto_gain,
            crypto_loss,
            crypto_rate_pct,
            topics,
        } => {
            let inputs = TaxInputs {
                stock_gain: parse_locale_number(&stock_gain),
                stock_loss: parse_locale_number(&stock_loss),
                stock_dividend: parse_locale_number(&stock_dividend),
                stock_threshold: parse_locale_number(&stock_threshold),
                capital_change: parse_locale_number(&capital_change),
                capital_dividend: parse_locale_number(&capital_dividend),
                capital_rate: parse_percent(&capital_rate_pct) / 100.0,
                crypto_gain: parse_locale_number(&crypto_gain),
                crypto_loss: parse_locale_number(&crypto_loss),
                crypto_rate: parse_percent(&crypto_rate_pct) / 100.0,
            };
            info!("tax estimate with {} topic(s)", topics.len());
            let estimate = tax::estimate(&inputs, &runner.config().tax);
            let report = TaxReport {
                estimate: estimate.clone(),
                form_fields: tax::form_fields(&topics),
            };
            emit(format, &report, &[estimate])
        }
    }
}

/// Print the full result as JSON, or the tabular rows as CSV
fn emit<T: Serialize, R: Serialize>(format: OutputFormat, value: &T, rows: &[R]) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout().lock(), value).context("failed to write JSON")?;
            println!();
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(io::stdout().lock());
            for row in rows {
                writer.serialize(row).context("failed to write CSV row")?;
            }
            writer.flush().context("failed to flush CSV")?;
        }
    }
    Ok(())
}
