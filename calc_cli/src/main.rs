//! # Tally CLI
//!
//! Thin front end over `calc_core`: reads raw input, hands it to the engine,
//! prints result JSON on stdout. Logs go to stderr so output stays pipeable.
//!
//! Exit codes: 0 on success, 2 when the input fails validation (the
//! validation report is printed instead of a result), 1 on other errors.

mod commands;

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use calc_core::calculations::{
    CalculationItem, CentralTendencyInput, CentralTendencyResult, ConversionInput, ConvertAllInput,
    DispersionInput, DispersionResult,
};
use calc_core::units::UnitDomain;
use calc_core::validation::{parse_dataset, ValidationResult};
use calc_core::{CalcError, Calculator, EngineSettings};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use commands::{CommandLine, Commands};

/// Exit code for input that failed validation
const EXIT_INVALID_INPUT: u8 = 2;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_document(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Evaluate one item, printing either its result or its validation report
fn evaluate(item: CalculationItem, settings: &EngineSettings) -> Result<ExitCode> {
    tracing::info!(calculation = item.calc_type(), "evaluating");
    match item.evaluate(settings) {
        Ok(output) => {
            print_json(&output)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(CalcError::Validation(report)) => report_invalid(&report),
        Err(e) => Err(e).context(format!("{} calculation failed", item.calc_type())),
    }
}

fn report_invalid(report: &ValidationResult) -> Result<ExitCode> {
    tracing::warn!(errors = report.errors.len(), "input rejected");
    print_json(report)?;
    Ok(ExitCode::from(EXIT_INVALID_INPUT))
}

#[derive(Serialize)]
struct StatsReport {
    central_tendency: CentralTendencyResult,
    dispersion: DispersionResult,
}

fn stats(text: &str, settings: &EngineSettings) -> Result<ExitCode> {
    let dataset = match parse_dataset("dataset", text) {
        Ok(values) => values,
        Err(error) => {
            return report_invalid(&ValidationResult {
                valid: false,
                errors: vec![error],
            })
        }
    };

    let precision = settings.precision.statistics;
    let central = CentralTendencyInput {
        dataset: Some(dataset.clone()),
        weights: None,
    };
    let central_tendency = match central.calculate_with(precision) {
        Ok(result) => result,
        Err(CalcError::Validation(report)) => return report_invalid(&report),
        Err(e) => return Err(e.into()),
    };

    let dispersion = DispersionInput { dataset: Some(dataset) }.calculate_with(precision)?;

    print_json(&StatsReport {
        central_tendency,
        dispersion,
    })?;
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let cli = CommandLine::parse_args();
    init_logging(cli.verbose);

    let settings = match &cli.config {
        Some(path) => EngineSettings::load(path).with_context(|| format!("Invalid settings file {}", path.display()))?,
        None => EngineSettings::default(),
    };

    match cli.command {
        Commands::Run { file } => {
            let document = read_document(&file)?;
            let item = CalculationItem::from_json_str(&document)?;
            evaluate(item, &settings)
        }
        Commands::Convert { domain, value, from, to } => evaluate(
            CalculationItem::Conversion(ConversionInput {
                domain,
                value: Some(value),
                from_unit: Some(from),
                to_unit: Some(to),
            }),
            &settings,
        ),
        Commands::ConvertAll { domain, value, from } => evaluate(
            CalculationItem::ConvertAll(ConvertAllInput {
                domain,
                value: Some(value),
                from_unit: Some(from),
            }),
            &settings,
        ),
        Commands::Units { domain } => list_units(domain),
        Commands::Stats { dataset } => stats(&dataset, &settings),
    }
}

fn list_units(domain: UnitDomain) -> Result<ExitCode> {
    tracing::debug!(%domain, base = domain.base_unit(), "listing units");
    print_json(&domain.units())?;
    Ok(ExitCode::SUCCESS)
}
