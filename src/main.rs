//! CLI entry point for mathe-core
//!
//! Provides a command-line interface for:
//! - Applying a unit conversion to a list of values
//! - Creating (and finalizing) a timestamped experiment folder
//!
//! # Usage
//!
//! Convert readings:
//! ```bash
//! mathe convert watt2dbm 0.001 0.5 0 --mode warn
//! ```
//!
//! Create an experiment folder:
//! ```bash
//! mathe experiment --tag GA_Optimization --version v1.0 --status success
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mathe_core::config::{MatheConfig, DEFAULT_CONFIG_PATH};
use mathe_core::converters::{self, ErrorMode};
use mathe_core::io::{save_yaml, ExperimentFolder, RunStatus};
use mathe_core::tracing_setup::{self, OutputFormat, TracingConfig};
use mathe_core::MatheResult;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "mathe")]
#[command(about = "Optical unit conversions and experiment folders", long_about = None)]
struct Cli {
    /// Configuration file (missing file falls back to defaults)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log output format: pretty, compact or json
    #[arg(long, global = true, default_value = "compact")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a conversion to each value and print one result per line
    Convert {
        /// Conversion to apply
        conversion: Conversion,

        /// Input values
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,

        /// Invalid-input policy: raise, warn or ignore (defaults to configuration)
        #[arg(long)]
        mode: Option<String>,
    },

    /// Create an experiment folder, snapshot the configuration and finish it
    Experiment {
        /// Experiment tag (defaults to configuration)
        #[arg(long)]
        tag: Option<String>,

        /// Version component of the folder name
        #[arg(long)]
        version: Option<String>,

        /// Root directory for run folders
        #[arg(long)]
        base_path: Option<PathBuf>,

        /// Final status: success or fail
        #[arg(long, default_value = "success")]
        status: String,

        /// Message stored in Success.txt / Error.txt
        #[arg(long, default_value = "")]
        message: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Conversion {
    #[value(name = "lin2db")]
    Lin2Db,
    #[value(name = "db2lin")]
    Db2Lin,
    #[value(name = "watt2dbm")]
    Watt2Dbm,
    #[value(name = "dbm2watt")]
    Dbm2Watt,
    #[value(name = "watt2db")]
    Watt2Db,
    #[value(name = "db2watt")]
    Db2Watt,
    #[value(name = "freq-hz-to-wavelength-m")]
    FreqHzToWavelengthM,
    #[value(name = "wavelength-m-to-freq-hz")]
    WavelengthMToFreqHz,
    #[value(name = "wavelength-nm-to-freq-hz")]
    WavelengthNmToFreqHz,
    #[value(name = "freq-hz-to-wavelength-nm")]
    FreqHzToWavelengthNm,
    #[value(name = "freq-ghz-to-hz")]
    FreqGhzToHz,
    #[value(name = "freq-hz-to-ghz")]
    FreqHzToGhz,
}

impl Conversion {
    fn apply(self, values: &[f64], mode: ErrorMode) -> MatheResult<Vec<f64>> {
        match self {
            Conversion::Lin2Db => converters::lin2db(values, mode),
            Conversion::Db2Lin => Ok(converters::db2lin(values)),
            Conversion::Watt2Dbm => converters::watt2dbm(values, mode),
            Conversion::Dbm2Watt => Ok(converters::dbm2watt(values)),
            Conversion::Watt2Db => converters::watt2db(values, mode),
            Conversion::Db2Watt => Ok(converters::db2watt(values)),
            Conversion::FreqHzToWavelengthM => converters::freq_hz_to_wavelength_m(values, mode),
            Conversion::WavelengthMToFreqHz => converters::wavelength_m_to_freq_hz(values, mode),
            Conversion::WavelengthNmToFreqHz => converters::wavelength_nm_to_freq_hz(values, mode),
            Conversion::FreqHzToWavelengthNm => converters::freq_hz_to_wavelength_nm(values, mode),
            Conversion::FreqGhzToHz => Ok(converters::freq_ghz_to_hz(values)),
            Conversion::FreqHzToGhz => Ok(converters::freq_hz_to_ghz(values)),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = MatheConfig::load_from(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    config.validate()?;

    let format: OutputFormat = cli.log_format.parse()?;
    tracing_setup::init(TracingConfig::from_config(&config)?.with_format(format))?;
    debug!(config = ?config, "Configuration loaded");

    match cli.command {
        Commands::Convert {
            conversion,
            values,
            mode,
        } => run_convert(&config, conversion, &values, mode.as_deref()),
        Commands::Experiment {
            tag,
            version,
            base_path,
            status,
            message,
        } => run_experiment(config, tag, version, base_path, &status, &message),
    }
}

fn run_convert(
    config: &MatheConfig,
    conversion: Conversion,
    values: &[f64],
    mode: Option<&str>,
) -> Result<()> {
    let mode = match mode {
        Some(m) => m.parse::<ErrorMode>()?,
        None => config.converters.default_mode,
    };

    let results = conversion.apply(values, mode)?;
    for value in results {
        println!("{value}");
    }
    Ok(())
}

fn run_experiment(
    mut config: MatheConfig,
    tag: Option<String>,
    version: Option<String>,
    base_path: Option<PathBuf>,
    status: &str,
    message: &str,
) -> Result<()> {
    let status: RunStatus = status.parse()?;
    if let Some(tag) = tag {
        config.experiment.tag = tag;
    }
    if let Some(version) = version {
        config.experiment.version = version;
    }
    if let Some(base_path) = base_path {
        config.experiment.base_path = base_path;
    }
    config.validate()?;

    let mut folder = ExperimentFolder::new(
        &config.experiment.base_path,
        &config.experiment.tag,
        &config.experiment.version,
    )?;
    save_yaml(&config, folder.file_path("config.yaml"))?;
    folder.finish(status, message)?;

    info!(%folder, "Experiment folder ready");
    println!("{}", folder.path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathe_core::constants::SPEED_OF_LIGHT;
    use mathe_core::io::load_yaml;
    use std::fs;
    use tempfile::tempdir;

    fn parse_convert(args: &[&str]) -> (Conversion, Vec<f64>, Option<String>) {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        match cli.command {
            Commands::Convert {
                conversion,
                values,
                mode,
            } => (conversion, values, mode),
            Commands::Experiment { .. } => panic!("expected the convert subcommand"),
        }
    }

    #[test]
    fn parses_convert_with_negative_values() {
        let cli = Cli::try_parse_from([
            "mathe", "convert", "watt2dbm", "0.001", "-1", "--mode", "ignore",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(cli.log_format, "compact");

        let (conversion, values, mode) =
            parse_convert(&["mathe", "convert", "watt2dbm", "0.001", "-1", "--mode", "ignore"]);
        assert!(matches!(conversion, Conversion::Watt2Dbm));
        assert_eq!(values, vec![0.001, -1.0]);
        assert_eq!(mode.as_deref(), Some("ignore"));

        let results = conversion
            .apply(&values, mode.unwrap_or_default().parse().unwrap())
            .unwrap();
        assert_eq!(results[0], 0.0);
        assert_eq!(results[1], f64::NEG_INFINITY);
    }

    #[test]
    fn rejects_malformed_command_lines() {
        assert!(Cli::try_parse_from(["mathe", "convert", "watt2furlong", "1"]).is_err());
        assert!(Cli::try_parse_from(["mathe", "convert", "watt2dbm"]).is_err());
        assert!(Cli::try_parse_from(["mathe", "convert", "watt2dbm", "one"]).is_err());
    }

    #[test]
    fn convert_mode_falls_back_to_configuration() {
        let (conversion, values, mode) = parse_convert(&["mathe", "convert", "lin2db", "-1"]);
        let mut config = MatheConfig::default();

        // Default configuration raises
        let err = run_convert(&config, conversion, &values, mode.as_deref()).unwrap_err();
        assert!(err.to_string().contains("lin2db"));

        config.converters.default_mode = ErrorMode::Ignore;
        assert!(run_convert(&config, conversion, &values, mode.as_deref()).is_ok());
    }

    #[test]
    fn invalid_mode_is_reported() {
        let (conversion, values, mode) =
            parse_convert(&["mathe", "convert", "watt2dbm", "1", "--mode", "shout"]);
        let err = run_convert(&MatheConfig::default(), conversion, &values, mode.as_deref())
            .unwrap_err();
        assert!(err.to_string().contains("Invalid error mode 'shout'"));
    }

    #[test]
    fn every_conversion_applies_elementwise() {
        let cases = [
            (Conversion::Lin2Db, 100.0, 20.0),
            (Conversion::Db2Lin, 20.0, 100.0),
            (Conversion::Watt2Dbm, 1e-3, 0.0),
            (Conversion::Dbm2Watt, 30.0, 1.0),
            (Conversion::Watt2Db, 10.0, 10.0),
            (Conversion::Db2Watt, 10.0, 10.0),
            (Conversion::FreqHzToWavelengthM, SPEED_OF_LIGHT, 1.0),
            (Conversion::WavelengthMToFreqHz, 1.0, SPEED_OF_LIGHT),
            (Conversion::WavelengthNmToFreqHz, 1e9, SPEED_OF_LIGHT),
            (Conversion::FreqHzToWavelengthNm, SPEED_OF_LIGHT, 1e9),
            (Conversion::FreqGhzToHz, 2.0, 2e9),
            (Conversion::FreqHzToGhz, 2e9, 2.0),
        ];
        assert_eq!(cases.len(), Conversion::value_variants().len());

        for (conversion, input, expected) in cases {
            let out = conversion.apply(&[input, input], ErrorMode::Raise).unwrap();
            assert_eq!(out.len(), 2);
            let tol = 1e-12 * expected.abs().max(1.0);
            assert!(
                (out[0] - expected).abs() <= tol,
                "{conversion:?}: expected {expected}, got {}",
                out[0]
            );
        }
    }

    #[test]
    fn only_positive_domain_conversions_reject_zero() {
        for &conversion in Conversion::value_variants() {
            let guarded = matches!(
                conversion,
                Conversion::Lin2Db
                    | Conversion::Watt2Dbm
                    | Conversion::Watt2Db
                    | Conversion::FreqHzToWavelengthM
                    | Conversion::WavelengthMToFreqHz
                    | Conversion::WavelengthNmToFreqHz
                    | Conversion::FreqHzToWavelengthNm
            );
            let result = conversion.apply(&[0.0], ErrorMode::Raise);
            assert_eq!(result.is_err(), guarded, "{conversion:?}");
        }
    }

    #[test]
    fn experiment_snapshots_config_and_finishes() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("runs");

        run_experiment(
            MatheConfig::default(),
            Some("cli_run".to_string()),
            Some("v2".to_string()),
            Some(base.clone()),
            "success",
            "done",
        )
        .unwrap();

        let entries: Vec<PathBuf> = fs::read_dir(&base)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1);
        let folder = &entries[0];
        let name = folder.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with("_v2_cli_run_Success"), "{name}");

        let saved: MatheConfig = load_yaml(folder.join("config.yaml")).unwrap();
        assert_eq!(saved.experiment.tag, "cli_run");
        assert_eq!(saved.experiment.version, "v2");
        assert_eq!(saved.experiment.base_path, base);
        assert_eq!(fs::read_to_string(folder.join("Success.txt")).unwrap(), "done");
    }

    #[test]
    fn experiment_rejects_unknown_status_before_creating_folder() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("runs");

        let err = run_experiment(
            MatheConfig::default(),
            None,
            None,
            Some(base.clone()),
            "aborted",
            "",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid run status"));
        assert!(!base.exists());
    }
}
