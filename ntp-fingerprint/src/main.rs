#![forbid(unsafe_code)]

use clap::{Parser, ValueEnum};
use ntp_fingerprint_lib::config::{load_from_path, validate, Config};
use ntp_fingerprint_lib::telemetry::init_tracing;
use ntp_fingerprint_lib::{run, FingerprintError, Report, ScanConfig, TargetHost, TraceMode};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Exit status when the probes completed but no signature matched
const EXIT_UNIDENTIFIED: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Identify NTP server implementations from their reaction to malformed probes"
)]
struct Cli {
    /// Hostname or IP of target NTP server
    target: String,
    /// Trace every datagram sent and received instead of printing progress dots
    #[arg(short, long)]
    debug: bool,
    /// Socket timeout in seconds [default: 2]
    #[arg(short, long, value_name = "SECONDS")]
    timeout: Option<u64>,
    /// Destination UDP port [default: 123]
    #[arg(short, long)]
    port: Option<u16>,
    /// Number of probes in flight at once [default: 1]
    #[arg(short = 'j', long, value_name = "N")]
    concurrency: Option<usize>,
    /// Path to configuration TOML file
    #[arg(short, long, value_name = "FILE", env = "NTP_FINGERPRINT_CONFIG")]
    config: Option<PathBuf>,
    /// Output format for the result
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    target: String,
    address: String,
    vector: Vec<u8>,
    identified: Option<&'a str>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_tracing(&config.logging.level, config.logging.show_target, cli.debug) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let trace = if cli.debug { TraceMode::Bytes } else { TraceMode::Progress };
    let result = identify(&cli.target, &config, trace).await;
    if trace == TraceMode::Progress {
        eprintln!();
    }

    match result {
        Ok(report) => render(&report, cli.format),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Configuration file (if any) with command line overrides applied
fn load_config(cli: &Cli) -> Result<Config, FingerprintError> {
    let mut config = match &cli.config {
        Some(path) => load_from_path(path)?,
        None => Config::default(),
    };
    if let Some(timeout) = cli.timeout {
        config.probe.timeout_secs = timeout;
    }
    if let Some(port) = cli.port {
        config.probe.port = port;
    }
    if let Some(concurrency) = cli.concurrency {
        config.probe.concurrency = concurrency;
    }
    validate(&config).map_err(FingerprintError::Config)?;
    Ok(config)
}

async fn identify(
    target: &str,
    config: &Config,
    trace: TraceMode,
) -> Result<Report, FingerprintError> {
    let target: TargetHost = target.parse()?;
    let table = config.fingerprint_table()?;
    let scan = ScanConfig::new(target, &config.probe, trace);
    let sender = Arc::new(scan.udp_sender());
    run(&scan, sender, &table).await
}

fn render(report: &Report, format: OutputFormat) -> ExitCode {
    match format {
        OutputFormat::Text => match &report.identified {
            Some(name) => println!("Identified {name}"),
            None => println!("Unable to identify NTP server: {}", report.vector),
        },
        OutputFormat::Json => {
            let json = JsonReport {
                target: report.target.to_string(),
                address: report.address.to_string(),
                vector: report.vector.bits(),
                identified: report.identified.as_deref(),
            };
            match serde_json::to_string(&json) {
                Ok(line) => println!("{line}"),
                Err(err) => {
                    eprintln!("Failed to encode report: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    if report.is_identified() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_UNIDENTIFIED)
    }
}
