//! `pusb-conf` - print the settings a USB-token authentication would use
//!
//! Usage:
//!   pusb-conf [--config <file>] [--service <name>] [--strict] <user>

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use usb_auth_settings::api::cli::{exit_code, ConfigOverrides, ExitStatus, ResolutionDto};
use usb_auth_settings::UsbAuthSettingsModule;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

/// Resolve USB authentication settings for a user
#[derive(Parser, Debug)]
#[command(name = "pusb-conf", version, about, long_about = None)]
struct Args {
    /// User whose settings are resolved
    user: String,

    /// Service the user authenticates to
    #[arg(short, long, default_value = "login")]
    service: String,

    /// Configuration document (overrides the resolver config)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// YAML resolver configuration
    #[arg(long, value_name = "FILE")]
    resolver_config: Option<PathBuf>,

    /// Fail on the first malformed option
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
    format: Format,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render(dto: &ResolutionDto, format: Format) -> anyhow::Result<String> {
    Ok(match format {
        Format::Yaml => serde_yaml::to_string(dto).context("serializing settings as YAML")?,
        Format::Json => {
            let mut out =
                serde_json::to_string_pretty(dto).context("serializing settings as JSON")?;
            out.push('\n');
            out
        }
    })
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let overrides = ConfigOverrides {
        resolver_config: args.resolver_config.clone(),
        config_file: args.config.clone(),
        strict: args.strict,
    };
    let config = match overrides.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("pusb-conf: {e:#}");
            return ExitStatus::Failure.into();
        }
    };

    let module = UsbAuthSettingsModule::new(config);
    let resolution = match module.resolve(&args.user, &args.service) {
        Ok(resolution) => resolution,
        Err(e) => {
            let status = exit_code(&e);
            eprintln!("pusb-conf: {:#}", anyhow::Error::new(e));
            return status.into();
        }
    };

    match render(&ResolutionDto::from(&resolution), args.format) {
        Ok(out) => {
            print!("{out}");
            ExitStatus::Success.into()
        }
        Err(e) => {
            eprintln!("pusb-conf: {e:#}");
            ExitStatus::Failure.into()
        }
    }
}
