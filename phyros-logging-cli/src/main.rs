//! `phyros-logging` registers a logging pipeline from command line flags or a TOML file and emits
//! a few sample entries through it.

#![forbid(unsafe_code)]

mod scenarios;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use phyros_logging::{JsonProvider, LogFormat, LoggerBuilder, LoggingConfig, Severity};
use phyros_logging_tracing::TracingBuilderExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Arguments {
    /// TOML logging configuration, flags override its values.
    #[arg(long, env = "PHYROS_LOGGING_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Output format of the configured provider.
    #[arg(long)]
    format: Option<Format>,

    /// Skip entries below this severity.
    #[arg(long)]
    min_level: Option<Severity>,

    /// Leave timestamps out of console lines.
    #[arg(long)]
    no_timestamps: bool,

    /// Don't colour console lines.
    #[arg(long)]
    no_color: bool,

    /// Provider to register, defaults to the one described by the configuration.
    #[arg(long)]
    sink: Option<Sink>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Sink {
    /// Human-readable lines on stdout.
    Console,
    /// JSON lines on stdout.
    Json,
    /// Events into the process-wide `tracing` subscriber.
    Tracing,
}

impl Arguments {
    /// Loads the configuration file, if any, and applies the flags on top.
    fn config(&self) -> anyhow::Result<LoggingConfig> {
        let mut config = match &self.config {
            Some(path) => LoggingConfig::from_path(path)
                .with_context(|| format!("loading logging configuration from {path}"))?,
            None => LoggingConfig::default(),
        };

        if let Some(format) = self.format {
            config.format = match format {
                Format::Pretty => LogFormat::Pretty,
                Format::Json => LogFormat::Json,
            };
        }
        if let Some(min_level) = self.min_level {
            config.minimum_level = min_level;
        }
        config.timestamps &= !self.no_timestamps;
        config.color &= !self.no_color;

        Ok(config)
    }
}

/// Selects the provider for `sink` on `builder`.
fn configure(builder: &mut LoggerBuilder, sink: Option<Sink>, config: &LoggingConfig) {
    match sink {
        None => {
            builder.use_config(config);
        }
        Some(Sink::Console) => {
            builder.use_config(&LoggingConfig {
                format: LogFormat::Pretty,
                ..config.clone()
            });
        }
        Some(Sink::Json) => {
            let provider = JsonProvider::stdout()
                .with_minimum_level(config.minimum_level)
                .with_application(config.application_name.clone())
                .with_host(config.host_name.clone());
            builder.use_provider(provider);
        }
        Some(Sink::Tracing) => {
            builder.use_global_tracing();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Arguments::parse();

    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .with_env_var("PHYROS_LOG")
                    .from_env()?,
            )
            .with_writer(std::io::stderr)
            .compact()
            .finish(),
    )?;

    let config = args.config()?;
    tracing::debug!(?config, sink = ?args.sink, "registering logging pipeline");

    let writer = phyros_logging::register(|builder| configure(builder, args.sink, &config))
        .context("registering logging pipeline")?;

    scenarios::run(writer).context("writing sample entries")?;

    // A second registration hands back the existing writer without reconfiguring it.
    let again = phyros_logging::register(|_| {
        tracing::warn!("second registration callback was invoked");
    })?;
    tracing::info!(
        same_writer = std::ptr::eq(writer, again),
        "registered the logging pipeline again"
    );

    writer.shutdown();
    Ok(())
}
