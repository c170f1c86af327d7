// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use mstream::config;
use mstream::filter::{FilterOptions, FilterSet, TracingSink};
use mstream::render::{Style, TimelinePrinter};
use mstream::stream::{StreamClient, Timeline};
use tracing_subscriber::EnvFilter;

/// Exit status after an interrupt, as a shell reports SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser)]
#[command(name = "mstream", about = "Mastodon streaming timeline client")]
struct Cli {
    /// Timeline to follow
    #[arg(value_enum, ignore_case = true)]
    timeline: Timeline,

    /// Mute statuses matching the configured filter lists
    #[arg(short = 'f', long)]
    use_filter: bool,

    /// Highlight words from the configured highlight list
    #[arg(long)]
    highlight: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Path to the config.yaml file
    #[arg(long, env = config::CONFIG_ENV)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = config::resolve_config_path(cli.config.as_deref()) else {
        tracing::error!("no config file found; pass --config or set {}", config::CONFIG_ENV);
        return ExitCode::FAILURE;
    };

    let source = config::FileSource { path: path.clone() };
    let config = match config::load_config(&source) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(path = %path.display(), "failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        path = %path.display(),
        host = %config.network.host,
        timeline = %cli.timeline,
        "config loaded"
    );

    let options = FilterOptions {
        mute: cli.use_filter,
        highlight: cli.highlight,
    };
    let filters = FilterSet::load(&config.filters, options, Arc::new(TracingSink));

    let mut printer = TimelinePrinter::new(std::io::stdout(), Style::Ansi).with_filters(filters);
    let client = StreamClient::new(config.network.host.clone(), config.auth.bearer_token.clone());

    tokio::select! {
        result = client.run(cli.timeline, &mut printer) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("stream failed: {e}");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Quit");
            ExitCode::from(EXIT_INTERRUPTED)
        }
    }
}
