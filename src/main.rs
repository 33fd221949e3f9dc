// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
use cli::Cli;

fn main() {
    // Diagnostics go to stderr so `--json` output stays clean.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("PETAL_LOG")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = cli::run(Cli::parse()) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
