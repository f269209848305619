//! # filesigner Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Load config (default location or --config)
//!   ├─> Initialize logging
//!   └─> Execute command, map verification failures to exit status 1
//! ```
//!
//! ```bash
//! filesigner sign app.py
//! filesigner verify app.py
//! filesigner remove --yes app.py
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout, clippy::print_stderr)] // CLI output goes to the terminal

mod cli;

use anyhow::Result;
use clap::Parser as _;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();

    let mut config = filesigner::config::AppConfig::load(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    filesigner::logging::init(&config.logging)?;

    let all_valid = cli::run_command(cli.command, &config, cli.progress)?;
    Ok(if all_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
