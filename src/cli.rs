use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use filesigner::config::AppConfig;
use filesigner::integrity::{SignatureRecord, remove_markers, sign_file_with, verify_file};
use filesigner::marker::{CommentStyle, FALLBACK_STYLE};
use filesigner::progress::ProgressSink;
use serde::Serialize;
use std::io::{BufRead as _, IsTerminal as _, Write as _};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "filesigner",
    version,
    about = "Embed and verify content-hash signature markers in source files"
)]
pub struct Cli {
    /// Path to a JSON config file. Defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter (e.g. "info", "filesigner=debug"). RUST_LOG takes precedence.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print operation phases to stderr
    #[arg(long, global = true)]
    pub progress: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign files, replacing any existing signature markers
    Sign {
        /// Files to sign
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether files changed since they were signed
    Verify {
        /// Files to verify
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Strip signature markers, restoring the original body
    Remove {
        /// Files to clean
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// List the extension to comment-style table
    Styles,
}

#[derive(Serialize)]
struct SignedFile<'a> {
    path: String,
    #[serde(flatten)]
    record: &'a SignatureRecord,
}

/// Run `command`. Returns `false` if any verified file was not valid.
pub fn run_command(command: Commands, config: &AppConfig, show_progress: bool) -> Result<bool> {
    let print_phase = |phase: &str| eprintln!("  ... {phase}");
    let progress: Option<&dyn ProgressSink> = if show_progress {
        Some(&print_phase)
    } else {
        None
    };

    match command {
        Commands::Sign { paths, json } => handle_sign(&paths, json, config, progress),
        Commands::Verify { paths, json } => handle_verify(&paths, json, progress),
        Commands::Remove { paths, yes } => handle_remove(&paths, yes, progress),
        Commands::Styles => handle_styles(config),
    }
}

fn handle_sign(
    paths: &[PathBuf],
    json: bool,
    config: &AppConfig,
    progress: Option<&dyn ProgressSink>,
) -> Result<bool> {
    let styles = config.comment_styles()?;

    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let record = sign_file_with(path, &styles, progress)?;
        if !json {
            println!("✓ Signed {}", path.display());
            println!("  {}", record.to_string().replace('\n', "\n  "));
        }
        records.push((path, record));
    }

    if json {
        let signed: Vec<SignedFile<'_>> = records
            .iter()
            .map(|(path, record)| SignedFile {
                path: path.display().to_string(),
                record,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&signed)?);
    }
    Ok(true)
}

fn handle_verify(
    paths: &[PathBuf],
    json: bool,
    progress: Option<&dyn ProgressSink>,
) -> Result<bool> {
    let mut reports = Vec::with_capacity(paths.len());
    for path in paths {
        let report = verify_file(path, progress)?;
        if !json {
            println!("{}", report.format_cli());
        }
        reports.push(report);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(reports.iter().all(|r| r.is_valid()))
}

fn handle_remove(paths: &[PathBuf], yes: bool, progress: Option<&dyn ProgressSink>) -> Result<bool> {
    if !yes && !std::io::stdin().is_terminal() {
        bail!("Refusing to remove signatures without confirmation; pass --yes");
    }

    for path in paths {
        if !yes && !confirm_removal(path)? {
            println!("Skipped {}", path.display());
            continue;
        }
        remove_markers(path, progress)?;
        println!("✓ Signature removed from {}", path.display());
    }
    Ok(true)
}

fn confirm_removal(path: &Path) -> Result<bool> {
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    print!("Remove signature from {name}? [y/N] ");
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn describe_style(style: &CommentStyle) -> String {
    match style.close() {
        Some(close) => format!("{} ... {close}", style.open()),
        None => format!("{} ...", style.open()),
    }
}

fn handle_styles(config: &AppConfig) -> Result<bool> {
    let styles = config.comment_styles()?;
    for (extension, style) in styles.iter() {
        println!(".{extension:<8} {}", describe_style(style));
    }
    println!("{:<9} {}", "(other)", describe_style(&FALLBACK_STYLE));
    Ok(true)
}
