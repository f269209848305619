//! Example: Signing, Verifying, and Unsigning a Source File
//!
//! This example demonstrates how to:
//! 1. Sign a file with embedded markers
//! 2. Verify the file is unchanged
//! 3. Detect tampering
//! 4. Remove the markers again
//!
//! Run with: cargo run --example sign_and_verify

use filesigner::integrity::{remove_markers, sign_file, verify_file};
use std::fs;
use tempfile::TempDir;

fn main() -> anyhow::Result<()> {
    println!("=== filesigner Example ===\n");

    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("greet.py");
    fs::write(&path, "def greet(name):\n    return f'hello {name}'\n")?;

    let show_phase = |phase: &str| println!("   ... {phase}");

    // 1. Sign
    println!("1. Signing {}...", path.display());
    let record = sign_file(&path, Some(&show_phase))?;
    println!("   {}", record.to_string().replace('\n', "\n   "));
    println!("\n   File now reads:\n{}", fs::read_to_string(&path)?);

    // 2. Verify (should PASS)
    println!("2. Verifying file integrity...");
    let report = verify_file(&path, Some(&show_phase))?;
    println!("{}", report.format_cli());

    // 3. Tamper and verify again (should FAIL)
    println!("\n3. Simulating file tampering...");
    let content = fs::read_to_string(&path)?;
    fs::write(&path, content.replacen("hello", "goodbye", 1))?;
    let report = verify_file(&path, None)?;
    println!("{}", report.format_cli());

    // 4. Remove markers
    println!("\n4. Removing signature markers...");
    remove_markers(&path, Some(&show_phase))?;
    println!("   File now reads:\n{}", fs::read_to_string(&path)?);

    let report = verify_file(&path, None)?;
    println!("\n{}", report.format_cli());

    println!("\n=== Example Complete ===");
    Ok(())
}
