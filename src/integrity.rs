//! File Signing and Verification
//!
//! This module embeds a content hash into a source file as a trio of comment
//! lines, and later checks whether the file still matches that hash.
//!
//! ## Purpose
//!
//! - **Tamper Detection**: Notice that a file changed since it was signed
//! - **Self-Contained**: The record travels inside the file; no side files
//! - **Language-Aware**: Marker lines use the file's own comment syntax
//!
//! This is a checksum, not authentication. Anyone able to edit the file can
//! also recompute and rewrite the hash, and the identifier is a random token
//! rather than a cryptographic signature.
//!
//! ## Usage
//!
//! ### Sign a File
//!
//! ```no_run
//! use filesigner::integrity;
//! use std::path::Path;
//!
//! # fn example() -> filesigner::error::Result<()> {
//! let record = integrity::sign_file(Path::new("src/app.py"), None)?;
//! println!("Signed with id {}", record.identifier);
//! # Ok(())
//! # }
//! ```
//!
//! ### Verify Later
//!
//! ```no_run
//! use filesigner::integrity::{self, VerificationOutcome};
//! use std::path::Path;
//!
//! # fn example() -> filesigner::error::Result<()> {
//! let report = integrity::verify_file(Path::new("src/app.py"), None)?;
//!
//! match report.outcome {
//!     VerificationOutcome::Valid => println!("✓ unchanged since signing"),
//!     VerificationOutcome::Tampered => println!("✗ modified: {}", report.message),
//!     VerificationOutcome::Unsigned => println!("no signature found"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Every operation reads the whole file and then writes it back in one
//! step. Running operations on different files in parallel is safe; running
//! two on the same file at once is a read-modify-write race and is not
//! supported.
//!
//! ## Architecture
//!
//! - [`hasher`]: SHA-256 over the body
//! - [`record`]: the signature record written into files
//! - [`signer`]: sign operation
//! - [`verifier`]: verification logic and diagnostics
//! - [`remover`]: marker removal

mod fsio;
pub mod hasher;
pub mod record;
pub mod remover;
pub mod signer;
pub mod verifier;

pub use hasher::{HASH_ALGORITHM, hash_body};
pub use record::SignatureRecord;
pub use remover::remove_markers;
pub use signer::{sign_content, sign_file, sign_file_with};
pub use verifier::{VerificationOutcome, VerificationReport, verify_content, verify_file};
