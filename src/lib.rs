//! # filesigner - Content-Hash Markers for Source Files
//!
//! filesigner appends a random identifier, a SHA-256 of the file body, and
//! a timestamp to a text file as comment lines in the file's own language.
//! Later it recomputes the hash to tell whether the file changed since it
//! was signed, or strips the markers to restore the original body.
//!
//! ## Quick Start
//!
//! ```no_run
//! use filesigner::integrity::{remove_markers, sign_file, verify_file};
//! use std::path::Path;
//!
//! # fn example() -> filesigner::error::Result<()> {
//! let path = Path::new("script.py");
//!
//! let record = sign_file(path, None)?;
//! println!("{record}");
//!
//! let report = verify_file(path, None)?;
//! println!("{}", report.format_cli());
//!
//! remove_markers(path, None)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`integrity`]: sign, verify, and remove operations
//! - [`marker`]: comment-style table, marker rendering/parsing, body extraction
//! - [`progress`]: phase notifications for callers showing progress
//! - [`error`]: error types
//! - [`config`]: persisted user configuration
//! - [`logging`]: tracing setup
//!
//! ## Signed File Layout
//!
//! ```text
//! <body, trailing whitespace trimmed>
//!
//! <open> _SIGNATURE_<uuid v4> <close>
//! <open> _HASH_<64 hex chars> <close>
//! <open> _SIGNED_<YYYY-MM-DD HH:MM:SS> <close>
//! ```
//!
//! `<close>` is omitted for line-comment languages.

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod integrity;
pub mod logging;
pub mod marker;
pub mod progress;

pub use error::{Result, SignerError};
pub use integrity::{
    SignatureRecord, VerificationOutcome, VerificationReport, remove_markers, sign_file,
    verify_file,
};
