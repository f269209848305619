//! Signature verification logic.
//!
//! Verification never touches the file. An unsigned or modified file is an
//! ordinary outcome, not an error; only I/O and decoding problems fail.

use crate::error::Result;
use crate::integrity::fsio::read_text;
use crate::integrity::hasher::{HASH_ALGORITHM, hash_body};
use crate::marker::{ParsedMarkers, parse_markers, strip_markers};
use crate::progress::{ProgressSink, notify, phase};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Result category of a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationOutcome {
    /// Recomputed hash equals the embedded hash
    Valid,
    /// Markers present but the body no longer matches
    Tampered,
    /// Identifier or hash marker missing
    Unsigned,
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Tampered => write!(f, "tampered"),
            Self::Unsigned => write!(f, "unsigned"),
        }
    }
}

/// Outcome of verifying one file, with the embedded fields for display.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// Path of the verified file
    pub path: String,

    pub outcome: VerificationOutcome,

    /// Identifier found in the file
    pub identifier: Option<String>,

    /// Hash found in the file
    pub stored_hash: Option<String>,

    /// Timestamp found in the file
    pub signed_at: Option<String>,

    /// Hash recomputed over the body (absent for unsigned files)
    pub actual_hash: Option<String>,

    /// Human-readable summary
    pub message: String,
}

impl VerificationReport {
    pub fn is_valid(&self) -> bool {
        self.outcome == VerificationOutcome::Valid
    }

    /// Format the report for terminal display.
    pub fn format_cli(&self) -> String {
        let signed = self.signed_at.as_deref().unwrap_or("N/A");
        let id = self.identifier.as_deref().unwrap_or("N/A");

        match self.outcome {
            VerificationOutcome::Valid => {
                let stored = self.stored_hash.as_deref().unwrap_or_default();
                format!(
                    "✓ PASS: {}\n  \
                    File: {}\n  \
                    ID: {id}\n  \
                    Hash: {}... ({HASH_ALGORITHM})\n  \
                    Signed: {signed}",
                    self.message,
                    self.path,
                    stored.get(..32).unwrap_or(stored),
                )
            }
            VerificationOutcome::Tampered => {
                let mut output = format!(
                    "✗ FAIL: {}\n  \
                    File: {}\n  \
                    ID: {id}\n  \
                    Expected: {}\n  ",
                    self.message,
                    self.path,
                    self.stored_hash.as_deref().unwrap_or_default()
                );

                if let Some(actual) = &self.actual_hash {
                    output.push_str(&format!("Actual:   {actual}\n  "));
                }

                output.push_str(&format!("Signed: {signed}\n  "));
                output.push_str("File may have been modified after signing");
                output
            }
            VerificationOutcome::Unsigned => {
                format!("✗ UNSIGNED: {}\n  File: {}", self.message, self.path)
            }
        }
    }
}

/// Verify the signature embedded in `path`.
///
/// # Errors
///
/// - `NotFound` if `path` is not an existing regular file
/// - `Encoding` if the content is not valid UTF-8
/// - `Io` on read failure
///
/// # Example
///
/// ```no_run
/// use filesigner::integrity::verify_file;
/// use std::path::Path;
///
/// # fn example() -> filesigner::error::Result<()> {
/// let report = verify_file(Path::new("script.py"), None)?;
///
/// if report.is_valid() {
///     println!("{}", report.format_cli());
/// } else {
///     eprintln!("{}", report.format_cli());
///     std::process::exit(1);
/// }
/// # Ok(())
/// # }
/// ```
pub fn verify_file(path: &Path, progress: Option<&dyn ProgressSink>) -> Result<VerificationReport> {
    notify(progress, phase::READING);
    let content = read_text(path)?;

    notify(progress, phase::EXTRACTING);
    let markers = parse_markers(&content);

    if markers.is_signed() {
        notify(progress, phase::VERIFYING);
    }
    let report = check_markers(path, &content, markers);

    if report.outcome == VerificationOutcome::Tampered {
        tracing::warn!("Hash mismatch for {}", path.display());
    } else {
        tracing::debug!("Verified {}: {}", path.display(), report.outcome);
    }

    Ok(report)
}

/// Pure core of verification; `path` is only used to label the report.
pub fn verify_content(path: &Path, content: &str) -> VerificationReport {
    check_markers(path, content, parse_markers(content))
}

fn check_markers(path: &Path, content: &str, markers: ParsedMarkers) -> VerificationReport {
    if !markers.is_signed() {
        return unsigned_report(path, markers);
    }

    let actual = hash_body(&strip_markers(content));
    let (outcome, message) = if markers.hash.as_deref() == Some(actual.as_str()) {
        (
            VerificationOutcome::Valid,
            "File integrity verified successfully",
        )
    } else {
        (VerificationOutcome::Tampered, "Hash mismatch detected")
    };

    VerificationReport {
        path: path.display().to_string(),
        outcome,
        identifier: markers.identifier,
        stored_hash: markers.hash,
        signed_at: markers.signed_at,
        actual_hash: Some(actual),
        message: message.to_owned(),
    }
}

fn unsigned_report(path: &Path, markers: ParsedMarkers) -> VerificationReport {
    VerificationReport {
        path: path.display().to_string(),
        outcome: VerificationOutcome::Unsigned,
        identifier: markers.identifier,
        stored_hash: markers.hash,
        signed_at: markers.signed_at,
        actual_hash: None,
        message: "No valid signature found (file unsigned or signature corrupted)".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::integrity::signer::{sign_content, sign_file};
    use crate::marker::builtin_styles;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_verify_content_valid() {
        let (signed, record) = sign_content("fn main() {}\n", "rs", builtin_styles());
        let report = verify_content(Path::new("main.rs"), &signed);

        assert!(report.is_valid());
        assert_eq!(report.identifier, Some(record.identifier.to_string()));
        assert_eq!(report.stored_hash, report.actual_hash);
        assert_eq!(report.signed_at, Some(record.timestamp()));
    }

    #[test]
    fn test_verify_content_tampered() {
        let (signed, record) = sign_content("a\nb", "py", builtin_styles());
        let modified = signed.replacen("a\nb", "a\nc", 1);
        let report = verify_content(Path::new("x.py"), &modified);

        assert_eq!(report.outcome, VerificationOutcome::Tampered);
        assert_eq!(report.stored_hash, Some(record.content_hash));
        assert_ne!(report.stored_hash, report.actual_hash);
        assert!(report.message.contains("Hash mismatch"));
    }

    #[test]
    fn test_verify_content_unsigned() {
        let report = verify_content(Path::new("plain.txt"), "just text\n");

        assert_eq!(report.outcome, VerificationOutcome::Unsigned);
        assert!(report.actual_hash.is_none());
        assert!(report.message.contains("No valid signature"));
    }

    #[test]
    fn test_hash_without_identifier_is_unsigned() {
        let report = verify_content(Path::new("half.py"), "x\n# _HASH_abcdef\n");

        assert_eq!(report.outcome, VerificationOutcome::Unsigned);
        assert_eq!(report.stored_hash.as_deref(), Some("abcdef"));
    }

    #[test]
    fn test_missing_timestamp_still_verifies() {
        let (signed, _) = sign_content("body", "py", builtin_styles());
        let without_time: String = signed
            .lines()
            .filter(|l| !l.contains("_SIGNED_"))
            .map(|l| format!("{l}\n"))
            .collect();

        let report = verify_content(Path::new("x.py"), &without_time);
        assert!(report.is_valid());
        assert_eq!(report.signed_at, None);
        assert!(report.format_cli().contains("Signed: N/A"));
    }

    #[test]
    fn test_verify_file_does_not_modify() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.sql");
        fs::write(&path, "select 1;").unwrap();
        sign_file(&path, None).unwrap();
        let before = fs::read(&path).unwrap();

        let report = verify_file(&path, None).unwrap();

        assert!(report.is_valid());
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_verify_file_unsigned_skips_hash_phase() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.lua");
        fs::write(&path, "print(1)").unwrap();

        let seen = std::cell::RefCell::new(Vec::new());
        let sink = |p: &str| seen.borrow_mut().push(p.to_owned());
        let report = verify_file(&path, Some(&sink)).unwrap();

        assert_eq!(report.outcome, VerificationOutcome::Unsigned);
        assert_eq!(*seen.borrow(), vec![phase::READING, phase::EXTRACTING]);
    }

    #[test]
    fn test_verify_crlf_copy_of_lf_signed_file() {
        let (signed, _) = sign_content("a = 1\nb = 2\n", "py", builtin_styles());
        let report = verify_content(Path::new("win.py"), &signed.replace('\n', "\r\n"));

        assert!(report.is_valid(), "{}", report.format_cli());
    }

    #[test]
    fn test_verify_missing_file_is_error() {
        let err = verify_file(Path::new("/nonexistent/a.py"), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_format_cli_pass_truncates_hash() {
        let (signed, record) = sign_content("data", "py", builtin_styles());
        let output = verify_content(Path::new("test.py"), &signed).format_cli();

        assert!(output.contains("✓ PASS"));
        assert!(output.contains("test.py"));
        assert!(output.contains(&format!("Hash: {}...", &record.content_hash[..32])));
        assert!(!output.contains(&record.content_hash));
    }

    #[test]
    fn test_format_cli_fail() {
        let (signed, _) = sign_content("original", "py", builtin_styles());
        let output = verify_content(Path::new("test.py"), &signed.replace("original", "modified"))
            .format_cli();

        assert!(output.contains("✗ FAIL"));
        assert!(output.contains("Expected:"));
        assert!(output.contains("Actual:"));
    }

    #[test]
    fn test_outcome_serializes_lowercase() {
        let json = serde_json::to_string(&VerificationOutcome::Tampered).unwrap();
        assert_eq!(json, "\"tampered\"");
    }
}
