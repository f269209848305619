//! Strip signature markers from a file.

use crate::error::Result;
use crate::integrity::fsio::{LineEnding, read_text, write_atomic};
use crate::marker::strip_markers;
use crate::progress::{ProgressSink, notify, phase};
use std::path::Path;

/// Remove all marker lines from `path`, restoring the unsigned body.
///
/// Succeeds silently whether or not the file carried markers. If stripping
/// leaves the content byte-identical nothing is written. Call
/// [`verify_file`](crate::integrity::verify_file) first to tell the two
/// cases apart.
///
/// # Errors
///
/// - `NotFound` if `path` is not an existing regular file
/// - `Encoding` if the content is not valid UTF-8
/// - `Io` if reading or the atomic replace fails
pub fn remove_markers(path: &Path, progress: Option<&dyn ProgressSink>) -> Result<()> {
    notify(progress, phase::READING);
    let original = read_text(path)?;

    notify(progress, phase::REMOVING);
    let body = strip_markers(&original);
    let restored = LineEnding::detect(&original).apply(&body);
    if *restored == *original {
        tracing::debug!("Nothing to remove from {}", path.display());
        return Ok(());
    }

    notify(progress, phase::WRITING);
    write_atomic(path, &restored)?;

    tracing::info!("Removed signature markers from {}", path.display());
    Ok(())
}
