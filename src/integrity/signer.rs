//! Append signature markers to a file.

use crate::error::Result;
use crate::integrity::fsio::{LineEnding, read_text, write_atomic};
use crate::integrity::hasher::hash_body;
use crate::integrity::record::SignatureRecord;
use crate::marker::{CommentStyles, builtin_styles, render_markers, strip_markers};
use crate::progress::{ProgressSink, notify, phase};
use std::path::Path;

/// Sign `path` using the built-in comment-style table.
///
/// See [`sign_file_with`].
pub fn sign_file(path: &Path, progress: Option<&dyn ProgressSink>) -> Result<SignatureRecord> {
    sign_file_with(path, builtin_styles(), progress)
}

/// Sign `path`, replacing any markers it already carries.
///
/// The file is read, stripped of old markers, hashed, and rewritten as the
/// stripped body, one blank line, and three fresh marker lines. Signing an
/// already signed file therefore replaces its markers rather than stacking a
/// second set. A CRLF file stays CRLF, markers included.
///
/// # Errors
///
/// - `NotFound` if `path` is not an existing regular file
/// - `Encoding` if the content is not valid UTF-8
/// - `Io` if reading or the atomic replace fails; the file is then unchanged
///
/// # Example
///
/// ```no_run
/// use filesigner::integrity::sign_file;
/// use std::path::Path;
///
/// # fn example() -> filesigner::error::Result<()> {
/// let record = sign_file(Path::new("script.py"), None)?;
/// println!("{record}");
/// # Ok(())
/// # }
/// ```
pub fn sign_file_with(
    path: &Path,
    styles: &CommentStyles,
    progress: Option<&dyn ProgressSink>,
) -> Result<SignatureRecord> {
    notify(progress, phase::READING);
    let original = read_text(path)?;
    let line_ending = LineEnding::detect(&original);

    notify(progress, phase::GENERATING);
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let (signed, record) = sign_content(&original, extension, styles);

    notify(progress, phase::WRITING);
    write_atomic(path, &line_ending.apply(&signed))?;

    tracing::info!(
        "Signed {} (id {}, hash {})",
        path.display(),
        record.identifier,
        record.content_hash
    );
    Ok(record)
}

/// Pure core of signing: returns the new file text and its record.
pub fn sign_content(
    text: &str,
    extension: &str,
    styles: &CommentStyles,
) -> (String, SignatureRecord) {
    let body = strip_markers(text);
    let record = SignatureRecord::new(hash_body(&body));

    let markers = render_markers(
        styles,
        extension,
        &record.identifier.to_string(),
        &record.content_hash,
        &record.timestamp(),
    );

    (format!("{body}\n\n{}", markers.to_block()), record)
}
