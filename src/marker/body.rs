//! Recover the logical body of a file by dropping marker lines.

use super::codec::{HASH_TAG, SIGNATURE_TAG, SIGNED_TAG};
use std::borrow::Cow;

/// Tags whose presence anywhere in a line marks it for removal.
pub const MARKER_TAGS: [&str; 3] = [SIGNATURE_TAG, HASH_TAG, SIGNED_TAG];

pub fn is_marker_line(line: &str) -> bool {
    MARKER_TAGS.iter().any(|tag| line.contains(tag))
}

/// Turn `\r\n` and lone `\r` line breaks into `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Strip marker lines and normalise surrounding whitespace.
///
/// Line breaks are first normalised to `\n`, so a CRLF file hashes the same
/// as its LF twin. After removal the text is trimmed and any run of three or
/// more newlines becomes exactly two. Whitespace-only lines containing
/// spaces or tabs are left alone.
///
/// The same function feeds the hash at sign time, the hash at verify time,
/// and the restored content after removal, so those always agree.
pub fn strip_markers(text: &str) -> String {
    let text = normalize_newlines(text);
    let kept: Vec<&str> = text
        .split('\n')
        .filter(|line| !is_marker_line(line))
        .collect();

    let mut body = kept.join("\n").trim().to_owned();
    while body.contains("\n\n\n") {
        body = body.replace("\n\n\n", "\n\n");
    }
    body
}
