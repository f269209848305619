//! Rendering and parsing of the three marker lines.

use super::style::CommentStyles;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const SIGNATURE_TAG: &str = "_SIGNATURE_";
pub const HASH_TAG: &str = "_HASH_";
pub const SIGNED_TAG: &str = "_SIGNED_";

/// `chrono` format of the `_SIGNED_` timestamp (local time, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static SIGNATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_SIGNATURE_([a-f0-9\-]+)").expect("signature pattern"));
static HASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_HASH_([a-f0-9]+)").expect("hash pattern"));
static SIGNED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_SIGNED_([0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2})")
        .expect("timestamp pattern")
});

/// The three comment lines appended after a signed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerLines {
    pub signature: String,
    pub hash: String,
    pub signed: String,
}

impl MarkerLines {
    /// Lines in file order, each terminated by `\n`.
    pub fn to_block(&self) -> String {
        format!("{}\n{}\n{}\n", self.signature, self.hash, self.signed)
    }
}

/// Render the marker lines for a file with the given extension.
pub fn render_markers(
    styles: &CommentStyles,
    extension: &str,
    identifier: &str,
    hash: &str,
    timestamp: &str,
) -> MarkerLines {
    let style = styles.for_extension(extension);
    MarkerLines {
        signature: style.wrap(&format!("{SIGNATURE_TAG}{identifier}")),
        hash: style.wrap(&format!("{HASH_TAG}{hash}")),
        signed: style.wrap(&format!("{SIGNED_TAG}{timestamp}")),
    }
}

/// Marker fields found in a file, each independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedMarkers {
    pub identifier: Option<String>,
    pub hash: Option<String>,
    pub signed_at: Option<String>,
}

impl ParsedMarkers {
    /// A file counts as signed only when both identifier and hash are present.
    pub fn is_signed(&self) -> bool {
        self.identifier.is_some() && self.hash.is_some()
    }
}

/// Locate marker fields anywhere in `text`, regardless of comment syntax.
///
/// The first occurrence of each tag wins. Never fails: a missing tag is
/// simply `None`.
pub fn parse_markers(text: &str) -> ParsedMarkers {
    ParsedMarkers {
        identifier: first_capture(&SIGNATURE_RE, text),
        hash: first_capture(&HASH_RE, text),
        signed_at: first_capture(&SIGNED_RE, text),
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}
