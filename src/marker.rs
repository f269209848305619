//! Signature marker lines
//!
//! A signed file ends with three comment lines written in the syntax of the
//! file's language:
//!
//! ```text
//! print('x')
//!
//! # _SIGNATURE_6f1c2a3b-0d4e-4f5a-8b6c-7d8e9f0a1b2c
//! # _HASH_<64 lowercase hex chars>
//! # _SIGNED_2025-03-14 09:26:53
//! ```
//!
//! ## Architecture
//!
//! - [`style`]: extension to comment-syntax table
//! - [`codec`]: rendering marker lines and parsing them back
//! - [`body`]: removing marker lines to recover the hashed body
//!
//! ## Limitations
//!
//! Parsing is a plain pattern search over the whole text. A body that
//! legitimately contains a tag such as `_HASH_deadbeef` before it is ever
//! signed is read as carrying a marker, and that line is dropped from the
//! body when signing, verifying, or removing.

pub mod body;
pub mod codec;
pub mod style;

pub use body::{is_marker_line, normalize_newlines, strip_markers};
pub use codec::{
    HASH_TAG, MarkerLines, ParsedMarkers, SIGNATURE_TAG, SIGNED_TAG, TIMESTAMP_FORMAT,
    parse_markers, render_markers,
};
pub use style::{CommentStyle, CommentStyles, FALLBACK_STYLE, builtin_styles};
