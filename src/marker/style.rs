//! Extension to comment-syntax table.
//!
//! Marker lines have to be valid comments in the language of the file they
//! are appended to, otherwise signing a `.py` file would break the script.
//! The table maps a file extension to the tokens that open (and, for block
//! or markup comments, close) a comment.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

/// Comment syntax used to wrap a single marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentStyle {
    open: Cow<'static, str>,
    close: Option<Cow<'static, str>>,
}

impl CommentStyle {
    /// Line comment such as `#` or `//`.
    pub const fn line(token: &'static str) -> Self {
        Self {
            open: Cow::Borrowed(token),
            close: None,
        }
    }

    /// Block or markup comment such as `/* ... */` or `<!-- ... -->`.
    pub const fn block(open: &'static str, close: &'static str) -> Self {
        Self {
            open: Cow::Borrowed(open),
            close: Some(Cow::Borrowed(close)),
        }
    }

    /// Style built from user configuration.
    pub fn custom(open: impl Into<String>, close: Option<String>) -> Self {
        Self {
            open: Cow::Owned(open.into()),
            close: close.map(Cow::Owned),
        }
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> Option<&str> {
        self.close.as_deref()
    }

    /// Wrap `text` in this comment syntax.
    ///
    /// Line comments prefix the text; block comments surround it.
    pub fn wrap(&self, text: &str) -> String {
        match self.close() {
            Some(close) => format!("{} {text} {close}", self.open),
            None => format!("{} {text}", self.open),
        }
    }
}

/// Style used for extensions the table does not know about.
pub static FALLBACK_STYLE: CommentStyle = CommentStyle::line("#");

const BUILTIN_STYLES: [(&str, CommentStyle); 25] = [
    ("py", CommentStyle::line("#")),
    ("js", CommentStyle::line("//")),
    ("ts", CommentStyle::line("//")),
    ("jsx", CommentStyle::line("//")),
    ("tsx", CommentStyle::line("//")),
    ("cpp", CommentStyle::line("//")),
    ("c", CommentStyle::line("//")),
    ("java", CommentStyle::line("//")),
    ("cs", CommentStyle::line("//")),
    ("php", CommentStyle::line("//")),
    ("go", CommentStyle::line("//")),
    ("rs", CommentStyle::line("//")),
    ("swift", CommentStyle::line("//")),
    ("kt", CommentStyle::line("//")),
    ("scala", CommentStyle::line("//")),
    ("html", CommentStyle::block("<!--", "-->")),
    ("xml", CommentStyle::block("<!--", "-->")),
    ("css", CommentStyle::block("/*", "*/")),
    ("scss", CommentStyle::line("//")),
    ("sql", CommentStyle::line("--")),
    ("r", CommentStyle::line("#")),
    ("lua", CommentStyle::line("--")),
    ("sh", CommentStyle::line("#")),
    ("bash", CommentStyle::line("#")),
    ("rb", CommentStyle::line("#")),
];

static BUILTIN: LazyLock<CommentStyles> = LazyLock::new(|| CommentStyles {
    by_extension: BUILTIN_STYLES
        .iter()
        .map(|(ext, style)| ((*ext).to_owned(), style.clone()))
        .collect(),
});

/// The shared, read-only built-in table.
pub fn builtin_styles() -> &'static CommentStyles {
    &BUILTIN
}

/// Lowercase an extension and drop a single leading dot (`".PY"` -> `"py"`).
pub fn normalize_extension(extension: &str) -> String {
    extension
        .strip_prefix('.')
        .unwrap_or(extension)
        .to_lowercase()
}

/// Extension table with a `#` fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentStyles {
    by_extension: BTreeMap<String, CommentStyle>,
}

impl Default for CommentStyles {
    fn default() -> Self {
        builtin_styles().clone()
    }
}

impl CommentStyles {
    /// Table containing only the built-in entries.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Add or replace the style for `extension`, returning the previous one.
    pub fn insert(&mut self, extension: &str, style: CommentStyle) -> Option<CommentStyle> {
        self.by_extension
            .insert(normalize_extension(extension), style)
    }

    /// Case-insensitive lookup; unknown extensions get [`FALLBACK_STYLE`].
    pub fn for_extension(&self, extension: &str) -> &CommentStyle {
        self.by_extension
            .get(&normalize_extension(extension))
            .unwrap_or(&FALLBACK_STYLE)
    }

    /// Style for the final extension of `path`.
    ///
    /// Files without an extension (including dotfiles like `.bashrc`) use the
    /// fallback.
    pub fn for_path(&self, path: &Path) -> &CommentStyle {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self.for_extension(ext),
            None => &FALLBACK_STYLE,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommentStyle)> {
        self.by_extension
            .iter()
            .map(|(ext, style)| (ext.as_str(), style))
    }

    pub fn len(&self) -> usize {
        self.by_extension.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_extension.is_empty()
    }
}
