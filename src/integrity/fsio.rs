//! Checked reads and crash-safe writes shared by the operations.

use crate::error::{Result, SignerError};
use std::borrow::Cow;
use std::fs;
use std::io::Write as _;
use std::path::Path;
use tempfile::NamedTempFile;

/// Read `path` as UTF-8 text.
///
/// Missing paths and paths that are not regular files are `NotFound`;
/// invalid UTF-8 is `Encoding`.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(SignerError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SignerError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            SignerError::io(path, e)
        }
    })?;

    String::from_utf8(bytes).map_err(|e| SignerError::Encoding {
        path: path.to_path_buf(),
        source: e.utf8_error(),
    })
}

/// Line terminator a file was written with.
///
/// Bodies are always hashed with `\n` line breaks; this records what to put
/// back when the file is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub(crate) fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    /// Convert `\n`-only text to this line ending.
    pub(crate) fn apply(self, text: &str) -> Cow<'_, str> {
        match self {
            Self::Lf => Cow::Borrowed(text),
            Self::CrLf => Cow::Owned(text.replace('\n', "\r\n")),
        }
    }
}

/// Replace the content of `path` with `contents`.
///
/// Symlinks are resolved first so the file they point to is rewritten and
/// the link itself survives. Data goes to a temporary file in the target's
/// directory which is then renamed over it, so a failure leaves the original
/// untouched. The original file's permissions are carried over.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let target = match fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(SignerError::io(path, e)),
    };
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| SignerError::io(path, e))?;
    temp.write_all(contents.as_bytes())
        .map_err(|e| SignerError::io(path, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| SignerError::io(path, e))?;

    if let Ok(metadata) = fs::metadata(&target)
        && let Err(e) = fs::set_permissions(temp.path(), metadata.permissions())
    {
        tracing::debug!("Could not copy permissions to {}: {e}", temp.path().display());
    }

    // The temporary file is deleted on drop if persisting fails
    temp.persist(&target)
        .map_err(|e| SignerError::io(path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_missing_file() {
        let err = read_text(Path::new("/nonexistent/file.py")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_read_text_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = read_text(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_read_text_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.py");
        fs::write(&path, [0x70, 0xff, 0xfe, 0x0a]).unwrap();

        let err = read_text(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.rs");
        fs::write(&path, "old content that is longer").unwrap();

        write_atomic(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        // No temporary files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt as _;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.sh");
        fs::write(&path, "echo hi").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        write_atomic(&path, "echo bye").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_writes_through_symlink() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.py");
        let link = dir.path().join("link.py");
        fs::write(&real, "print('x')").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        write_atomic(&link, "print('y')").unwrap();

        let link_meta = fs::symlink_metadata(&link).unwrap();
        assert!(link_meta.file_type().is_symlink(), "link was replaced");
        assert_eq!(fs::read_to_string(&real).unwrap(), "print('y')");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_line_ending_detect_and_apply() {
        assert_eq!(LineEnding::detect("a\nb\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\r\nb"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("no newline"), LineEnding::Lf);

        assert_eq!(LineEnding::Lf.apply("a\nb"), "a\nb");
        assert_eq!(LineEnding::CrLf.apply("a\n\nb\n"), "a\r\n\r\nb\r\n");
    }

    #[test]
    fn test_write_atomic_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("x.py");

        let err = write_atomic(&path, "x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
