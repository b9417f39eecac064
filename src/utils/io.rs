//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents with standardized error handling.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::internal_io(
                format!("File not found: {}", path.display()),
                Some(operation.to_string()),
            )
        } else {
            Error::internal_io(e.to_string(), Some(operation.to_string()))
        }
    })
}

/// Write content to file with standardized error handling.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Write content to file atomically (write to .tmp, then rename).
///
/// The rename is atomic on POSIX filesystems, so readers see either the
/// old content or the new content.
pub fn write_file_atomic(path: &Path, content: &str, operation: &str) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    })?;

    let filename = path.file_name().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    })?;

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("{} (write temp)", operation)))
    })?;

    fs::rename(&tmp_path, path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("{} (rename)", operation))))?;

    Ok(())
}

/// Create a directory and its parents if missing.
pub fn ensure_dir(path: &Path, operation: &str) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn read_file_succeeds_for_existing_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "test content").unwrap();

        let content = read_file(temp.path(), "test read").unwrap();
        assert!(content.contains("test content"));
    }

    #[test]
    fn read_file_returns_error_for_missing_file() {
        let err = read_file(Path::new("/nonexistent/path.txt"), "test read").unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
        assert!(err.details["error"]
            .as_str()
            .unwrap()
            .starts_with("File not found"));
    }

    #[test]
    fn write_file_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        write_file(&path, "old", "seed").unwrap();

        write_file_atomic(&path, "new", "test write").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!dir.path().join("data.json.tmp").exists());
    }

    #[test]
    fn write_file_returns_error_for_invalid_path() {
        let err = write_file(
            Path::new("/nonexistent/dir/file.txt"),
            "content",
            "test write",
        )
        .unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn ensure_dir_creates_nested_dirs() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested, "test mkdir").unwrap();
        assert!(nested.is_dir());
    }
}
