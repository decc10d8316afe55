//! Reading and writing document files.

use crate::error::{Error, Result};
use log::info;
use std::path::Path;

/// Read a whole text file.
pub fn read_document(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Opened file: {} ({} bytes)", path.display(), content.len());
    Ok(content)
}

/// Write `content` to `path`, replacing whatever was there.
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Saved file: {} ({} bytes)", path.display(), content.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        let text = "line one\r\nline two\n\ttabbed — ünïcode\n\n";

        write_document(&path, text).unwrap();
        assert_eq!(read_document(&path).unwrap(), text);
        assert_eq!(std::fs::read(&path).unwrap(), text.as_bytes());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_document(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("notes.txt");
        let err = write_document(&path, "x").unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
    }
}
