// ChatTally - platform/fs.rs
//
// Filesystem helpers. Every handle opened here is owned by the caller's
// scope and closed on drop, including on error paths.

use crate::util::error::LoadError;
use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::Path;

/// Read the full content of a file as strict UTF-8.
///
/// Invalid UTF-8 is an error rather than being replaced: a mis-encoded
/// transcript contributes nothing instead of contributing mangled names.
pub fn read_file_utf8(path: &Path) -> Result<String, LoadError> {
    let mut file = File::open(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    String::from_utf8(bytes).map_err(|e| LoadError::InvalidEncoding {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Create (or truncate) an output file wrapped in a buffered writer.
pub fn create_output(path: &Path) -> io::Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new)
}

/// Create `dir` and any missing parents. Existing directories are fine.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_file_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.txt");
        std::fs::write(&path, "[12:00:00] émilie: salut\n").unwrap();
        assert_eq!(read_file_utf8(&path).unwrap(), "[12:00:00] émilie: salut\n");
    }

    #[test]
    fn test_read_file_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, b"[12:00:00] \xe9milie: salut\n").unwrap();
        assert!(matches!(
            read_file_utf8(&path),
            Err(LoadError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_file_utf8(&dir.path().join("absent.txt")),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn test_create_output_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old content that is long").unwrap();
        {
            let mut w = create_output(&path).unwrap();
            w.write_all(b"new").unwrap();
            w.flush().unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_ensure_dir_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("a").join("html");
        ensure_dir(&html).unwrap();
        ensure_dir(&html).unwrap();
        assert!(html.is_dir());
    }
}
