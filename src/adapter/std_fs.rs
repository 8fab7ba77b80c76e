//! 標準ファイルシステム実装（std::fs を委譲）

use crate::error::Error;
use crate::ports::outbound::FileSystem;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// 標準ライブラリの fs をそのまま委譲する FileSystem 実装
#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, Error> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => Error::corrupt(path, format!("not valid UTF-8: {}", e)),
            _ => Error::io_msg(format!("Failed to read '{}': {}", path.display(), e)),
        })
    }

    fn last_byte(&self, path: &Path) -> Result<Option<u8>, Error> {
        let read_err =
            |e: std::io::Error| Error::io_msg(format!("Failed to read '{}': {}", path.display(), e));
        let mut f = match std::fs::File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(read_err(e)),
        };
        if f.metadata().map_err(read_err)?.len() == 0 {
            return Ok(None);
        }
        let mut buf = [0u8; 1];
        f.seek(SeekFrom::End(-1))
            .and_then(|_| f.read_exact(&mut buf))
            .map_err(read_err)?;
        Ok(Some(buf[0]))
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), Error> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
            Error::io_msg(format!(
                "Failed to create temp file in '{}': {}",
                dir.display(),
                e
            ))
        })?;
        temp.write_all(contents.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| {
                Error::io_msg(format!(
                    "Failed to write temp file for '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        temp.persist(path).map_err(|e| {
            Error::io_msg(format!("Failed to replace '{}': {}", path.display(), e.error))
        })?;
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error> {
        std::fs::rename(from, to).map_err(|e| {
            Error::io_msg(format!(
                "Failed to rename '{}' to '{}': {}",
                from.display(),
                to.display(),
                e
            ))
        })
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Error> {
        std::fs::create_dir_all(path).map_err(|e| {
            Error::io_msg(format!("Failed to create directory '{}': {}", path.display(), e))
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_file(&self, path: &Path) -> Result<(), Error> {
        std::fs::remove_file(path).map_err(|e| {
            Error::io_msg(format!("Failed to remove file '{}': {}", path.display(), e))
        })
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error> {
        let f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                Error::io_msg(format!("Failed to open '{}' for append: {}", path.display(), e))
            })?;
        Ok(Box::new(f))
    }

    fn create_new(&self, path: &Path, contents: &str) -> Result<bool, Error> {
        let mut f = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
        {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => {
                return Err(Error::io_msg(format!(
                    "Failed to create '{}': {}",
                    path.display(),
                    e
                )))
            }
        };
        f.write_all(contents.as_bytes()).map_err(|e| {
            Error::io_msg(format!("Failed to write '{}': {}", path.display(), e))
        })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.json");
        let fs = StdFileSystem;
        std::fs::write(&path, "old").unwrap();
        fs.write_atomic(&path, "new").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "new");
        // 一時ファイルが残っていないこと
        let names: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_write_atomic_missing_dir_keeps_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("a.json");
        let err = StdFileSystem.write_atomic(&path, "x").unwrap_err();
        assert!(err.to_string().contains("temp file"));
    }

    #[test]
    fn test_create_new_is_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.lock");
        let fs = StdFileSystem;
        assert!(fs.create_new(&path, "1").unwrap());
        assert!(!fs.create_new(&path, "2").unwrap());
        assert_eq!(fs.read_to_string(&path).unwrap(), "1");
    }

    #[test]
    fn test_open_append_adds_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let fs = StdFileSystem;
        std::fs::write(&path, "a\n").unwrap();
        {
            let mut w = fs.open_append(&path).unwrap();
            w.write_all(b"b\n").unwrap();
        }
        assert_eq!(fs.read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_non_utf8_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cp949.csv");
        // CP949 の「김」
        std::fs::write(&path, b"\xb1\xe8").unwrap();
        let err = StdFileSystem.read_to_string(&path).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Corruption);
    }

    #[test]
    fn test_last_byte() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.csv");
        let fs = StdFileSystem;
        assert_eq!(fs.last_byte(&path).unwrap(), None);
        std::fs::write(&path, "").unwrap();
        assert_eq!(fs.last_byte(&path).unwrap(), None);
        std::fs::write(&path, "a,b").unwrap();
        assert_eq!(fs.last_byte(&path).unwrap(), Some(b'b'));
        std::fs::write(&path, "a,b\n").unwrap();
        assert_eq!(fs.last_byte(&path).unwrap(), Some(b'\n'));
    }

    #[test]
    fn test_rename_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("a");
        let to = dir.path().join("b");
        std::fs::write(&from, "new").unwrap();
        std::fs::write(&to, "old").unwrap();
        StdFileSystem.rename(&from, &to).unwrap();
        assert!(!StdFileSystem.exists(&from));
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "new");
    }
}
