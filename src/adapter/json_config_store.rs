//! 語彙設定を bitbuzz_config.json で保存・読み込みするアダプタ
//!
//! 形式は `{ "employees": [...], "channels": [...] }`（インデント 4、非 ASCII はそのまま）。

use crate::adapter::guarded_file::{FileLock, GuardedFile};
use crate::domain::{LockSettings, Vocabulary, VocabularyConfig};
use crate::error::{Error, ValidationError};
use crate::ports::outbound::{Clock, ConfigStore, FileSystem};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// JSON ファイル 1 つに語彙を保存する ConfigStore 実装
pub struct JsonConfigStore {
    file: GuardedFile,
}

impl JsonConfigStore {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        clock: Arc<dyn Clock>,
        path: impl AsRef<Path>,
        lock: LockSettings,
    ) -> Self {
        Self {
            file: GuardedFile::new(fs, clock, path.as_ref(), lock),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn read_locked(&self, lock: &FileLock<'_>) -> Result<VocabularyConfig, Error> {
        match lock.read()? {
            Some(s) => parse_document(self.path(), &s),
            None => Ok(VocabularyConfig::default()),
        }
    }

    fn write_locked(&self, lock: &FileLock<'_>, config: &VocabularyConfig) -> Result<(), Error> {
        if let Some((vocabulary, name)) = config.find_duplicate() {
            return Err(ValidationError::Duplicate {
                vocabulary,
                name: name.to_string(),
            }
            .into());
        }
        lock.replace(&render_document(config)?)
    }

    /// ロックを保持したまま読込・変更・保存する（失敗時は何も書かない）
    fn update<F>(&self, mutate: F) -> Result<VocabularyConfig, Error>
    where
        F: FnOnce(&mut VocabularyConfig) -> Result<(), Error>,
    {
        let lock = self.file.lock()?;
        let mut config = self.read_locked(&lock)?;
        mutate(&mut config)?;
        self.write_locked(&lock, &config)?;
        Ok(config)
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> Result<VocabularyConfig, Error> {
        let lock = self.file.lock()?;
        self.read_locked(&lock)
    }

    fn save(&self, config: &VocabularyConfig) -> Result<(), Error> {
        let lock = self.file.lock()?;
        self.write_locked(&lock, config)
    }

    fn add(&self, vocabulary: Vocabulary, name: &str) -> Result<VocabularyConfig, Error> {
        self.update(|c| c.add(vocabulary, name))
    }

    fn remove(&self, vocabulary: Vocabulary, name: &str) -> Result<VocabularyConfig, Error> {
        self.update(|c| c.remove(vocabulary, name))
    }
}

fn parse_document(path: &Path, s: &str) -> Result<VocabularyConfig, Error> {
    let config: VocabularyConfig =
        serde_json::from_str(s).map_err(|e| Error::corrupt(path, e.to_string()))?;
    if let Some((vocabulary, name)) = config.find_duplicate() {
        return Err(Error::corrupt(
            path,
            format!("duplicate {} '{}'", vocabulary, name),
        ));
    }
    Ok(config)
}

fn render_document(config: &VocabularyConfig) -> Result<String, Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    config
        .serialize(&mut ser)
        .map_err(|e| Error::io_msg(format!("Failed to render config: {}", e)))?;
    String::from_utf8(buf).map_err(|e| Error::io_msg(e.to_string()))
}
