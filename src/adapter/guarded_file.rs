//! 1 ファイル分の排他と原子的な置き換え
//!
//! 同一プロセス内は Mutex、プロセス間は `<file>.lock` の排他作成で直列化する。
//! ロックファイルには取得者と取得時刻を JSON で書き、stale_after を過ぎたものは破棄して取り直す。
//! 破棄は `<file>.lock.stale.<token>` への rename で行い、退避したものが確認時と同じロックの場合だけ消す。
//! 書き込みは一時ファイル + rename の置き換えか、末尾への追記のどちらか。

use crate::domain::LockSettings;
use crate::error::Error;
use crate::ports::outbound::{Clock, FileSystem};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};
use std::time::{Duration, Instant};

static LOCK_SEQ: AtomicU64 = AtomicU64::new(0);

/// ロックファイルの中身
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LockMeta {
    pid: u32,
    acquired_at_ms: u64,
    /// 解放時に自分のロックかを確かめるための値
    token: String,
}

/// 排他付きのファイル
pub struct GuardedFile {
    fs: Arc<dyn FileSystem>,
    clock: Arc<dyn Clock>,
    path: PathBuf,
    lock_path: PathBuf,
    settings: LockSettings,
    local: Mutex<()>,
}

impl GuardedFile {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        clock: Arc<dyn Clock>,
        path: impl Into<PathBuf>,
        settings: LockSettings,
    ) -> Self {
        let path = path.into();
        let lock_path = sibling_path(&path, ".lock");
        Self {
            fs,
            clock,
            path,
            lock_path,
            settings,
            local: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    /// ロックを取る。timeout までに取れなければ LockTimeout。
    pub fn lock(&self) -> Result<FileLock<'_>, Error> {
        let started = Instant::now();

        let local = loop {
            match self.local.try_lock() {
                Ok(g) => break g,
                Err(TryLockError::Poisoned(p)) => break p.into_inner(),
                Err(TryLockError::WouldBlock) => self.wait_or_timeout(started)?,
            }
        };

        self.ensure_parent_dir()?;
        let meta = LockMeta {
            pid: std::process::id(),
            acquired_at_ms: 0,
            token: format!(
                "{}-{}-{}",
                std::process::id(),
                self.clock.now_ms(),
                LOCK_SEQ.fetch_add(1, Ordering::Relaxed)
            ),
        };
        loop {
            let meta = LockMeta {
                acquired_at_ms: self.clock.now_ms(),
                ..meta.clone()
            };
            let body = serde_json::to_string(&meta).map_err(|e| Error::io_msg(e.to_string()))?;
            if self.fs.create_new(&self.lock_path, &body)? {
                return Ok(FileLock {
                    file: self,
                    token: meta.token,
                    _local: local,
                });
            }
            if self.break_if_stale(&meta.token)? {
                continue;
            }
            self.wait_or_timeout(started)?;
        }
    }

    fn ensure_parent_dir(&self) -> Result<(), Error> {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => self.fs.create_dir_all(p),
            _ => Ok(()),
        }
    }

    fn wait_or_timeout(&self, started: Instant) -> Result<(), Error> {
        let waited = started.elapsed();
        if waited >= self.settings.timeout {
            return Err(Error::LockTimeout {
                path: self.path.clone(),
                waited_ms: duration_ms(waited),
            });
        }
        std::thread::sleep(self.settings.retry_interval.min(self.settings.timeout - waited));
        Ok(())
    }

    /// 放棄されたロックファイルなら破棄して true。読めない・新しいものは false。
    fn break_if_stale(&self, own_token: &str) -> Result<bool, Error> {
        let Ok(body) = self.fs.read_to_string(&self.lock_path) else {
            // 読む前に解放された
            return Ok(!self.fs.exists(&self.lock_path));
        };
        let Ok(stale) = serde_json::from_str::<LockMeta>(&body) else {
            return Ok(false);
        };
        let age_ms = self.clock.now_ms().saturating_sub(stale.acquired_at_ms);
        if age_ms <= duration_ms(self.settings.stale_after) {
            return Ok(false);
        }

        let tombstone = sibling_path(&self.lock_path, &format!(".stale.{}", own_token));
        if self.fs.rename(&self.lock_path, &tombstone).is_err() {
            // 他者が先に退避した
            return Ok(!self.fs.exists(&self.lock_path));
        }
        let moved = self.fs.read_to_string(&tombstone)?;
        let same = serde_json::from_str::<LockMeta>(&moved).is_ok_and(|m| m.token == stale.token);
        if !same {
            // 確認から退避までの間に取り直された新しいロックだった。元に戻して待つ。
            // 戻す前に第三者が取っていたら、そちらを優先する。
            self.fs.create_new(&self.lock_path, &moved)?;
        }
        self.fs.remove_file(&tombstone)?;
        Ok(same)
    }
}

/// 取得済みのロック。drop で解放する。
pub struct FileLock<'a> {
    file: &'a GuardedFile,
    token: String,
    _local: MutexGuard<'a, ()>,
}

impl FileLock<'_> {
    /// 対象ファイルの中身。存在しなければ None。
    pub fn read(&self) -> Result<Option<String>, Error> {
        if !self.file.fs.exists(&self.file.path) {
            return Ok(None);
        }
        self.file.fs.read_to_string(&self.file.path).map(Some)
    }

    /// 対象ファイルの末尾 1 バイト。存在しない・空なら None。
    pub fn last_byte(&self) -> Result<Option<u8>, Error> {
        self.file.fs.last_byte(&self.file.path)
    }

    /// 全体を原子的に置き換える
    pub fn replace(&self, contents: &str) -> Result<(), Error> {
        self.file.fs.write_atomic(&self.file.path, contents)
    }

    /// 末尾に書き足す（無ければ作成）
    pub fn append(&self, contents: &str) -> Result<(), Error> {
        let mut w = self.file.fs.open_append(&self.file.path)?;
        w.write_all(contents.as_bytes()).map_err(|e| {
            Error::io_msg(format!(
                "Failed to append to '{}': {}",
                self.file.path.display(),
                e
            ))
        })?;
        w.flush()?;
        Ok(())
    }
}

impl Drop for FileLock<'_> {
    fn drop(&mut self) {
        let fs = &self.file.fs;
        let lock_path = &self.file.lock_path;
        // stale 扱いで他者に取り直されていたら消さない
        let ours = fs
            .read_to_string(lock_path)
            .ok()
            .and_then(|body| serde_json::from_str::<LockMeta>(&body).ok())
            .map(|m| m.token == self.token)
            .unwrap_or(false);
        if ours {
            let _ = fs.remove_file(lock_path);
        }
    }
}

/// `<file><suffix>` のパス
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("data"));
    name.push(suffix);
    path.with_file_name(name)
}

fn duration_ms(d: Duration) -> u64 {
    d.as_millis().min(u128::from(u64::MAX)) as u64
}
