//! 作業日誌を bitbuzz_log.csv に追記するアダプタ
//!
//! ヘッダ行 + 1 エントリ 1 行。列順は LOG_COLUMNS で固定。
//! 旧ツールの韓国語ヘッダ（LEGACY_LOG_COLUMNS）のファイルもそのまま読み書きできる。
//! 既存行には一切手を触れず、新しい行を末尾に足すだけ。

use crate::adapter::guarded_file::{FileLock, GuardedFile};
use crate::domain::{AppendStrategy, EntryDraft, LockSettings, LogEntry, LEGACY_LOG_COLUMNS, LOG_COLUMNS};
use crate::error::Error;
use crate::ports::outbound::{Clock, FileSystem, LogStore};
use std::path::Path;
use std::sync::Arc;

/// CSV ファイルに日誌を保存する LogStore 実装
pub struct CsvLogStore {
    file: GuardedFile,
    clock: Arc<dyn Clock>,
    strategy: AppendStrategy,
}

impl CsvLogStore {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        clock: Arc<dyn Clock>,
        path: impl AsRef<Path>,
        lock: LockSettings,
        strategy: AppendStrategy,
    ) -> Self {
        Self {
            file: GuardedFile::new(fs, Arc::clone(&clock), path.as_ref(), lock),
            clock,
            strategy,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn strategy(&self) -> AppendStrategy {
        self.strategy
    }

    /// 全体を検証したうえで、旧内容 + 新しい行 を一時ファイル経由で置き換える
    fn append_rewrite(&self, lock: &FileLock<'_>, row: &str) -> Result<(), Error> {
        let mut out = match lock.read()? {
            Some(existing) if !existing.trim().is_empty() => {
                parse_log(self.path(), &existing)?;
                let mut existing = existing;
                if !existing.ends_with('\n') {
                    existing.push('\n');
                }
                existing
            }
            _ => encode_header()?,
        };
        out.push_str(row);
        lock.replace(&out)
    }

    /// 既存ファイルには 1 行だけ書き足す。新規（または空）のときはヘッダごと置き換えで作る。
    /// 最終行に改行が無ければ先に補う。
    fn append_in_place(&self, lock: &FileLock<'_>, row: &str) -> Result<(), Error> {
        match lock.last_byte()? {
            None => {
                let mut out = encode_header()?;
                out.push_str(row);
                lock.replace(&out)
            }
            Some(b'\n') => lock.append(row),
            Some(_) => lock.append(&format!("\n{}", row)),
        }
    }
}

impl LogStore for CsvLogStore {
    fn list(&self) -> Result<Vec<LogEntry>, Error> {
        let lock = self.file.lock()?;
        match lock.read()? {
            Some(s) => parse_log(self.path(), &s),
            None => Ok(Vec::new()),
        }
    }

    fn append(&self, draft: EntryDraft) -> Result<LogEntry, Error> {
        draft.validate()?;
        let entry = draft.into_entry(self.clock.now_local());
        let row = encode_row(&entry)?;

        let lock = self.file.lock()?;
        match self.strategy {
            AppendStrategy::AtomicRewrite => self.append_rewrite(&lock, &row)?,
            AppendStrategy::InPlaceAppend => self.append_in_place(&lock, &row)?,
        }
        Ok(entry)
    }

    fn columns(&self) -> &'static [&'static str] {
        &LOG_COLUMNS
    }
}

/// CSV 全体を読み、ヘッダと各行を検証する
pub fn parse_log(path: &Path, s: &str) -> Result<Vec<LogEntry>, Error> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(s.as_bytes());
    let headers = rdr
        .headers()
        .map_err(|e| Error::corrupt(path, format!("unreadable header: {}", e)))?
        .clone();
    check_header(path, &headers)?;

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec.map_err(|e| Error::corrupt(path, e.to_string()))?;
        let entry: LogEntry = rec.deserialize(None).map_err(|e| {
            let line = rec.position().map(|p| p.line()).unwrap_or(0);
            Error::corrupt(path, format!("line {}: {}", line, e))
        })?;
        out.push(entry);
    }
    Ok(out)
}

fn check_header(path: &Path, headers: &csv::StringRecord) -> Result<(), Error> {
    let got: Vec<&str> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| if i == 0 { h.trim_start_matches('\u{feff}') } else { h })
        .map(str::trim)
        .collect();
    if got == LOG_COLUMNS || got == LEGACY_LOG_COLUMNS {
        return Ok(());
    }
    Err(Error::corrupt(
        path,
        format!("unexpected header [{}]", got.join(",")),
    ))
}

fn writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(w: csv::Writer<Vec<u8>>) -> Result<String, Error> {
    let bytes = w
        .into_inner()
        .map_err(|e| Error::io_msg(format!("Failed to encode row: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::io_msg(e.to_string()))
}

fn encode_header() -> Result<String, Error> {
    let mut w = writer();
    w.write_record(LOG_COLUMNS)
        .map_err(|e| Error::io_msg(format!("Failed to encode header: {}", e)))?;
    finish(w)
}

fn encode_row(entry: &LogEntry) -> Result<String, Error> {
    let mut w = writer();
    w.serialize(entry)
        .map_err(|e| Error::io_msg(format!("Failed to encode row: {}", e)))?;
    finish(w)
}
