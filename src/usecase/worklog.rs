//! 画面から呼ばれる操作（語彙管理・作業登録・現況ボード）
//!
//! 状態は持たない。呼ぶたびにストアから読み直すので、変更後の再表示は
//! get_config() / list_entries() をもう一度呼べばよい。

use crate::domain::{EntryDraft, LogEntry, Vocabulary, VocabularyConfig};
use crate::error::Error;
use crate::ports::outbound::{ConfigStore, Log, LogLevel, LogRecord, LogStore};
use crate::usecase::board::{self, BoardFilter, BoardView, FilterOptions};
use chrono::NaiveDate;
use std::sync::Arc;

/// 成功時に画面へ出すメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    fn added(vocabulary: Vocabulary, name: &str) -> Self {
        let message = match vocabulary {
            Vocabulary::Employees => format!("'{}'님이 추가되었습니다.", name),
            Vocabulary::Channels => format!("'{}' 채널이 추가되었습니다.", name),
        };
        Self { message }
    }

    fn removed(vocabulary: Vocabulary, name: &str) -> Self {
        let message = match vocabulary {
            Vocabulary::Employees => format!("'{}'님이 삭제되었습니다.", name),
            Vocabulary::Channels => format!("'{}' 채널이 삭제되었습니다.", name),
        };
        Self { message }
    }

    /// 作業登録の完了メッセージ
    pub fn entry_registered(entry: &LogEntry) -> Self {
        Self {
            message: format!("{}님의 작업이 등록되었습니다!", entry.employee_name),
        }
    }
}

/// 作業日誌のユースケース
pub struct WorkLogUseCase {
    config_store: Arc<dyn ConfigStore>,
    log_store: Arc<dyn LogStore>,
    log: Arc<dyn Log>,
}

impl WorkLogUseCase {
    pub fn new(
        config_store: Arc<dyn ConfigStore>,
        log_store: Arc<dyn LogStore>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            config_store,
            log_store,
            log,
        }
    }

    /// 現在の語彙。破損していればエラー（既定値で上書きはしない）。
    pub fn get_config(&self) -> Result<VocabularyConfig, Error> {
        self.config_store
            .load()
            .inspect_err(|e| self.log_failure("config load failed", "config", e))
    }

    /// 読めなければ既定値で表示を続ける（選択肢が無くなるよりはよい）
    pub fn get_config_or_default(&self) -> VocabularyConfig {
        self.get_config().unwrap_or_else(|e| {
            self.emit(
                LogRecord::new(LogLevel::Warn, "falling back to default vocabulary")
                    .kind("config")
                    .field("error", e.to_string()),
            );
            VocabularyConfig::default()
        })
    }

    pub fn add_employee(&self, name: &str) -> Result<Notice, Error> {
        self.add_term(Vocabulary::Employees, name)
    }

    pub fn remove_employee(&self, name: &str) -> Result<Notice, Error> {
        self.remove_term(Vocabulary::Employees, name)
    }

    pub fn add_channel(&self, name: &str) -> Result<Notice, Error> {
        self.add_term(Vocabulary::Channels, name)
    }

    pub fn remove_channel(&self, name: &str) -> Result<Notice, Error> {
        self.remove_term(Vocabulary::Channels, name)
    }

    fn add_term(&self, vocabulary: Vocabulary, name: &str) -> Result<Notice, Error> {
        match self.config_store.add(vocabulary, name) {
            Ok(config) => {
                self.emit(
                    LogRecord::new(LogLevel::Info, "vocabulary term added")
                        .kind("config")
                        .field("vocabulary", vocabulary.as_str())
                        .field("name", name)
                        .field("size", config.terms(vocabulary).len()),
                );
                Ok(Notice::added(vocabulary, name))
            }
            Err(e) => {
                self.log_failure("vocabulary add rejected", "config", &e);
                Err(e)
            }
        }
    }

    fn remove_term(&self, vocabulary: Vocabulary, name: &str) -> Result<Notice, Error> {
        match self.config_store.remove(vocabulary, name) {
            Ok(config) => {
                self.emit(
                    LogRecord::new(LogLevel::Info, "vocabulary term removed")
                        .kind("config")
                        .field("vocabulary", vocabulary.as_str())
                        .field("name", name)
                        .field("size", config.terms(vocabulary).len()),
                );
                Ok(Notice::removed(vocabulary, name))
            }
            Err(e) => {
                self.log_failure("vocabulary remove rejected", "config", &e);
                Err(e)
            }
        }
    }

    /// 保存順（古い順）の全件
    pub fn list_entries(&self) -> Result<Vec<LogEntry>, Error> {
        self.log_store
            .list()
            .inspect_err(|e| self.log_failure("entry list failed", "entry", e))
    }

    /// 列スキーマ（一覧が空でも同じ列）
    pub fn entry_columns(&self) -> &'static [&'static str] {
        self.log_store.columns()
    }

    /// 作業を 1 件登録する。職員名・チャンネル名が語彙にあるかは確認しない。
    pub fn append_entry(
        &self,
        date: NaiveDate,
        employee_name: &str,
        channel_name: &str,
        title: &str,
        url: &str,
    ) -> Result<LogEntry, Error> {
        let draft = EntryDraft::new(date, employee_name, channel_name, title, url);
        match self.log_store.append(draft) {
            Ok(entry) => {
                self.emit(
                    LogRecord::new(LogLevel::Info, "entry appended")
                        .kind("entry")
                        .field("date", entry.date.to_string())
                        .field("employee", entry.employee_name.as_str())
                        .field("channel", entry.channel_name.as_str()),
                );
                Ok(entry)
            }
            Err(e) => {
                self.log_failure("entry append rejected", "entry", &e);
                Err(e)
            }
        }
    }

    /// 現況ボード（新しい順・絞り込み済み）
    pub fn board(&self, filter: &BoardFilter) -> Result<BoardView, Error> {
        Ok(board::board(self.list_entries()?, filter))
    }

    /// ボードの絞り込み選択肢
    pub fn filter_options(&self) -> Result<FilterOptions, Error> {
        Ok(board::filter_options(&self.list_entries()?))
    }

    fn log_failure(&self, message: &str, kind: &str, e: &Error) {
        let level = if e.is_recoverable() {
            LogLevel::Warn
        } else {
            LogLevel::Error
        };
        self.emit(
            LogRecord::new(level, message)
                .kind(kind)
                .field("error", e.to_string()),
        );
    }

    fn emit(&self, record: LogRecord) {
        self.log.emit(&record.layer("usecase"));
    }
}
