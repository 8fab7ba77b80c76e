//! ドメイン型
//!
//! ファイル形式に依存しない語彙・日誌エントリの型と、その不変条件。

pub mod log_entry;
pub mod settings;
pub mod vocabulary;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use log_entry::{EntryDraft, LogEntry, LEGACY_LOG_COLUMNS, LOG_COLUMNS};
pub use settings::{AppendStrategy, LockSettings, WorkLogSettings};
pub use vocabulary::VocabularyConfig;

/// 管理対象の語彙（職員 / チャンネル）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vocabulary {
    Employees,
    Channels,
}

impl Vocabulary {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employees => "employee",
            Self::Channels => "channel",
        }
    }

    /// 画面表示用の名称
    pub fn label(&self) -> &'static str {
        match self {
            Self::Employees => "직원",
            Self::Channels => "채널",
        }
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
