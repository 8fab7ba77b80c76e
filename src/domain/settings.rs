//! 保存先パスとロック・追記方式の設定
//!
//! EnvResolver::resolve_settings() で解決し、wiring でストアの組み立てに使う。

use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "bitbuzz_config.json";
pub const LOG_FILENAME: &str = "bitbuzz_log.csv";
pub const OPS_LOG_RELATIVE: &str = "logs/worklog.jsonl";

/// 日誌の追記方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppendStrategy {
    /// 全体を読んで検証し、一時ファイル経由で置き換える（O(n)、途中失敗で旧版が残る）
    #[default]
    AtomicRewrite,
    /// 末尾に 1 行だけ書き足す（O(1)、書き込み途中で落ちると行が欠ける可能性がある）
    InPlaceAppend,
}

impl AppendStrategy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rewrite" | "atomic" => Some(Self::AtomicRewrite),
            "append" => Some(Self::InPlaceAppend),
            _ => None,
        }
    }
}

/// ファイルロックの待ち方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockSettings {
    /// これを超えて待ったら LockTimeout
    pub timeout: Duration,
    /// 再試行の間隔
    pub retry_interval: Duration,
    /// 取得時刻からこれ以上経ったロックファイルは放棄されたものとみなす
    pub stale_after: Duration,
}

impl Default for LockSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            retry_interval: Duration::from_millis(10),
            stale_after: Duration::from_secs(60),
        }
    }
}

/// 解決済みの設定一式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkLogSettings {
    pub config_file: PathBuf,
    pub log_file: PathBuf,
    /// 操作ログ（JSONL）。None なら出力しない
    pub ops_log_file: Option<PathBuf>,
    pub lock: LockSettings,
    pub append_strategy: AppendStrategy,
}

impl WorkLogSettings {
    /// base 直下に既定のファイル名で置く設定
    pub fn in_dir(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            config_file: base.join(CONFIG_FILENAME),
            log_file: base.join(LOG_FILENAME),
            ops_log_file: Some(base.join(OPS_LOG_RELATIVE)),
            lock: LockSettings::default(),
            append_strategy: AppendStrategy::default(),
        }
    }

    pub fn without_ops_log(mut self) -> Self {
        self.ops_log_file = None;
        self
    }

    pub fn with_append_strategy(mut self, strategy: AppendStrategy) -> Self {
        self.append_strategy = strategy;
        self
    }

    pub fn with_lock(mut self, lock: LockSettings) -> Self {
        self.lock = lock;
        self
    }
}
