//! 作業日誌ストア Outbound ポート

use crate::domain::{EntryDraft, LogEntry};
use crate::error::Error;

/// 追記専用の作業日誌
///
/// 更新・削除・項目検索は持たない（並べ替えや絞り込みは呼び出し側で行う）。
pub trait LogStore: Send + Sync {
    /// 保存順（古い順）の全件。ファイルが無ければ空。
    fn list(&self) -> Result<Vec<LogEntry>, Error>;

    /// 題名・リンクを検証し、記録時刻を付けて末尾に 1 件追加する
    fn append(&self, draft: EntryDraft) -> Result<LogEntry, Error>;

    /// 列スキーマ（ファイルが無くても同じ列を返す）
    fn columns(&self) -> &'static [&'static str];
}
