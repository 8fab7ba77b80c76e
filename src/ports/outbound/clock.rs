//! 時刻 Outbound ポート
//!
//! 記録時刻（recordedAt）とロックの取得時刻はこの trait 経由で取得する。

use chrono::NaiveDateTime;

/// 時刻取得の抽象
///
/// 実装は `adapter::StdClock` やテスト用の固定時刻など。
pub trait Clock: Send + Sync {
    /// 現在時刻をミリ秒（Unix epoch）で返す
    fn now_ms(&self) -> u64;

    /// 現在のローカル日時（タイムゾーン情報なし）
    fn now_local(&self) -> NaiveDateTime;
}
