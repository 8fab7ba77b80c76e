//! BITBUZZ 作業日誌ライブラリ
//!
//! 制作した動画の記録（CSV 追記ログ）と、職員・チャンネルの語彙（JSON 設定）を
//! 永続化する。画面側はこのクレートの `WorkLogUseCase` 経由でのみファイルに触れる。

/// エラーハンドリング
pub mod error;

/// ドメイン型（語彙・日誌エントリ・設定値）
pub mod domain;

/// Outbound ポート（FS・時刻・ログ・環境変数・ストア）
pub mod ports;

/// 標準アダプタ
pub mod adapter;

/// ユースケース（画面から呼ばれる操作と現況ボード）
pub mod usecase;

/// 配線
pub mod wiring;

#[cfg(test)]
mod tests;

pub use error::{Error, ErrorKind, ValidationError};
pub use usecase::{BoardFilter, BoardView, Notice, WorkLogUseCase};
pub use wiring::{wire_from_env, wire_worklog};
