//! 環境変数解決 Outbound ポート
//!
//! 保存先パス・ロック設定を環境変数から解決する。
//! ユースケースはこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::WorkLogSettings;
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// 設定一式を解決する
    ///
    /// 優先順位（各ファイル）:
    /// 1. BITBUZZ_CONFIG_FILE / BITBUZZ_LOG_FILE / BITBUZZ_OPS_LOG
    /// 2. BITBUZZ_HOME 直下の既定ファイル名
    /// 3. カレントディレクトリ直下の既定ファイル名
    fn resolve_settings(&self) -> Result<WorkLogSettings, Error>;
}
