//! Ports & Adapters のポート定義
//!
//! - inbound: なし（画面側は usecase を直接呼ぶ）
//! - outbound: ユースケースが外界（FS・時刻・ログ・環境変数・ストア）を使うための trait

pub mod outbound;
