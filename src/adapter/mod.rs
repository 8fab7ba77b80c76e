//! アダプター（外界の I/O を trait で抽象化）
//!
//! ユースケースは ports::outbound の trait 経由でのみファイル・時刻・環境変数に触れる。
//! 実装は標準実装（Std*）やファイル形式ごとのストア、テスト用の固定実装を注入する。

pub mod csv_log_store;
pub mod file_json_log;
pub mod guarded_file;
pub mod json_config_store;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;

pub use csv_log_store::CsvLogStore;
pub use file_json_log::{FileJsonLog, NoopLog};
pub use guarded_file::{FileLock, GuardedFile};
pub use json_config_store::JsonConfigStore;
pub use std_clock::{FixedClock, StdClock};
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
