//! Outbound ポート: ユースケースが外界を使うための trait

pub mod clock;
pub mod config_store;
pub mod env_resolver;
pub mod fs;
pub mod log;
pub mod log_store;

pub use clock::Clock;
pub use config_store::ConfigStore;
pub use env_resolver::EnvResolver;
pub use fs::FileSystem;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
pub use log_store::LogStore;
