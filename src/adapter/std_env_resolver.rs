//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::{AppendStrategy, LockSettings, WorkLogSettings};
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_HOME: &str = "BITBUZZ_HOME";
pub const ENV_CONFIG_FILE: &str = "BITBUZZ_CONFIG_FILE";
pub const ENV_LOG_FILE: &str = "BITBUZZ_LOG_FILE";
pub const ENV_OPS_LOG: &str = "BITBUZZ_OPS_LOG";
pub const ENV_LOCK_TIMEOUT_MS: &str = "BITBUZZ_LOCK_TIMEOUT_MS";
pub const ENV_APPEND_STRATEGY: &str = "BITBUZZ_APPEND_STRATEGY";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn resolve_settings(&self) -> Result<WorkLogSettings, Error> {
        let cwd = env::current_dir()
            .map_err(|e| Error::io_msg(format!("Failed to get current dir: {}", e)))?;
        resolve_settings_with(|key| env::var(key).ok(), cwd)
    }
}

/// 変数の取得方法を差し替えられる解決本体（空文字は未設定扱い）
pub fn resolve_settings_with<F>(lookup: F, cwd: PathBuf) -> Result<WorkLogSettings, Error>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|s| !s.is_empty());

    let base = get(ENV_HOME).map(PathBuf::from).unwrap_or(cwd);
    let mut settings = WorkLogSettings::in_dir(&base);

    if let Some(p) = get(ENV_CONFIG_FILE) {
        settings.config_file = PathBuf::from(p);
    }
    if let Some(p) = get(ENV_LOG_FILE) {
        settings.log_file = PathBuf::from(p);
    }
    if let Some(p) = get(ENV_OPS_LOG) {
        settings.ops_log_file = if p.eq_ignore_ascii_case("off") {
            None
        } else {
            Some(PathBuf::from(p))
        };
    }
    if let Some(raw) = get(ENV_LOCK_TIMEOUT_MS) {
        let ms: u64 = raw.trim().parse().map_err(|_| {
            Error::config(format!("{} must be milliseconds, got '{}'", ENV_LOCK_TIMEOUT_MS, raw))
        })?;
        settings.lock = LockSettings {
            timeout: Duration::from_millis(ms),
            ..settings.lock
        };
    }
    if let Some(raw) = get(ENV_APPEND_STRATEGY) {
        settings.append_strategy = AppendStrategy::parse(&raw).ok_or_else(|| {
            Error::config(format!(
                "{} must be 'rewrite' or 'append', got '{}'",
                ENV_APPEND_STRATEGY, raw
            ))
        })?;
    }
    Ok(settings)
}
