//! 配線: 標準アダプタで WorkLogUseCase を組み立てる

use std::sync::Arc;

use crate::adapter::{
    CsvLogStore, FileJsonLog, JsonConfigStore, NoopLog, StdClock, StdEnvResolver, StdFileSystem,
};
use crate::domain::WorkLogSettings;
use crate::error::Error;
use crate::ports::outbound::{Clock, EnvResolver, FileSystem, Log, LogLevel, LogRecord};
use crate::usecase::WorkLogUseCase;

/// 配線: 与えられた設定で WorkLogUseCase を組み立てる
pub fn wire_worklog(settings: &WorkLogSettings) -> WorkLogUseCase {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let clock: Arc<dyn Clock> = Arc::new(StdClock);
    let log: Arc<dyn Log> = match &settings.ops_log_file {
        Some(path) => Arc::new(FileJsonLog::new(Arc::clone(&fs), path)),
        None => Arc::new(NoopLog),
    };
    let config_store = Arc::new(JsonConfigStore::new(
        Arc::clone(&fs),
        Arc::clone(&clock),
        &settings.config_file,
        settings.lock,
    ));
    let log_store = Arc::new(CsvLogStore::new(
        fs,
        clock,
        &settings.log_file,
        settings.lock,
        settings.append_strategy,
    ));
    log.emit(
        &LogRecord::new(LogLevel::Debug, "worklog wired")
            .layer("wiring")
            .kind("lifecycle")
            .field("config_file", settings.config_file.display().to_string())
            .field("log_file", settings.log_file.display().to_string()),
    );
    WorkLogUseCase::new(config_store, log_store, log)
}

/// 配線: 環境変数（BITBUZZ_*）から設定を解決して組み立てる
pub fn wire_from_env() -> Result<WorkLogUseCase, Error> {
    let settings = StdEnvResolver.resolve_settings()?;
    Ok(wire_worklog(&settings))
}
