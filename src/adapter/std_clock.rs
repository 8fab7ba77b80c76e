//! 標準時刻実装（chrono のローカル時刻を委譲）

use crate::ports::outbound::Clock;
use chrono::NaiveDateTime;

/// システム時計を使う Clock 実装
#[derive(Debug, Clone, Default)]
pub struct StdClock;

impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }

    fn now_local(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// 常に同じ時刻を返す Clock 実装（テスト用）
#[derive(Debug, Clone)]
pub struct FixedClock {
    at: NaiveDateTime,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.at.and_utc().timestamp_millis().max(0) as u64
    }

    fn now_local(&self) -> NaiveDateTime {
        self.at
    }
}
