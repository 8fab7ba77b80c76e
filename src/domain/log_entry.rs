//! 作業日誌エントリ（bitbuzz_log.csv の 1 行）

use crate::error::ValidationError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// CSV の列（順序固定。書き換え後も後方互換のため変えない）
pub const LOG_COLUMNS: [&str; 6] = [
    "date",
    "employeeName",
    "channelName",
    "title",
    "url",
    "recordedAt",
];

/// 旧ツールが書き出していたヘッダ（列の意味・順序は LOG_COLUMNS と同一）
pub const LEGACY_LOG_COLUMNS: [&str; 6] = ["날짜", "직원명", "채널명", "제목", "링크_URL", "입력시간"];

/// 記録時刻の表記（秒精度）
pub const RECORDED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 保存済みの日誌エントリ
///
/// 識別子は持たず、ファイル内の行位置がそのまま同一性になる。作成後は変更しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// 作業日（記録日時ではない）
    pub date: NaiveDate,
    /// 職員名（語彙との整合は強制しない）
    pub employee_name: String,
    /// チャンネル名（同上）
    pub channel_name: String,
    pub title: String,
    pub url: String,
    /// 追記時にサーバ側で付与する時刻
    #[serde(with = "recorded_at_format")]
    pub recorded_at: NaiveDateTime,
}

/// 入力フォームから届く未保存のエントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub date: NaiveDate,
    pub employee_name: String,
    pub channel_name: String,
    pub title: String,
    pub url: String,
}

impl EntryDraft {
    pub fn new(
        date: NaiveDate,
        employee_name: impl Into<String>,
        channel_name: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            date,
            employee_name: employee_name.into(),
            channel_name: channel_name.into(),
            title: title.into(),
            url: url.into(),
        }
    }

    /// 題名とリンクが空でないこと。URL の形式は見ない。
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.url.is_empty() {
            return Err(ValidationError::MissingUrl);
        }
        Ok(())
    }

    /// 記録時刻を付けて確定する（秒未満は切り捨てる）
    pub fn into_entry(self, recorded_at: NaiveDateTime) -> LogEntry {
        LogEntry {
            date: self.date,
            employee_name: self.employee_name,
            channel_name: self.channel_name,
            title: self.title,
            url: self.url,
            recorded_at: truncate_to_seconds(recorded_at),
        }
    }
}

pub(crate) fn truncate_to_seconds(t: NaiveDateTime) -> NaiveDateTime {
    use chrono::Timelike;
    t.with_nanosecond(0).unwrap_or(t)
}

mod recorded_at_format {
    use super::RECORDED_AT_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format(RECORDED_AT_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, RECORDED_AT_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S"))
            .map_err(|e| serde::de::Error::custom(format!("invalid recordedAt '{}': {}", raw, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, url: &str) -> EntryDraft {
        EntryDraft::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "김철수",
            "숏멘토",
            title,
            url,
        )
    }

    #[test]
    fn test_validate_requires_title_and_url() {
        assert_eq!(
            draft("", "https://youtube.com/x").validate(),
            Err(ValidationError::MissingTitle)
        );
        assert_eq!(draft("제목A", "").validate(), Err(ValidationError::MissingUrl));
        assert!(draft("제목A", "not a url").validate().is_ok());
    }

    #[test]
    fn test_into_entry_truncates_subsecond() {
        let t = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_milli_opt(9, 30, 15, 750)
            .unwrap();
        let e = draft("제목A", "https://youtube.com/x").into_entry(t);
        assert_eq!(e.recorded_at.format(RECORDED_AT_FORMAT).to_string(), "2024-01-01 09:30:15");
    }

    #[test]
    fn test_json_uses_camel_case_columns() {
        let t = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let e = draft("제목A", "https://youtube.com/x").into_entry(t);
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["employeeName"], "김철수");
        assert_eq!(v["recordedAt"], "2024-01-01 09:00:00");
        assert_eq!(v["date"], "2024-01-01");
    }
}
