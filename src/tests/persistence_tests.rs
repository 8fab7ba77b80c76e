use crate::domain::{AppendStrategy, VocabularyConfig, WorkLogSettings};
use crate::error::ErrorKind;
use crate::wiring::wire_worklog;
use chrono::NaiveDate;
use std::fs;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

#[test]
fn test_entries_survive_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = WorkLogSettings::in_dir(tmp.path());
    {
        let uc = wire_worklog(&settings);
        uc.append_entry(day(), "김철수", "숏멘토", "재시작 전", "https://youtube.com/x")
            .unwrap();
        uc.add_channel("새채널").unwrap();
    }
    let reopened = wire_worklog(&settings);
    let entries = reopened.list_entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "재시작 전");
    assert!(reopened
        .get_config()
        .unwrap()
        .channels
        .contains(&"새채널".to_string()));
}

#[test]
fn test_in_place_append_survives_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let settings =
        WorkLogSettings::in_dir(tmp.path()).with_append_strategy(AppendStrategy::InPlaceAppend);
    wire_worklog(&settings)
        .append_entry(day(), "박지민", "댓골", "하나", "https://youtube.com/1")
        .unwrap();
    wire_worklog(&settings)
        .append_entry(day(), "박지민", "댓골", "둘", "https://youtube.com/2")
        .unwrap();
    let titles: Vec<String> = wire_worklog(&settings)
        .list_entries()
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["하나", "둘"]);
}

#[test]
fn test_legacy_log_is_readable_and_appendable() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = WorkLogSettings::in_dir(tmp.path()).without_ops_log();
    let legacy = "날짜,직원명,채널명,제목,링크_URL,입력시간\n\
                  2024-01-02,이영희,댓골,예전 영상,https://youtube.com/old,2024-01-02 10:11:12\n";
    fs::write(&settings.log_file, legacy).unwrap();

    let uc = wire_worklog(&settings);
    uc.append_entry(day(), "김철수", "숏멘토", "새 영상", "https://youtube.com/new")
        .unwrap();

    let raw = fs::read_to_string(&settings.log_file).unwrap();
    assert!(raw.starts_with(legacy));
    let entries = uc.list_entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "예전 영상");
    assert_eq!(entries[1].title, "새 영상");
}

#[test]
fn test_corrupt_config_falls_back_without_overwrite() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = WorkLogSettings::in_dir(tmp.path());
    fs::write(&settings.config_file, "not json").unwrap();

    let uc = wire_worklog(&settings);
    assert_eq!(uc.get_config().unwrap_err().kind(), ErrorKind::Corruption);
    assert_eq!(uc.get_config_or_default(), VocabularyConfig::default());
    assert_eq!(
        uc.add_employee("정수민").unwrap_err().kind(),
        ErrorKind::Corruption
    );
    assert_eq!(fs::read_to_string(&settings.config_file).unwrap(), "not json");

    let ops = fs::read_to_string(settings.ops_log_file.as_ref().unwrap()).unwrap();
    assert!(ops.contains("falling back to default vocabulary"));
}

#[test]
fn test_non_utf8_config_falls_back_to_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = WorkLogSettings::in_dir(tmp.path()).without_ops_log();
    let cp949 = b"{\"employees\": [\"\xb1\xe8\"], \"channels\": []}";
    fs::write(&settings.config_file, cp949).unwrap();

    let uc = wire_worklog(&settings);
    assert_eq!(uc.get_config().unwrap_err().kind(), ErrorKind::Corruption);
    assert_eq!(uc.get_config_or_default(), VocabularyConfig::default());
    assert_eq!(fs::read(&settings.config_file).unwrap(), cp949.to_vec());
}

#[test]
fn test_corrupt_log_is_reported_not_lost() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = WorkLogSettings::in_dir(tmp.path()).without_ops_log();
    let broken = "date,employeeName,channelName,title,url,recordedAt\n2024-01-01,only,three\n";
    fs::write(&settings.log_file, broken).unwrap();

    let uc = wire_worklog(&settings);
    assert_eq!(uc.list_entries().unwrap_err().kind(), ErrorKind::Corruption);
    let err = uc
        .append_entry(day(), "김철수", "숏멘토", "x", "https://youtube.com/x")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Corruption);
    assert_eq!(fs::read_to_string(&settings.log_file).unwrap(), broken);
}

#[test]
fn test_ops_log_records_mutations() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = WorkLogSettings::in_dir(tmp.path());
    let uc = wire_worklog(&settings);
    uc.append_entry(day(), "김철수", "숏멘토", "x", "https://youtube.com/x")
        .unwrap();
    let _ = uc.remove_employee("없는사람");

    let ops = fs::read_to_string(settings.ops_log_file.as_ref().unwrap()).unwrap();
    let records: Vec<serde_json::Value> = ops
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert!(records
        .iter()
        .any(|r| r["message"] == "entry appended" && r["level"] == "info"));
    assert!(records
        .iter()
        .any(|r| r["message"] == "vocabulary remove rejected" && r["level"] == "warn"));
}

#[test]
fn test_storage_dir_created_on_first_write() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = WorkLogSettings::in_dir(tmp.path().join("nested").join("data")).without_ops_log();
    let uc = wire_worklog(&settings);
    uc.add_employee("정수민").unwrap();
    assert!(settings.config_file.exists());
}
