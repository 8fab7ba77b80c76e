//! 現況ボード（一覧の並べ替え・絞り込み）
//!
//! 保存済みの並びには触れない。list() の結果を受け取って表示用の並びを作るだけ。

use crate::domain::LogEntry;

/// 職員・チャンネルでの絞り込み条件
///
/// 空の軸は絞り込まない。値があれば、そのいずれかに一致するエントリだけ残す。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardFilter {
    pub employees: Vec<String>,
    pub channels: Vec<String>,
}

impl BoardFilter {
    pub fn employees<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.employees = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn channels<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.channels = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        let employee_ok =
            self.employees.is_empty() || self.employees.iter().any(|n| *n == entry.employee_name);
        let channel_ok =
            self.channels.is_empty() || self.channels.iter().any(|n| *n == entry.channel_name);
        employee_ok && channel_ok
    }
}

/// 表示用に並べ替え・絞り込み済みの一覧
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    pub rows: Vec<LogEntry>,
}

impl BoardView {
    /// 「まだデータがありません」表示の判定に使う
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// 絞り込みの選択肢（ボードに現れる職員名・チャンネル名）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub employees: Vec<String>,
    pub channels: Vec<String>,
}

/// 記録時刻の新しい順に並べる。同じ秒の記録は保存順で後の行を先にする。
pub fn sort_recent_first(entries: Vec<LogEntry>) -> Vec<LogEntry> {
    let mut indexed: Vec<(usize, LogEntry)> = entries.into_iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| {
        b.recorded_at
            .cmp(&a.recorded_at)
            .then_with(|| ib.cmp(ia))
    });
    indexed.into_iter().map(|(_, e)| e).collect()
}

/// 新しい順に並べてから絞り込む
pub fn board(entries: Vec<LogEntry>, filter: &BoardFilter) -> BoardView {
    let rows = sort_recent_first(entries)
        .into_iter()
        .filter(|e| filter.matches(e))
        .collect();
    BoardView { rows }
}

/// 新しい順に並べたときの出現順で、重複を除いた職員名・チャンネル名
pub fn filter_options(entries: &[LogEntry]) -> FilterOptions {
    let mut out = FilterOptions::default();
    for e in sort_recent_first(entries.to_vec()) {
        if !out.employees.contains(&e.employee_name) {
            out.employees.push(e.employee_name);
        }
        if !out.channels.contains(&e.channel_name) {
            out.channels.push(e.channel_name);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryDraft;
    use chrono::NaiveDate;

    fn entry(title: &str, employee: &str, channel: &str, hms: (u32, u32, u32)) -> LogEntry {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        EntryDraft::new(day, employee, channel, title, "https://youtube.com/x")
            .into_entry(day.and_hms_opt(hms.0, hms.1, hms.2).unwrap())
    }

    fn titles(view: &BoardView) -> Vec<&str> {
        view.rows.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_recent_first_with_stable_tie_break() {
        let entries = vec![
            entry("a", "김철수", "숏멘토", (9, 0, 0)),
            entry("b", "이영희", "댓골", (10, 0, 0)),
            entry("c", "김철수", "댓골", (10, 0, 0)),
            entry("d", "박지민", "숏멘토", (8, 0, 0)),
        ];
        let view = board(entries, &BoardFilter::default());
        assert_eq!(titles(&view), vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn test_filter_by_employee_and_channel() {
        let entries = vec![
            entry("a", "김철수", "숏멘토", (9, 0, 0)),
            entry("b", "이영희", "댓골", (10, 0, 0)),
            entry("c", "김철수", "댓골", (11, 0, 0)),
        ];
        let by_employee = board(entries.clone(), &BoardFilter::default().employees(["김철수"]));
        assert_eq!(titles(&by_employee), vec!["c", "a"]);

        let both = board(
            entries.clone(),
            &BoardFilter::default()
                .employees(["김철수", "이영희"])
                .channels(["댓골"]),
        );
        assert_eq!(titles(&both), vec!["c", "b"]);

        let none = board(entries, &BoardFilter::default().channels(["없는채널"]));
        assert!(none.is_empty());
    }

    #[test]
    fn test_filter_options_in_board_order() {
        let entries = vec![
            entry("a", "김철수", "숏멘토", (9, 0, 0)),
            entry("b", "이영희", "댓골", (10, 0, 0)),
            entry("c", "김철수", "댓골", (11, 0, 0)),
        ];
        let opts = filter_options(&entries);
        assert_eq!(opts.employees, vec!["김철수", "이영희"]);
        assert_eq!(opts.channels, vec!["댓골", "숏멘토"]);
    }

    #[test]
    fn test_empty_board() {
        let view = board(Vec::new(), &BoardFilter::default());
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
        assert_eq!(filter_options(&[]), FilterOptions::default());
    }
}
