//! 職員・チャンネルの語彙（bitbuzz_config.json の中身）

use super::Vocabulary;
use crate::error::{Error, ValidationError};
use serde::{Deserialize, Serialize};

const DEFAULT_EMPLOYEES: [&str; 3] = ["김철수", "이영희", "박지민"];
const DEFAULT_CHANNELS: [&str; 4] = ["숏멘토", "댓골", "겉약속근", "스트리트TMI"];

/// 語彙ドキュメント
///
/// 各リストは挿入順で、重複を含まない（大文字小文字を区別した完全一致）。
/// 空リストも正当な状態。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyConfig {
    pub employees: Vec<String>,
    pub channels: Vec<String>,
}

impl Default for VocabularyConfig {
    /// ドキュメントが一度も保存されていないときの初期値
    fn default() -> Self {
        Self {
            employees: DEFAULT_EMPLOYEES.iter().map(|s| s.to_string()).collect(),
            channels: DEFAULT_CHANNELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl VocabularyConfig {
    pub fn new(employees: Vec<String>, channels: Vec<String>) -> Self {
        Self { employees, channels }
    }

    pub fn terms(&self, vocabulary: Vocabulary) -> &[String] {
        match vocabulary {
            Vocabulary::Employees => &self.employees,
            Vocabulary::Channels => &self.channels,
        }
    }

    fn terms_mut(&mut self, vocabulary: Vocabulary) -> &mut Vec<String> {
        match vocabulary {
            Vocabulary::Employees => &mut self.employees,
            Vocabulary::Channels => &mut self.channels,
        }
    }

    pub fn contains(&self, vocabulary: Vocabulary, name: &str) -> bool {
        self.terms(vocabulary).iter().any(|t| t == name)
    }

    /// 末尾に追加する。空文字・既存の名前は却下し、状態を変えない。
    pub fn add(&mut self, vocabulary: Vocabulary, name: &str) -> Result<(), Error> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName(vocabulary).into());
        }
        if self.contains(vocabulary, name) {
            return Err(ValidationError::Duplicate {
                vocabulary,
                name: name.to_string(),
            }
            .into());
        }
        self.terms_mut(vocabulary).push(name.to_string());
        Ok(())
    }

    /// 一致する要素を 1 件取り除く。残りの相対順序は保つ。
    pub fn remove(&mut self, vocabulary: Vocabulary, name: &str) -> Result<(), Error> {
        let terms = self.terms_mut(vocabulary);
        match terms.iter().position(|t| t == name) {
            Some(idx) => {
                terms.remove(idx);
                Ok(())
            }
            None => Err(Error::NotFound {
                vocabulary,
                name: name.to_string(),
            }),
        }
    }

    /// 重複が無いことを確認する。最初に見つかった重複を返す。
    pub fn find_duplicate(&self) -> Option<(Vocabulary, &str)> {
        for vocabulary in [Vocabulary::Employees, Vocabulary::Channels] {
            let terms = self.terms(vocabulary);
            for (i, t) in terms.iter().enumerate() {
                if terms[..i].contains(t) {
                    return Some((vocabulary, t.as_str()));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_lists() {
        let c = VocabularyConfig::default();
        assert_eq!(c.employees, vec!["김철수", "이영희", "박지민"]);
        assert_eq!(c.channels, vec!["숏멘토", "댓골", "겉약속근", "스트리트TMI"]);
        assert!(c.find_duplicate().is_none());
    }

    #[test]
    fn test_add_appends_and_rejects_duplicate() {
        let mut c = VocabularyConfig::default();
        c.add(Vocabulary::Employees, "정수민").unwrap();
        let err = c.add(Vocabulary::Employees, "정수민").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            c.employees,
            vec!["김철수", "이영희", "박지민", "정수민"]
        );
    }

    #[test]
    fn test_add_is_case_sensitive() {
        let mut c = VocabularyConfig::new(vec![], vec!["TMI".to_string()]);
        c.add(Vocabulary::Channels, "tmi").unwrap();
        assert_eq!(c.channels, vec!["TMI", "tmi"]);
    }

    #[test]
    fn test_add_empty_name_rejected() {
        let mut c = VocabularyConfig::new(vec![], vec![]);
        let err = c.add(Vocabulary::Channels, "").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyName(Vocabulary::Channels))
        ));
        assert!(c.channels.is_empty());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut c = VocabularyConfig::default();
        c.remove(Vocabulary::Channels, "댓골").unwrap();
        assert_eq!(c.channels, vec!["숏멘토", "겉약속근", "스트리트TMI"]);
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let mut c = VocabularyConfig::default();
        let before = c.clone();
        let err = c.remove(Vocabulary::Employees, "없는사람").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(c, before);
    }

    #[test]
    fn test_find_duplicate() {
        let c = VocabularyConfig::new(
            vec!["a".to_string()],
            vec!["x".to_string(), "y".to_string(), "x".to_string()],
        );
        assert_eq!(c.find_duplicate(), Some((Vocabulary::Channels, "x")));
    }
}
