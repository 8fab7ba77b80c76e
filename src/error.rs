//! エラーハンドリング
//!
//! 入力不備（Validation / NotFound）はその場で却下して状態を変えない。
//! I/O 失敗と破損（Corrupt）は呼び出し側へそのまま返す。自動リトライはしない。

use crate::domain::Vocabulary;
use std::path::PathBuf;

/// 入力検証エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    MissingTitle,
    #[error("url must not be empty")]
    MissingUrl,
    #[error("{0} name must not be empty")]
    EmptyName(Vocabulary),
    #[error("{vocabulary} '{name}' already exists")]
    Duplicate { vocabulary: Vocabulary, name: String },
}

/// クレート共通のエラー型
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("{vocabulary} '{name}' not found")]
    NotFound { vocabulary: Vocabulary, name: String },
    #[error("I/O failure: {0}")]
    Io(String),
    #[error("lock on '{}' not acquired within {waited_ms} ms", path.display())]
    LockTimeout { path: PathBuf, waited_ms: u64 },
    #[error("corrupted data in '{}': {detail}", path.display())]
    Corrupt { path: PathBuf, detail: String },
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// エラーの大分類（呼び出し側の分岐用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Io,
    Corruption,
}

impl Error {
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn corrupt(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Error::Corrupt {
            path: path.into(),
            detail: detail.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Io(_) | Error::LockTimeout { .. } | Error::Config(_) => ErrorKind::Io,
            Error::Corrupt { .. } => ErrorKind::Corruption,
        }
    }

    /// 入力を直せば済む（保存済みの状態には触れていない）エラーか
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation | ErrorKind::NotFound)
    }

    /// 画面表示用のメッセージ（韓国語）
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(ValidationError::MissingTitle)
            | Error::Validation(ValidationError::MissingUrl) => {
                "제목과 링크를 빠짐없이 입력해주세요.".to_string()
            }
            Error::Validation(ValidationError::EmptyName(v)) => {
                format!("{} 이름을 입력해주세요.", v.label())
            }
            Error::Validation(ValidationError::Duplicate { vocabulary, name }) => {
                format!("'{}'은(는) 이미 등록된 {}입니다.", name, vocabulary.label())
            }
            Error::NotFound { vocabulary, name } => {
                format!("'{}'은(는) 등록되지 않은 {}입니다.", name, vocabulary.label())
            }
            Error::LockTimeout { .. } => {
                "다른 작업이 저장 중입니다. 잠시 후 다시 시도해주세요.".to_string()
            }
            Error::Corrupt { path, .. } => {
                format!("데이터 파일이 손상되었습니다: {}", path.display())
            }
            Error::Io(_) | Error::Config(_) => format!("저장소 오류: {}", self),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
