//! ファイルシステム Outbound ポート
//!
//! ストアはこの trait 経由でのみファイル I/O を行う。

use crate::error::Error;
use std::path::Path;

/// ファイルシステム抽象（Outbound ポート）
///
/// 実装は `adapter::StdFileSystem` など。
pub trait FileSystem: Send + Sync {
    /// UTF-8 として読めない内容は `Error::Corrupt`。
    fn read_to_string(&self, path: &Path) -> Result<String, Error>;
    /// 末尾 1 バイト。存在しない・空なら None。
    fn last_byte(&self, path: &Path) -> Result<Option<u8>, Error>;
    /// 同じディレクトリの一時ファイルに書いてから rename で置き換える。
    /// 失敗した場合、元のファイルはそのまま残る。
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), Error>;
    /// to が既にあれば置き換える（同一ファイルシステム内で原子的）。
    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error>;
    fn create_dir_all(&self, path: &Path) -> Result<(), Error>;
    fn exists(&self, path: &Path) -> bool;
    fn remove_file(&self, path: &Path) -> Result<(), Error>;
    /// 追記用に開く（存在しなければ作成）。返した Writer を drop すると閉じる。
    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error>;
    /// 存在しない場合に限り作成して contents を書く。既に存在すれば Ok(false)。
    fn create_new(&self, path: &Path, contents: &str) -> Result<bool, Error>;
}
