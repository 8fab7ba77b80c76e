//! 語彙設定ストア Outbound ポート

use crate::domain::{Vocabulary, VocabularyConfig};
use crate::error::Error;

/// 職員・チャンネル語彙の永続化
///
/// 変更系はすべて「ロック → 読込 → 変更 → 全体保存 → 解放」の 1 サイクルで行う。
pub trait ConfigStore: Send + Sync {
    /// 保存済みドキュメント。一度も保存されていなければ既定値（NotFound にはしない）。
    fn load(&self) -> Result<VocabularyConfig, Error>;

    /// ドキュメント全体を置き換える
    fn save(&self, config: &VocabularyConfig) -> Result<(), Error>;

    /// 語彙の末尾に追加して保存し、保存後のドキュメントを返す
    fn add(&self, vocabulary: Vocabulary, name: &str) -> Result<VocabularyConfig, Error>;

    /// 語彙から 1 件削除して保存し、保存後のドキュメントを返す
    fn remove(&self, vocabulary: Vocabulary, name: &str) -> Result<VocabularyConfig, Error>;

    fn add_employee(&self, name: &str) -> Result<VocabularyConfig, Error> {
        self.add(Vocabulary::Employees, name)
    }

    fn remove_employee(&self, name: &str) -> Result<VocabularyConfig, Error> {
        self.remove(Vocabulary::Employees, name)
    }

    fn add_channel(&self, name: &str) -> Result<VocabularyConfig, Error> {
        self.add(Vocabulary::Channels, name)
    }

    fn remove_channel(&self, name: &str) -> Result<VocabularyConfig, Error> {
        self.remove(Vocabulary::Channels, name)
    }
}
