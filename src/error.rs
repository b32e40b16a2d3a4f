//! ストレージ境界のエラー型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("localStorageが利用できません")]
    Unavailable,

    #[error("書き込み失敗 ({key}): {message}")]
    Write { key: String, message: String },

    #[error("デコード失敗 ({key}): {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("未対応のスキーマバージョン ({key}): {found}")]
    UnsupportedVersion { key: String, found: u32 },

    #[error("不正なデータ ({key}): {reason}")]
    Invalid { key: String, reason: String },
}

impl StoreError {
    pub fn invalid(key: &str, reason: impl Into<String>) -> Self {
        StoreError::Invalid {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
