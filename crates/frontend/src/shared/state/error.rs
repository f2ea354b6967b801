use crate::shared::storage::StorageError;
use contracts::domain::common::CrudError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error(transparent)]
    Crud(#[from] CrudError),

    /// The change is kept in memory but did not reach storage
    #[error("変更は画面に反映されましたが保存できませんでした: {0}")]
    Persist(#[from] StorageError),

    /// Bundled or saved data could not be parsed
    #[error("データを読み込めません: {0}")]
    Malformed(String),

    #[error("画面が閉じられたため操作を完了できませんでした")]
    Disposed,
}

impl DomainError {
    /// Whether in-memory state already holds the change
    pub fn is_persist_failure(&self) -> bool {
        matches!(self, DomainError::Persist(_))
    }
}
