use entity::proposal::Status;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

pub type LifecycleResult<T> = Result<T, LifecycleError>;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("invalid price: {0}")]
    InvalidPrice(String),
    #[error("proposal already became a contract")]
    AlreadyApproved,
    #[error("entry already has a proposal number")]
    AlreadyPromoted,
    #[error("entry has not been promoted to a proposal yet")]
    NotPromoted,
    #[error("proposal must be concluded before creating a contract (status: {0})")]
    NotConcluded(Status),
    #[error("bad request: {0}")]
    InvalidInput(String),
    #[error("{kind} {id} not found")]
    RecordNotFound { kind: &'static str, id: Uuid },
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl LifecycleError {
    pub(crate) fn not_found(kind: &'static str, id: Uuid) -> Self {
        Self::RecordNotFound { kind, id }
    }

    /// Rule violations the caller can fix; everything else aborts the request.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            LifecycleError::RecordNotFound { .. } | LifecycleError::Database(_)
        )
    }
}
