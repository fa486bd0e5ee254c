use crate::model::ReviewId;
use crate::{MAX_TEXT_LEN, MIN_TEXT_LEN};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Rating is required")]
    MissingRating,

    #[error("Rating {0} is outside the 1-5 range")]
    RatingOutOfRange(u8),

    #[error("Review text has {0} characters, minimum is {min}", min = MIN_TEXT_LEN)]
    TextTooShort(usize),

    #[error("Review text has {0} characters, maximum is {max}", max = MAX_TEXT_LEN)]
    TextTooLong(usize),
}

/// Error reported by a [`Store`](crate::store::Store) implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Permission denied")]
    PermissionDenied,
}

impl StoreError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Backend(Box::new(err))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("No user is signed in")]
    NotAuthenticated,

    /// Cancelled before completion. `persisted` carries the review id
    /// when the review write had already succeeded; in that case the
    /// library rating was not propagated.
    #[error("Operation cancelled")]
    Cancelled { persisted: Option<ReviewId> },

    #[error("Review write failed: {0}")]
    PersistenceFailed(#[source] StoreError),

    /// The review is persisted, only the denormalized library rating
    /// failed to propagate. Non-fatal for the caller's success path.
    #[error("Review {id} saved, but library rating update failed: {source}")]
    DenormalizationFailed {
        id: ReviewId,
        #[source]
        source: StoreError,
    },
}
