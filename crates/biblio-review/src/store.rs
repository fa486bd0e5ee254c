use crate::error::StoreError;
use crate::model::{RatingUpdate, Review, ReviewId};

/// Persistence capability, implemented by the backing document store.
///
/// Each call is expected to be atomic on its own record; no
/// transaction spanning several calls is assumed.
#[allow(async_fn_in_trait)]
pub trait Store {
    /// Persists a new review and returns the assigned id.
    async fn create_review(&self, record: &Review) -> Result<ReviewId, StoreError>;

    async fn update_review(&self, id: &ReviewId, record: &Review) -> Result<(), StoreError>;

    async fn delete_review(&self, id: &ReviewId) -> Result<(), StoreError>;

    async fn reviews_for_book(&self, book_id: &str) -> Result<Vec<Review>, StoreError>;

    /// Writes the denormalized rating into the user's library entry.
    async fn update_library_rating(
        &self,
        user_id: &str,
        book_id: &str,
        update: RatingUpdate,
    ) -> Result<(), StoreError>;
}
