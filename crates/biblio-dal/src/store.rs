use biblio_review::{RatingUpdate, Review, ReviewId, Store, StoreError};

use crate::{Pool, library::LibraryRepository, review::ReviewRepository};

/// [`Store`] implementation backed by the SQLite database.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Pool,
}

impl SqliteStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    fn reviews(&self) -> ReviewRepository {
        ReviewRepository::new(self.pool.clone())
    }

    fn library(&self) -> LibraryRepository {
        LibraryRepository::new(self.pool.clone())
    }
}

impl Store for SqliteStore {
    async fn create_review(&self, record: &Review) -> Result<ReviewId, StoreError> {
        Ok(self.reviews().create(record).await?)
    }

    async fn update_review(&self, id: &ReviewId, record: &Review) -> Result<(), StoreError> {
        Ok(self.reviews().update(id, record).await?)
    }

    async fn delete_review(&self, id: &ReviewId) -> Result<(), StoreError> {
        Ok(self.reviews().delete(id).await?)
    }

    async fn reviews_for_book(&self, book_id: &str) -> Result<Vec<Review>, StoreError> {
        Ok(self.reviews().list_for_book(book_id).await?)
    }

    async fn update_library_rating(
        &self,
        user_id: &str,
        book_id: &str,
        update: RatingUpdate,
    ) -> Result<(), StoreError> {
        Ok(self
            .library()
            .update_rating(user_id, book_id, update.user_rating, update.rated_at)
            .await?)
    }
}
