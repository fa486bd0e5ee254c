use biblio_review::{Review, ReviewId};
use futures::TryStreamExt as _;
use sqlx::Pool;
use tracing::debug;

use crate::{Error, error::Result};

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ReviewRow {
    id: String,
    book_id: String,
    user_id: String,
    rating: u8,
    text: String,
    is_private: bool,
    created: time::OffsetDateTime,
    modified: time::OffsetDateTime,
    book_title: String,
    book_author: String,
    book_cover: Option<String>,
    user_name: String,
    user_email: String,
}

impl From<ReviewRow> for Review {
    fn from(value: ReviewRow) -> Self {
        Review {
            id: Some(ReviewId::from(value.id)),
            book_id: value.book_id,
            user_id: value.user_id,
            rating: value.rating,
            text: value.text,
            is_private: value.is_private,
            created: value.created,
            modified: value.modified,
            book_title: value.book_title,
            book_author: value.book_author,
            book_cover: value.book_cover,
            user_name: value.user_name,
            user_email: value.user_email,
        }
    }
}

const COLUMNS: &str = "id, book_id, user_id, rating, text, is_private, created, modified, \
    book_title, book_author, book_cover, user_name, user_email";

pub type ReviewRepository = ReviewRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct ReviewRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> ReviewRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Inserts a new review under a freshly assigned id.
    pub async fn create(&self, record: &Review) -> Result<ReviewId> {
        let id = uuid::Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO review (id, book_id, user_id, rating, text, is_private, created, modified, \
            book_title, book_author, book_cover, user_name, user_email) \
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&record.book_id)
        .bind(&record.user_id)
        .bind(record.rating)
        .bind(&record.text)
        .bind(record.is_private)
        .bind(record.created)
        .bind(record.modified)
        .bind(&record.book_title)
        .bind(&record.book_author)
        .bind(&record.book_cover)
        .bind(&record.user_name)
        .bind(&record.user_email)
        .execute(&self.executor)
        .await?;

        Ok(ReviewId::from(id))
    }

    /// Updates mutable fields only; book_id, user_id and created are
    /// immutable after the first insert.
    pub async fn update(&self, id: &ReviewId, record: &Review) -> Result<()> {
        let result = sqlx::query(
            "UPDATE review SET rating = ?, text = ?, is_private = ?, modified = ?, \
            book_title = ?, book_author = ?, book_cover = ?, user_name = ?, user_email = ? \
            WHERE id = ?",
        )
        .bind(record.rating)
        .bind(&record.text)
        .bind(record.is_private)
        .bind(record.modified)
        .bind(&record.book_title)
        .bind(&record.book_author)
        .bind(&record.book_cover)
        .bind(&record.user_name)
        .bind(&record.user_email)
        .bind(id.as_str())
        .execute(&self.executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RecordNotFound(format!("Review {id}")));
        }
        Ok(())
    }

    pub async fn delete(&self, id: &ReviewId) -> Result<()> {
        let result = sqlx::query("DELETE FROM review WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.executor)
            .await?;

        if result.rows_affected() == 0 {
            debug!("Attempt to delete missing review {id}");
            return Err(Error::RecordNotFound(format!("Review {id}")));
        }
        Ok(())
    }

    pub async fn get(&self, id: &ReviewId) -> Result<Review> {
        let sql = format!("SELECT {COLUMNS} FROM review WHERE id = ?");
        let record = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(id.as_str())
            .fetch_one(&self.executor)
            .await?;
        Ok(record.into())
    }

    /// The user's review of a book, if any. Application rule keeps at
    /// most one per (book, user) pair; newest wins if history left more.
    pub async fn find_for_user(&self, book_id: &str, user_id: &str) -> Result<Option<Review>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM review WHERE book_id = ? AND user_id = ? \
            ORDER BY modified DESC LIMIT 1"
        );
        let record = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(book_id)
            .bind(user_id)
            .fetch_optional(&self.executor)
            .await?;
        Ok(record.map(Review::from))
    }

    pub async fn list_for_book(&self, book_id: &str) -> Result<Vec<Review>> {
        let sql = format!("SELECT {COLUMNS} FROM review WHERE book_id = ? ORDER BY created DESC");
        let reviews = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(book_id)
            .fetch(&self.executor)
            .map_ok(Review::from)
            .try_collect::<Vec<_>>()
            .await?;
        Ok(reviews)
    }
}
