use futures::TryStreamExt as _;
use serde::{Deserialize, Serialize};
use sqlx::Pool;
use time::OffsetDateTime;
use tracing::debug;

use crate::{Error, error::Result};

/// A book in a user's personal library, with the denormalized rating
/// kept in sync by review submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LibraryEntry {
    pub user_id: String,
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub cover: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub added: OffsetDateTime,
    pub user_rating: Option<u8>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub rated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLibraryEntry {
    pub user_id: String,
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub cover: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub added: OffsetDateTime,
}

pub type LibraryRepository = LibraryRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct LibraryRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> LibraryRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn add(&self, payload: CreateLibraryEntry) -> Result<LibraryEntry> {
        sqlx::query(
            "INSERT INTO library_entry (user_id, book_id, title, author, cover, added) \
            VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&payload.user_id)
        .bind(&payload.book_id)
        .bind(&payload.title)
        .bind(&payload.author)
        .bind(&payload.cover)
        .bind(payload.added)
        .execute(&self.executor)
        .await?;

        self.get(&payload.user_id, &payload.book_id).await
    }

    pub async fn get(&self, user_id: &str, book_id: &str) -> Result<LibraryEntry> {
        let entry = sqlx::query_as::<_, LibraryEntry>(
            "SELECT user_id, book_id, title, author, cover, added, user_rating, rated_at \
            FROM library_entry WHERE user_id = ? AND book_id = ?",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.executor)
        .await?;
        Ok(entry)
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<LibraryEntry>> {
        let entries = sqlx::query_as::<_, LibraryEntry>(
            "SELECT user_id, book_id, title, author, cover, added, user_rating, rated_at \
            FROM library_entry WHERE user_id = ? ORDER BY added DESC",
        )
        .bind(user_id)
        .fetch(&self.executor)
        .try_collect::<Vec<_>>()
        .await?;
        Ok(entries)
    }

    /// Writes only the denormalized rating fields; the entry itself
    /// must already exist.
    pub async fn update_rating(
        &self,
        user_id: &str,
        book_id: &str,
        user_rating: u8,
        rated_at: OffsetDateTime,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE library_entry SET user_rating = ?, rated_at = ? \
            WHERE user_id = ? AND book_id = ?",
        )
        .bind(user_rating)
        .bind(rated_at)
        .bind(user_id)
        .bind(book_id)
        .execute(&self.executor)
        .await?;

        if result.rows_affected() == 0 {
            debug!("No library entry for user {user_id}, book {book_id}");
            return Err(Error::RecordNotFound(format!(
                "LibraryEntry {user_id}/{book_id}"
            )));
        }
        Ok(())
    }

    pub async fn remove(&self, user_id: &str, book_id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM library_entry WHERE user_id = ? AND book_id = ?")
            .bind(user_id)
            .bind(book_id)
            .execute(&self.executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RecordNotFound(format!(
                "LibraryEntry {user_id}/{book_id}"
            )));
        }
        Ok(())
    }
}
