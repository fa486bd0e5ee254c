use biblio_types::{clock::Clock, identity::Identity};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::SubmitError;
use crate::model::{BookInfo, RatingUpdate, Review, ReviewId, ValidReview};
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created { id: ReviewId },
    Updated,
}

/// Coordinates review persistence and the dependent library-rating
/// write. Stateless; holds only the injected capabilities, so one
/// instance may serve independent sessions concurrently. Re-entrant
/// submits for the same review are the caller's problem.
pub struct ReviewService<S, I, C> {
    store: S,
    identity: I,
    clock: C,
}

impl<S, I, C> ReviewService<S, I, C>
where
    S: Store,
    I: Identity,
    C: Clock,
{
    pub fn new(store: S, identity: I, clock: C) -> Self {
        Self {
            store,
            identity,
            clock,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Builds the record to persist. With `existing` (edit path) the
    /// id, book id, user id and creation time are preserved; both
    /// snapshots are re-stamped from the current book and identity on
    /// every save.
    pub fn build_record(
        &self,
        valid: ValidReview,
        book: &BookInfo,
        existing: Option<&Review>,
    ) -> Result<Review, SubmitError> {
        let user = self
            .identity
            .current_user()
            .ok_or(SubmitError::NotAuthenticated)?;
        let now = self.clock.now();

        let (id, book_id, user_id, created) = match existing {
            Some(prev) => (
                prev.id.clone(),
                prev.book_id.clone(),
                prev.user_id.clone(),
                prev.created,
            ),
            None => (None, book.id.clone(), user.id.clone(), now),
        };

        Ok(Review {
            id,
            book_id,
            user_id,
            rating: valid.rating,
            text: valid.text,
            is_private: valid.is_private,
            created,
            modified: now,
            book_title: book.title.clone(),
            book_author: book.author.clone(),
            book_cover: book.cover.clone(),
            user_name: user.display_name,
            user_email: user.email.to_string(),
        })
    }

    /// Persists the review, then propagates the rating to the user's
    /// library entry. The two writes are sequenced, not transactional:
    /// a failed review write leaves no state behind, a failed rating
    /// write after a persisted review surfaces as
    /// [`SubmitError::DenormalizationFailed`] and is not rolled back.
    ///
    /// Cancellation observed before the review write starts performs
    /// no writes; observed later, the persisted review stays and the
    /// rating write is skipped.
    pub async fn submit(
        &self,
        record: Review,
        cancel: &CancellationToken,
    ) -> Result<SubmitOutcome, SubmitError> {
        if self.identity.current_user().is_none() {
            return Err(SubmitError::NotAuthenticated);
        }
        if cancel.is_cancelled() {
            return Err(SubmitError::Cancelled { persisted: None });
        }

        let (outcome, id) = match &record.id {
            None => {
                let id = self
                    .store
                    .create_review(&record)
                    .await
                    .map_err(SubmitError::PersistenceFailed)?;
                (SubmitOutcome::Created { id: id.clone() }, id)
            }
            Some(id) => {
                self.store
                    .update_review(id, &record)
                    .await
                    .map_err(SubmitError::PersistenceFailed)?;
                (SubmitOutcome::Updated, id.clone())
            }
        };

        if cancel.is_cancelled() {
            debug!("Submit cancelled after review {id} was persisted");
            return Err(SubmitError::Cancelled {
                persisted: Some(id),
            });
        }

        let update = RatingUpdate {
            user_rating: record.rating,
            rated_at: record.modified,
        };
        if let Err(e) = self
            .store
            .update_library_rating(&record.user_id, &record.book_id, update)
            .await
        {
            debug!("Library rating update failed for review {id}: {e}");
            return Err(SubmitError::DenormalizationFailed { id, source: e });
        }

        Ok(outcome)
    }

    /// Deletes the review record only. The library entry's rating is
    /// intentionally left as is.
    pub async fn delete(
        &self,
        id: &ReviewId,
        cancel: &CancellationToken,
    ) -> Result<(), SubmitError> {
        if self.identity.current_user().is_none() {
            return Err(SubmitError::NotAuthenticated);
        }
        if cancel.is_cancelled() {
            return Err(SubmitError::Cancelled { persisted: None });
        }
        self.store
            .delete_review(id)
            .await
            .map_err(SubmitError::PersistenceFailed)
    }

    /// Other users' public reviews of a book, newest ordering as
    /// returned by the store.
    pub async fn visible_reviews(&self, book_id: &str) -> Result<Vec<Review>, SubmitError> {
        let user = self
            .identity
            .current_user()
            .ok_or(SubmitError::NotAuthenticated)?;
        let all = self
            .store
            .reviews_for_book(book_id)
            .await
            .map_err(SubmitError::PersistenceFailed)?;
        Ok(filter_visible_reviews(&all, &user.id).cloned().collect())
    }
}

/// Reviews visible to `exclude_user_id`: not their own and not
/// private. Lazy and restartable, input order preserved.
pub fn filter_visible_reviews<'a>(
    reviews: &'a [Review],
    exclude_user_id: &'a str,
) -> impl Iterator<Item = &'a Review> + 'a {
    reviews
        .iter()
        .filter(move |r| r.user_id != exclude_user_id && !r.is_private)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn review(user_id: &str, is_private: bool) -> Review {
        Review {
            id: Some(ReviewId::from(format!("r-{user_id}"))),
            book_id: "b1".to_string(),
            user_id: user_id.to_string(),
            rating: 4,
            text: "A very solid read".to_string(),
            is_private,
            created: datetime!(2026-08-01 12:00 UTC),
            modified: datetime!(2026-08-01 12:00 UTC),
            book_title: "Dune".to_string(),
            book_author: "Frank Herbert".to_string(),
            book_cover: None,
            user_name: user_id.to_uppercase(),
            user_email: format!("{user_id}@example.com"),
        }
    }

    #[test]
    fn test_filter_visible() {
        let reviews = vec![review("a", false), review("b", true), review("c", false)];
        let visible: Vec<_> = filter_visible_reviews(&reviews, "a").collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].user_id, "c");

        // restartable over the same input
        assert_eq!(filter_visible_reviews(&reviews, "a").count(), 1);
        assert_eq!(filter_visible_reviews(&reviews, "x").count(), 2);
    }
}
