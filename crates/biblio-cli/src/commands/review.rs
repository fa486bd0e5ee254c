use biblio_dal::SqliteStore;
use biblio_dal::review::ReviewRepository;
use biblio_review::{BookInfo, ReviewDraft, ReviewService, SubmitError, SubmitOutcome};
use biblio_types::clock::SystemClock;
use biblio_types::config::BackendConfig;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::commands::{Executor, UserArgs, connect};

/// Creates the user's review of a book in their library, or edits it
/// when one already exists.
#[derive(Parser, Debug)]
pub struct ReviewCmd {
    #[command(flatten)]
    backend: BackendConfig,
    #[command(flatten)]
    user: UserArgs,
    #[arg(long, help = "Book id")]
    book_id: String,
    #[arg(short, long, help = "Rating, 1 to 5 stars")]
    rating: u8,
    #[arg(short, long, help = "Review text, 10 to 1000 characters")]
    text: String,
    #[arg(long, help = "Keep the review hidden from other users")]
    private: bool,
}

impl Executor for ReviewCmd {
    async fn run(self) -> anyhow::Result<()> {
        let pool = connect(&self.backend).await?;
        let user_id = self.user.user_id.clone();

        // book snapshot comes from the user's library entry
        let entry = biblio_dal::library::LibraryRepository::new(pool.clone())
            .get(&user_id, &self.book_id)
            .await?;
        let book = BookInfo {
            id: entry.book_id.clone(),
            title: entry.title.clone(),
            author: entry.author.clone(),
            cover: entry.cover.clone(),
        };

        let existing = ReviewRepository::new(pool.clone())
            .find_for_user(&self.book_id, &user_id)
            .await?;

        let draft = ReviewDraft {
            rating: Some(self.rating),
            text: self.text,
            is_private: Some(self.private),
        };
        let valid = draft.validate()?;

        let service = ReviewService::new(
            SqliteStore::new(pool),
            self.user.identity(),
            SystemClock,
        );
        let record = service.build_record(valid, &book, existing.as_ref())?;

        match service.submit(record, &CancellationToken::new()).await {
            Ok(SubmitOutcome::Created { id }) => println!("Review {id} published"),
            Ok(SubmitOutcome::Updated) => println!("Review updated"),
            Err(SubmitError::DenormalizationFailed { id, source }) => {
                // review persisted; surface the stale rating as a warning
                warn!("Library rating was not updated: {source}");
                println!("Review {id} published");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }
}
