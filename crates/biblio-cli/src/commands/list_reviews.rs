use biblio_dal::SqliteStore;
use biblio_review::{ReviewService, SubmitError};
use biblio_types::clock::SystemClock;
use biblio_types::config::BackendConfig;
use clap::Parser;

use crate::commands::{Executor, UserArgs, connect};

/// Lists other users' public reviews of a book.
#[derive(Parser, Debug)]
pub struct ListReviewsCmd {
    #[command(flatten)]
    backend: BackendConfig,
    #[command(flatten)]
    user: UserArgs,
    #[arg(long, help = "Book id")]
    book_id: String,
    #[arg(long, help = "Print reviews as JSON")]
    json: bool,
}

impl Executor for ListReviewsCmd {
    async fn run(self) -> anyhow::Result<()> {
        let pool = connect(&self.backend).await?;
        let book_id = self.book_id;
        let service = ReviewService::new(
            SqliteStore::new(pool),
            self.user.identity(),
            SystemClock,
        );

        let reviews = match service.visible_reviews(&book_id).await {
            Ok(reviews) => reviews,
            Err(SubmitError::NotAuthenticated) => anyhow::bail!("no user given"),
            Err(e) => return Err(e.into()),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&reviews)?);
            return Ok(());
        }

        if reviews.is_empty() {
            println!("No public reviews for {book_id} yet");
            return Ok(());
        }
        for review in reviews {
            let stars = "*".repeat(review.rating as usize);
            println!(
                "[{stars}] {} on {}: {}",
                review.user_name,
                review.created.date(),
                review.text
            );
        }

        Ok(())
    }
}
