use biblio_dal::SqliteStore;
use biblio_review::{ReviewId, ReviewService};
use biblio_types::clock::SystemClock;
use biblio_types::config::BackendConfig;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use crate::commands::{Executor, UserArgs, connect};

/// Deletes a review. The library entry's rating is left untouched.
#[derive(Parser, Debug)]
pub struct DeleteReviewCmd {
    #[command(flatten)]
    backend: BackendConfig,
    #[command(flatten)]
    user: UserArgs,
    #[arg(long, help = "Id of the review to delete")]
    review_id: String,
}

impl Executor for DeleteReviewCmd {
    async fn run(self) -> anyhow::Result<()> {
        let pool = connect(&self.backend).await?;
        let service = ReviewService::new(
            SqliteStore::new(pool),
            self.user.identity(),
            SystemClock,
        );

        let id = ReviewId::from(self.review_id);
        service.delete(&id, &CancellationToken::new()).await?;
        println!("Review {id} deleted");

        Ok(())
    }
}
