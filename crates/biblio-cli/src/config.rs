use clap::{Parser, Subcommand};

use crate::commands::{
    add_book::AddBookCmd, delete_review::DeleteReviewCmd, list_reviews::ListReviewsCmd,
    review::ReviewCmd,
};

#[derive(Parser)]
#[command(
    version,
    about,
    long_about = "CLI for biblio - manage a personal book library and its reviews from the command line."
)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    AddBook(AddBookCmd),
    Review(ReviewCmd),
    Reviews(ListReviewsCmd),
    DeleteReview(DeleteReviewCmd),
}

impl crate::commands::Executor for Command {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            Command::AddBook(cmd) => cmd.run().await,
            Command::Review(cmd) => cmd.run().await,
            Command::Reviews(cmd) => cmd.run().await,
            Command::DeleteReview(cmd) => cmd.run().await,
        }
    }
}
