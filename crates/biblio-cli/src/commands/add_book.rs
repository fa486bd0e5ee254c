use biblio_dal::library::{CreateLibraryEntry, LibraryRepository};
use biblio_types::config::BackendConfig;
use clap::Parser;
use time::OffsetDateTime;

use crate::commands::{Executor, connect};

#[derive(Parser, Debug)]
pub struct AddBookCmd {
    #[command(flatten)]
    backend: BackendConfig,
    #[arg(long, env = "BIBLIO_USER_ID", help = "Id of the acting user")]
    user_id: String,
    #[arg(long, help = "Book id (catalog identifier)")]
    book_id: String,
    #[arg(long, help = "Book title")]
    title: String,
    #[arg(long, help = "Book author")]
    author: String,
    #[arg(long, help = "Cover image reference")]
    cover: Option<String>,
}

impl Executor for AddBookCmd {
    async fn run(self) -> anyhow::Result<()> {
        let pool = connect(&self.backend).await?;
        let repository = LibraryRepository::new(pool);
        let entry = repository
            .add(CreateLibraryEntry {
                user_id: self.user_id,
                book_id: self.book_id,
                title: self.title,
                author: self.author,
                cover: self.cover,
                added: OffsetDateTime::now_utc(),
            })
            .await?;
        println!("Added '{}' to library of {}", entry.title, entry.user_id);

        Ok(())
    }
}
