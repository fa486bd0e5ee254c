pub mod add_book;
pub mod delete_review;
pub mod list_reviews;
pub mod review;

use biblio_types::config::BackendConfig;
use biblio_types::general::Email;
use biblio_types::identity::{StaticIdentity, UserIdentity};
use clap::Args;

#[allow(async_fn_in_trait)]
pub trait Executor {
    async fn run(self) -> anyhow::Result<()>;
}

/// User acting on the library; stands in for the auth provider.
#[derive(Args, Debug)]
pub struct UserArgs {
    #[arg(long, env = "BIBLIO_USER_ID", help = "Id of the acting user")]
    pub user_id: String,
    #[arg(
        long,
        env = "BIBLIO_USER_NAME",
        help = "Display name stamped into review snapshots"
    )]
    pub user_name: String,
    #[arg(
        long,
        env = "BIBLIO_USER_EMAIL",
        help = "Contact email stamped into review snapshots"
    )]
    pub user_email: Email,
}

impl UserArgs {
    pub fn identity(self) -> StaticIdentity {
        StaticIdentity::new(UserIdentity {
            id: self.user_id,
            display_name: self.user_name,
            email: self.user_email,
        })
    }
}

pub(crate) async fn connect(backend: &BackendConfig) -> anyhow::Result<biblio_dal::Pool> {
    let pool = biblio_dal::new_pool(&backend.database_url()).await?;
    biblio_dal::migrate(&pool).await?;
    Ok(pool)
}
