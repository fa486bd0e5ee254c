use biblio_review::StoreError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Record not found: {0}")]
    RecordNotFound(String),
}

impl From<Error> for StoreError {
    fn from(value: Error) -> Self {
        match value {
            Error::RecordNotFound(what) => StoreError::NotFound(what),
            Error::DatabaseError(sqlx::Error::RowNotFound) => {
                StoreError::NotFound("record".to_string())
            }
            other => StoreError::backend(other),
        }
    }
}
