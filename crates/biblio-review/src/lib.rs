pub mod error;
pub mod model;
pub mod service;
pub mod store;

pub use error::{StoreError, SubmitError, ValidationError};
pub use model::{BookInfo, RatingUpdate, Review, ReviewDraft, ReviewId, ValidReview};
pub use service::{ReviewService, SubmitOutcome, filter_visible_reviews};
pub use store::Store;

pub const MIN_TEXT_LEN: usize = 10;
pub const MAX_TEXT_LEN: usize = 1000;
pub const MAX_RATING: u8 = 5;
