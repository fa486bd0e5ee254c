use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ValidationError;
use crate::{MAX_RATING, MAX_TEXT_LEN, MIN_TEXT_LEN};

/// Opaque review identifier, assigned by the store on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(String);

impl ReviewId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ReviewId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ReviewId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One user's opinion of one book, as persisted.
///
/// Book and author snapshot fields are copied at write time and
/// re-stamped on every save; they are not kept in sync with later
/// book or profile edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// `None` until the store assigns an id on creation.
    pub id: Option<ReviewId>,
    pub book_id: String,
    pub user_id: String,

    pub rating: u8,
    pub text: String,
    pub is_private: bool,

    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub modified: OffsetDateTime,

    pub book_title: String,
    pub book_author: String,
    pub book_cover: Option<String>,

    pub user_name: String,
    pub user_email: String,
}

/// Book data used to stamp the denormalized snapshot into a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInfo {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover: Option<String>,
}

/// Denormalized rating payload written to the user's library entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingUpdate {
    pub user_rating: u8,
    pub rated_at: OffsetDateTime,
}

/// Raw review form input, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewDraft {
    pub rating: Option<u8>,
    pub text: String,
    pub is_private: Option<bool>,
}

impl ReviewDraft {
    /// Checks rating and text bounds. Pure, no defaults applied to
    /// rating; a missing privacy flag becomes public.
    pub fn validate(&self) -> Result<ValidReview, ValidationError> {
        let rating = match self.rating {
            None | Some(0) => return Err(ValidationError::MissingRating),
            Some(r) if r > MAX_RATING => return Err(ValidationError::RatingOutOfRange(r)),
            Some(r) => r,
        };

        let text = self.text.trim();
        let len = text.chars().count();
        if len < MIN_TEXT_LEN {
            return Err(ValidationError::TextTooShort(len));
        }
        if len > MAX_TEXT_LEN {
            return Err(ValidationError::TextTooLong(len));
        }

        Ok(ValidReview {
            rating,
            text: text.to_string(),
            is_private: self.is_private.unwrap_or(false),
        })
    }
}

/// Review input that passed validation; text is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReview {
    pub rating: u8,
    pub text: String,
    pub is_private: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(rating: Option<u8>, text: &str) -> ReviewDraft {
        ReviewDraft {
            rating,
            text: text.to_string(),
            is_private: None,
        }
    }

    #[test]
    fn test_valid_draft() {
        let valid = draft(Some(5), "Loved the pacing and characters.")
            .validate()
            .unwrap();
        assert_eq!(valid.rating, 5);
        assert_eq!(valid.text, "Loved the pacing and characters.");
        assert!(!valid.is_private);
    }

    #[test]
    fn test_missing_rating() {
        assert_eq!(
            draft(Some(0), "Great book indeed").validate(),
            Err(ValidationError::MissingRating)
        );
        assert_eq!(
            draft(None, "Great book indeed").validate(),
            Err(ValidationError::MissingRating)
        );
    }

    #[test]
    fn test_rating_range() {
        assert_eq!(
            draft(Some(6), "Great book indeed").validate(),
            Err(ValidationError::RatingOutOfRange(6))
        );
        for rating in 1..=5u8 {
            assert!(draft(Some(rating), "Great book indeed").validate().is_ok());
        }
    }

    #[test]
    fn test_text_too_short() {
        assert_eq!(
            draft(Some(4), "short").validate(),
            Err(ValidationError::TextTooShort(5))
        );
        // whitespace does not count towards the minimum
        assert_eq!(
            draft(Some(4), "   d e f    ").validate(),
            Err(ValidationError::TextTooShort(5))
        );
    }

    #[test]
    fn test_text_bounds() {
        let ten = "abcdefghij";
        assert!(draft(Some(3), ten).validate().is_ok());
        assert_eq!(
            draft(Some(3), &ten[..9]).validate(),
            Err(ValidationError::TextTooShort(9))
        );

        let max = "x".repeat(1000);
        assert!(draft(Some(3), &max).validate().is_ok());
        let over = "x".repeat(1001);
        assert_eq!(
            draft(Some(3), &over).validate(),
            Err(ValidationError::TextTooLong(1001))
        );
    }

    #[test]
    fn test_text_trimmed() {
        let valid = draft(Some(2), "  plenty of text here  ").validate().unwrap();
        assert_eq!(valid.text, "plenty of text here");
    }

    #[test]
    fn test_privacy_default() {
        let mut d = draft(Some(1), "did not like it at all");
        d.is_private = Some(true);
        assert!(d.validate().unwrap().is_private);
        d.is_private = None;
        assert!(!d.validate().unwrap().is_private);
    }
}
