use std::{fmt::Display, str::FromStr};

use garde::Validate;
use serde::{Deserialize, Serialize};

/// Contact email, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq, Validate, Hash, Serialize, Deserialize)]
#[garde(transparent)]
pub struct Email(#[garde(email)] String);

impl FromStr for Email {
    type Err = garde::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let email = Email(s.trim().to_string());
        email.validate()?;
        Ok(email)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_parse() {
        let email = Email::from_str(" reader@example.com ").unwrap();
        assert_eq!(email.as_ref(), "reader@example.com");
    }

    #[test]
    fn test_invalid_email() {
        assert!(Email::from_str("reader").is_err());

        // constructed directly, still detectable by validate
        let email = Email("reader".to_string());
        assert!(email.validate().is_err());
    }
}
