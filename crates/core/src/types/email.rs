//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// The input has leading or trailing whitespace.
    #[error("email cannot contain surrounding whitespace")]
    Whitespace,
}

/// An email address.
///
/// Emails are the uniqueness key of the user directory and the lookup key of
/// the credential vault. Comparison is exact: `Ayse@email.com` and
/// `ayse@email.com` are different addresses, matching how the directory has
/// always matched them.
///
/// Deserialization does not validate, so snapshots written by older versions
/// always load. Validation happens at the registration boundary via
/// [`Email::parse`].
///
/// ## Examples
///
/// ```
/// use nazsu_core::Email;
///
/// assert!(Email::parse("ahmet@email.com").is_ok());
/// assert!(Email::parse("no-at-symbol").is_err());
/// assert!(Email::parse(" ahmet@email.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 254 characters,
    /// padded with whitespace, missing an @ symbol, or has an empty local part
    /// or domain.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.trim() != s {
            return Err(EmailError::Whitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }

        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Email {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("ahmet@email.com").is_ok());
        assert!(Email::parse("siparis+kadikoy@nazsu.com").is_ok());
        assert!(Email::parse("a@b.c").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert_eq!(Email::parse("nazsu.com"), Err(EmailError::MissingAtSymbol));
        assert_eq!(Email::parse("@nazsu.com"), Err(EmailError::EmptyLocalPart));
        assert_eq!(Email::parse("ayse@"), Err(EmailError::EmptyDomain));
        assert_eq!(Email::parse("ayse@email.com "), Err(EmailError::Whitespace));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@email.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { max: 254 })
        ));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let lower = Email::parse("ayse@email.com").unwrap();
        let upper = Email::parse("Ayse@email.com").unwrap();
        assert_ne!(lower, upper);
        assert!(lower == *"ayse@email.com");
    }

    #[test]
    fn test_domain() {
        let email = Email::parse("test@email.com").unwrap();
        assert_eq!(email.domain(), "email.com");
    }

    #[test]
    fn test_deserialize_skips_validation() {
        let email: Email = serde_json::from_str("\"legacy\"").unwrap();
        assert_eq!(email.as_str(), "legacy");
    }
}
