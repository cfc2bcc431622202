//! Account email addresses.
//!
//! Accounts are looked up by email ignoring letter case, so addresses are
//! stored trimmed and lower-cased. Validation is structural only: something
//! before the `@`, something after it.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why an address was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// Nothing was entered.
    #[error("email cannot be empty")]
    Empty,
    /// Longer than [`Email::MAX_LENGTH`].
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    /// Not of the form `name@host`.
    #[error("email must look like name@host")]
    Malformed,
}

/// A normalized account email.
///
/// ```
/// use craftify_core::Email;
///
/// let email = Email::parse(" Maker@Craftify.Demo ").unwrap();
/// assert_eq!(email.as_str(), "maker@craftify.demo");
/// assert!(email.matches("MAKER@craftify.demo"));
///
/// assert!(Email::parse("maker").is_err());
/// assert!(Email::parse("@craftify.demo").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Longest accepted address.
    pub const MAX_LENGTH: usize = 254;

    /// Trim, validate and lower-case an address typed into a form.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] if the input is blank, too long, or lacks a
    /// name or host around the `@`.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        match s.split_once('@') {
            Some((name, host)) if !name.is_empty() && !host.is_empty() => {
                Ok(Self(s.to_lowercase()))
            }
            _ => Err(EmailError::Malformed),
        }
    }

    /// Whether a raw address refers to this account, ignoring case.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
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
