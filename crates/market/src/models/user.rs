//! User domain types.

use serde::{Deserialize, Serialize};

use craftify_core::{Email, Role, UserId};

/// A marketplace account.
///
/// Passwords are kept and compared in plain text; this is a single-user demo
/// store, not an authentication system. `Debug` still redacts the password so
/// it never reaches the logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Email address, unique ignoring case.
    pub email: Email,
    /// Plain-text password.
    pub password: String,
    /// Buyer or artist.
    pub role: Role,
    /// Public profile.
    #[serde(default)]
    pub profile: Profile,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .field("profile", &self.profile)
            .finish()
    }
}

impl User {
    /// Name shown in the header: profile name, falling back to the email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.profile.name.trim().is_empty() {
            self.email.as_str()
        } else {
            &self.profile.name
        }
    }

    /// Whether this account sells art.
    #[must_use]
    pub fn is_artist(&self) -> bool {
        self.role == Role::Artist
    }
}

/// Public profile details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Short biography.
    #[serde(default)]
    pub bio: String,
    /// Avatar image as an embeddable URL (usually a `data:` URL); empty when unset.
    #[serde(default)]
    pub avatar: String,
}
