//! Session-related types.

use serde::{Deserialize, Serialize};

use craftify_core::{Role, UserId};

/// The identity of the currently acting user.
///
/// At most one session exists per store instance; it is replaced on login or
/// signup and cleared on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Logged-in user's ID.
    pub user_id: UserId,
    /// Role captured at login time.
    pub role: Role,
}

impl Session {
    /// Whether this session belongs to an artist.
    #[must_use]
    pub fn is_artist(&self) -> bool {
        self.role == Role::Artist
    }
}
