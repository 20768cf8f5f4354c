//! Session state of the user directory.

use serde::{Deserialize, Serialize};

use nazsu_core::UserId;

/// Who is signed in.
///
/// The current user is looked up in the directory by ID rather than copied,
/// so admin edits to that account are visible immediately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Anonymous,
    /// A provisional account must supply an address before it can sign in.
    AwaitingAddress {
        #[serde(rename = "userId")]
        user_id: UserId,
    },
    Authenticated {
        #[serde(rename = "userId")]
        user_id: UserId,
    },
}

impl SessionState {
    /// The user this session refers to, in either state.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Anonymous => None,
            Self::AwaitingAddress { user_id } | Self::Authenticated { user_id } => Some(user_id),
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}
