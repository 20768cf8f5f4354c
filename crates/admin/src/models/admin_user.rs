//! Admin user domain types.

use serde::{Deserialize, Serialize};

/// The admin signed in to the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
}
