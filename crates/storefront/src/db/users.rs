//! User directory repository.
//!
//! Persists the session state together with every directory record. Modal
//! visibility and other UI flags are never stored.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use nazsu_core::SnapshotStore;
use nazsu_core::snapshot::{load_state, save_state};

use super::RepositoryError;
use crate::models::session::SessionState;
use crate::models::user::{User, UserRecord};

/// Snapshot key of the user directory.
pub const USER_STORAGE_KEY: &str = "nazsu-user-storage";

const SEED_USERS: &str = include_str!("../../data/users.json");

/// Decoded directory snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DirectorySnapshot {
    pub session: SessionState,
    pub users: Vec<UserRecord>,
}

#[derive(Serialize)]
struct DirectorySnapshotRef<'a> {
    session: &'a SessionState,
    users: &'a [UserRecord],
}

/// Repository for the persisted user directory.
pub struct UserRepository<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: SnapshotStore + ?Sized> UserRepository<'a, S> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Load the directory, or `None` if nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Snapshot` if the snapshot cannot be read.
    /// Returns `RepositoryError::DataCorruption` if two records share an ID
    /// or an email.
    pub fn load(&self) -> Result<Option<DirectorySnapshot>, RepositoryError> {
        let Some(snapshot) = load_state::<DirectorySnapshot, _>(self.store, USER_STORAGE_KEY)?
        else {
            return Ok(None);
        };
        check_unique(&snapshot.users)?;
        Ok(Some(snapshot))
    }

    /// Replace the persisted directory.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Snapshot` if the snapshot cannot be written.
    pub fn save(
        &self,
        session: &SessionState,
        users: &[UserRecord],
    ) -> Result<(), RepositoryError> {
        save_state(
            self.store,
            USER_STORAGE_KEY,
            &DirectorySnapshotRef { session, users },
        )?;
        Ok(())
    }
}

/// Built-in customer accounts used when no directory has been persisted.
///
/// # Errors
///
/// Returns `RepositoryError::DataCorruption` if the bundled fixture does not
/// decode.
pub fn seed_users() -> Result<Vec<User>, RepositoryError> {
    serde_json::from_str(SEED_USERS)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid user fixture: {e}")))
}

fn check_unique(users: &[UserRecord]) -> Result<(), RepositoryError> {
    let mut ids = HashSet::new();
    let mut emails = HashSet::new();
    for record in users {
        if !ids.insert(record.id()) {
            return Err(RepositoryError::DataCorruption(format!(
                "duplicate user id {}",
                record.id()
            )));
        }
        if !emails.insert(record.email()) {
            return Err(RepositoryError::DataCorruption(format!(
                "duplicate user email {}",
                record.email()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nazsu_core::{MemoryStore, UserId};

    use super::*;

    #[test]
    fn test_seed_users_decode() {
        let users = seed_users().unwrap();
        let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(
            emails,
            ["ahmet@email.com", "ayse@email.com", "test@email.com"]
        );
        assert!(users.iter().all(|u| u.is_active));
    }

    #[test]
    fn test_round_trip_keeps_session() {
        let store = MemoryStore::new();
        let users: Vec<UserRecord> = seed_users().unwrap().into_iter().map(Into::into).collect();
        let session = SessionState::Authenticated {
            user_id: UserId::new("CUST-002"),
        };

        let repo = UserRepository::new(&store);
        repo.save(&session, &users).unwrap();
        let loaded = repo.load().unwrap().unwrap();

        assert_eq!(loaded.session, session);
        assert_eq!(loaded.users, users);
    }

    #[test]
    fn test_duplicate_email_is_corruption() {
        let store = MemoryStore::new();
        let mut users: Vec<UserRecord> =
            seed_users().unwrap().into_iter().map(Into::into).collect();
        let mut copy = users[0].clone();
        if let UserRecord::Complete(user) = &mut copy {
            user.id = UserId::new("CUST-999");
        }
        users.push(copy);

        let repo = UserRepository::new(&store);
        repo.save(&SessionState::Anonymous, &users).unwrap();
        assert!(matches!(repo.load(), Err(RepositoryError::DataCorruption(_))));
    }
}
