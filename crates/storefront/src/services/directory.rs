//! User directory.
//!
//! Owns every customer account and the session of the signed-in customer.
//! Accounts are created by registration or by a two-step federated sign-up:
//! [`UserDirectory::register_with_google`] leaves a provisional record and a
//! session waiting for an address, which
//! [`UserDirectory::complete_google_registration`] promotes to a complete
//! account under a derived customer ID.
//!
//! Public operations report success as `bool`. The reason for a rejection is
//! logged.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use nazsu_core::{Clock, Email, IdSequence, SnapshotStore, SystemClock, UserId};

use crate::config::{LatencyConfig, StorefrontConfig};
use crate::db::users::{UserRepository, seed_users};
use crate::error::StorefrontError;
use crate::models::session::SessionState;
use crate::models::user::{
    AddressForm, NewUser, Preferences, ProvisionalUser, User, UserRecord, UserUpdate,
};
use crate::services::auth::{AuthError, AuthService};
use crate::services::identity::{GoogleIdentity, derive_customer_id};

/// Capacity of the change notification channel.
const EVENT_CAPACITY: usize = 64;

/// Change notification sent after a directory mutation has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEvent {
    SignedIn { user_id: UserId },
    SignedOut,
    /// A new complete account was created and signed in.
    Registered { user_id: UserId },
    /// A provisional account is waiting for its address.
    AddressRequired { user_id: UserId },
    /// A provisional account was promoted under a new ID and signed in.
    RegistrationCompleted {
        provisional_id: UserId,
        user_id: UserId,
    },
    ProfileUpdated { user_id: UserId },
    UserUpdated { user_id: UserId },
    UserDeleted { user_id: UserId },
}

/// Customer account and session service.
pub struct UserDirectory<S> {
    store: S,
    clock: Arc<dyn Clock>,
    latency: LatencyConfig,
    default_password: SecretString,
    auth: AuthService,
    users: Vec<UserRecord>,
    session: SessionState,
    ids: IdSequence,
    events: broadcast::Sender<DirectoryEvent>,
}

impl<S: SnapshotStore> UserDirectory<S> {
    /// Open the directory persisted in `store` using the wall clock.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError` if a persisted snapshot cannot be read or is
    /// corrupt, or if seeding the credential vault fails.
    pub fn open(store: S, config: &StorefrontConfig) -> Result<Self, StorefrontError> {
        Self::open_with_clock(store, config, Arc::new(SystemClock))
    }

    /// Open the directory persisted in `store`.
    ///
    /// Without a persisted directory the built-in customer accounts are
    /// loaded. Without a persisted credential vault those accounts get the
    /// configured default password.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError` if a persisted snapshot cannot be read or is
    /// corrupt, or if seeding the credential vault fails.
    pub fn open_with_clock(
        store: S,
        config: &StorefrontConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StorefrontError> {
        let fixtures = seed_users()?;
        let auth = AuthService::open(
            &store,
            config.hash_cost,
            fixtures.iter().map(|user| user.email.as_str()),
            &config.default_password,
        )?;

        let (users, mut session) = match UserRepository::new(&store).load()? {
            Some(snapshot) => (snapshot.users, snapshot.session),
            None => {
                debug!(users = fixtures.len(), "No persisted directory, using fixtures");
                (
                    fixtures.into_iter().map(UserRecord::from).collect(),
                    SessionState::Anonymous,
                )
            }
        };

        if !session_matches(&session, &users) {
            warn!(?session, "Persisted session refers to a missing account, signing out");
            session = SessionState::Anonymous;
        }

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            store,
            clock,
            latency: config.latency,
            default_password: config.default_password.clone(),
            auth,
            users,
            session,
            ids: IdSequence::new(),
            events,
        })
    }

    /// Receive change notifications for this directory.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DirectoryEvent> {
        self.events.subscribe()
    }

    // =========================================================================
    // Session
    // =========================================================================

    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Whether the address form must be shown before the session can continue.
    #[must_use]
    pub const fn requires_address(&self) -> bool {
        matches!(self.session, SessionState::AwaitingAddress { .. })
    }

    /// The signed-in account.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        match &self.session {
            SessionState::Authenticated { user_id } => self.complete(user_id),
            _ => None,
        }
    }

    /// The provisional account waiting for an address.
    #[must_use]
    pub fn pending_user(&self) -> Option<&ProvisionalUser> {
        let SessionState::AwaitingAddress { user_id } = &self.session else {
            return None;
        };
        self.users.iter().find_map(|record| match record {
            UserRecord::Provisional(user) if &user.id == user_id => Some(user),
            _ => None,
        })
    }

    // =========================================================================
    // Sign-in and registration
    // =========================================================================

    /// Sign in with email and password.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &SecretString) -> bool {
        simulate_latency(self.latency.login).await;
        let result = self.try_login(email, password);
        report("Login", result)
    }

    /// Sign in an existing account by its federated identity.
    ///
    /// Unknown identities are not registered.
    #[instrument(skip_all, fields(email = %identity.email))]
    pub async fn login_with_google(&mut self, identity: &GoogleIdentity) -> bool {
        simulate_latency(self.latency.login).await;
        let result = self
            .complete_by_email(&identity.email)
            .map(|user| user.id.clone())
            .ok_or(AuthError::UserNotFound)
            .and_then(|id| self.sign_in(id));
        report("Google login", result)
    }

    /// Create a complete account and sign it in.
    ///
    /// The account can then sign in with the default password.
    #[instrument(skip_all, fields(email = %profile.email))]
    pub async fn register(&mut self, profile: NewUser) -> bool {
        simulate_latency(self.latency.register).await;
        let result = self.try_register(profile);
        report("Registration", result)
    }

    /// Start or resume a federated sign-up.
    ///
    /// A complete account with the identity's email is simply signed in. A
    /// pending provisional account is resumed. Otherwise a provisional
    /// account is created and the session waits for an address.
    #[instrument(skip_all, fields(email = %identity.email))]
    pub async fn register_with_google(&mut self, identity: &GoogleIdentity) -> bool {
        simulate_latency(self.latency.register).await;
        let result = self.try_register_with_google(identity);
        report("Google registration", result)
    }

    /// Promote the pending provisional account using `form`.
    #[instrument(skip_all)]
    pub fn complete_google_registration(&mut self, form: &AddressForm) -> bool {
        let result = self.try_complete_google_registration(form);
        report("Address completion", result)
    }

    /// Sign out. The directory is left untouched.
    pub fn logout(&mut self) {
        self.session = SessionState::Anonymous;
        self.commit(DirectoryEvent::SignedOut);
    }

    /// Merge `update` into the signed-in account.
    pub fn update_profile(&mut self, update: UserUpdate) -> bool {
        let SessionState::Authenticated { user_id } = &self.session else {
            debug!("Profile update without a signed-in user");
            return false;
        };
        let user_id = user_id.clone();
        if self.email_conflict(&user_id, &update) {
            debug!(%user_id, "Profile email already belongs to another account");
            return false;
        }
        let Some(user) = self.complete_mut(&user_id) else {
            return false;
        };
        update.apply_to(user);
        self.commit(DirectoryEvent::ProfileUpdated { user_id });
        true
    }

    // =========================================================================
    // Administration
    // =========================================================================

    /// Every record, complete and provisional, in insertion order.
    #[must_use]
    pub fn all_users(&self) -> &[UserRecord] {
        &self.users
    }

    #[must_use]
    pub fn user_by_id(&self, id: &UserId) -> Option<&UserRecord> {
        self.users.iter().find(|record| record.id() == id)
    }

    /// Merge `update` into a complete account.
    ///
    /// Provisional accounts cannot be edited, and an email already used by
    /// another record is rejected.
    pub fn update_user(&mut self, id: &UserId, update: UserUpdate) -> bool {
        if self.email_conflict(id, &update) {
            debug!(user_id = %id, "Email already belongs to another account");
            return false;
        }
        let Some(user) = self.complete_mut(id) else {
            debug!(user_id = %id, "No complete account to update");
            return false;
        };
        update.apply_to(user);
        self.commit(DirectoryEvent::UserUpdated {
            user_id: id.clone(),
        });
        true
    }

    /// Remove a record. Signs out the session if it refers to that record.
    pub fn delete_user(&mut self, id: &UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|record| record.id() != id);
        if self.users.len() == before {
            return false;
        }

        if self.session.user_id() == Some(id) {
            self.session = SessionState::Anonymous;
        }
        info!(user_id = %id, "User deleted");
        self.commit(DirectoryEvent::UserDeleted {
            user_id: id.clone(),
        });
        true
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn try_login(&mut self, email: &str, password: &SecretString) -> Result<UserId, AuthError> {
        self.auth.verify(email, password)?;
        let id = self
            .complete_by_email(email)
            .map(|user| user.id.clone())
            .ok_or(AuthError::UserNotFound)?;
        self.sign_in(id)
    }

    fn try_register(&mut self, profile: NewUser) -> Result<UserId, AuthError> {
        let email = Email::parse(&profile.email)?;
        if self.email_taken(email.as_str()) {
            return Err(AuthError::UserAlreadyExists);
        }

        self.auth
            .set_password(&self.store, email.as_str(), &self.default_password)?;

        let now = self.clock.now();
        let id = UserId::new(self.ids.next("user", now));
        self.users.push(UserRecord::Complete(User {
            id: id.clone(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            email,
            phone: profile.phone,
            address: profile.address,
            date_of_birth: profile.date_of_birth,
            gender: profile.gender,
            is_active: true,
            registration_date: now.date_naive(),
            last_login_date: None,
            order_history: Vec::new(),
            preferences: profile.preferences,
        }));
        self.session = SessionState::Authenticated {
            user_id: id.clone(),
        };
        self.commit(DirectoryEvent::Registered {
            user_id: id.clone(),
        });
        Ok(id)
    }

    fn try_register_with_google(&mut self, identity: &GoogleIdentity) -> Result<UserId, AuthError> {
        let existing = self
            .users
            .iter()
            .find(|record| record.email().as_str() == identity.email)
            .map(|record| (record.id().clone(), record.is_provisional()));

        match existing {
            Some((id, false)) => self.sign_in(id),
            Some((id, true)) => {
                self.await_address(id.clone());
                Ok(id)
            }
            None => {
                let email = Email::parse(&identity.email)?;
                let now = self.clock.now();
                let today = now.date_naive();
                let id = UserId::new(self.ids.next("temp", now));
                self.users.push(UserRecord::Provisional(ProvisionalUser {
                    id: id.clone(),
                    first_name: identity.first_name(),
                    last_name: identity.last_name(),
                    email,
                    picture: Some(identity.picture.clone()).filter(|p| !p.is_empty()),
                    email_verified: identity.email_verified,
                    registration_date: today,
                    last_login_date: Some(today),
                    preferences: Preferences {
                        newsletter: true,
                        sms_notifications: true,
                        email_notifications: true,
                    },
                }));
                self.await_address(id.clone());
                Ok(id)
            }
        }
    }

    fn try_complete_google_registration(
        &mut self,
        form: &AddressForm,
    ) -> Result<UserId, AuthError> {
        let SessionState::AwaitingAddress { user_id } = &self.session else {
            return Err(AuthError::InvalidSessionState);
        };
        if let Some(field) = form.missing_field() {
            return Err(AuthError::IncompleteAddress(field));
        }

        let provisional_id = user_id.clone();
        let new_id = derive_customer_id(&form.street, &form.apartment_no, &form.door_no);
        if self.user_by_id(&new_id).is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let slot = self
            .users
            .iter_mut()
            .find(|record| record.id() == &provisional_id)
            .ok_or(AuthError::UserNotFound)?;
        let UserRecord::Provisional(pending) = slot else {
            return Err(AuthError::InvalidSessionState);
        };
        let completed = pending.clone().complete(new_id.clone(), form);
        *slot = UserRecord::Complete(completed);

        self.session = SessionState::Authenticated {
            user_id: new_id.clone(),
        };
        self.commit(DirectoryEvent::RegistrationCompleted {
            provisional_id,
            user_id: new_id.clone(),
        });
        Ok(new_id)
    }

    fn sign_in(&mut self, id: UserId) -> Result<UserId, AuthError> {
        let today = self.clock.today();
        let user = self.complete_mut(&id).ok_or(AuthError::UserNotFound)?;
        user.last_login_date = Some(today);
        self.session = SessionState::Authenticated {
            user_id: id.clone(),
        };
        self.commit(DirectoryEvent::SignedIn {
            user_id: id.clone(),
        });
        Ok(id)
    }

    fn await_address(&mut self, id: UserId) {
        self.session = SessionState::AwaitingAddress {
            user_id: id.clone(),
        };
        self.commit(DirectoryEvent::AddressRequired { user_id: id });
    }

    fn email_taken(&self, email: &str) -> bool {
        self.users
            .iter()
            .any(|record| record.email().as_str() == email)
    }

    /// Whether `update` would give `id` an email another record already uses.
    fn email_conflict(&self, id: &UserId, update: &UserUpdate) -> bool {
        update.email.as_ref().is_some_and(|email| {
            self.users
                .iter()
                .any(|record| record.id() != id && record.email() == email)
        })
    }

    fn complete(&self, id: &UserId) -> Option<&User> {
        self.users
            .iter()
            .filter_map(UserRecord::as_complete)
            .find(|user| &user.id == id)
    }

    fn complete_mut(&mut self, id: &UserId) -> Option<&mut User> {
        self.users
            .iter_mut()
            .filter_map(UserRecord::as_complete_mut)
            .find(|user| &user.id == id)
    }

    fn complete_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .filter_map(UserRecord::as_complete)
            .find(|user| user.email.as_str() == email)
    }

    fn commit(&self, event: DirectoryEvent) {
        if let Err(e) = UserRepository::new(&self.store).save(&self.session, &self.users) {
            warn!(error = %e, "Failed to persist user directory");
        }
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

fn report(operation: &str, result: Result<UserId, AuthError>) -> bool {
    match result {
        Ok(user_id) => {
            info!(%user_id, "{operation} succeeded");
            true
        }
        Err(e) => {
            info!(error = %e, "{operation} rejected");
            false
        }
    }
}

/// Whether the persisted session points at a record of the right kind.
fn session_matches(session: &SessionState, users: &[UserRecord]) -> bool {
    let find = |id: &UserId| users.iter().find(|record| record.id() == id);
    match session {
        SessionState::Anonymous => true,
        SessionState::AwaitingAddress { user_id } => {
            find(user_id).is_some_and(UserRecord::is_provisional)
        }
        SessionState::Authenticated { user_id } => {
            find(user_id).is_some_and(|record| !record.is_provisional())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use nazsu_core::{FixedClock, MemoryStore};

    use super::*;
    use crate::db::users::USER_STORAGE_KEY;
    use crate::models::user::Address;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    fn directory(store: MemoryStore) -> UserDirectory<MemoryStore> {
        UserDirectory::open_with_clock(
            store,
            &StorefrontConfig::for_tests(),
            Arc::new(FixedClock::on(today())),
        )
        .unwrap()
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Mehmet".to_string(),
            last_name: "Kaya".to_string(),
            email: email.to_string(),
            phone: "0533 987 65 43".to_string(),
            address: Address {
                street: "Barbaros Bulvarı".to_string(),
                city: "İstanbul".to_string(),
                district: "Beşiktaş".to_string(),
                postal_code: "34353".to_string(),
                country: "Türkiye".to_string(),
            },
            ..NewUser::default()
        }
    }

    fn google(email: &str) -> GoogleIdentity {
        GoogleIdentity {
            email: email.to_string(),
            name: "Zeynep Ak".to_string(),
            given_name: "Zeynep".to_string(),
            family_name: "Ak".to_string(),
            picture: String::new(),
            email_verified: true,
        }
    }

    fn address_form() -> AddressForm {
        AddressForm {
            street: "Atatürk Cad.".to_string(),
            apartment_no: "5".to_string(),
            door_no: "2".to_string(),
            city: "İstanbul".to_string(),
            district: "Kadıköy".to_string(),
            postal_code: "34710".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_with_fixture_password() {
        let mut users = directory(MemoryStore::new());
        assert!(!users.login("ahmet@email.com", &secret("wrong")).await);
        assert!(!users.is_authenticated());

        assert!(users.login("ahmet@email.com", &secret("123456")).await);
        let current = users.current_user().unwrap();
        assert_eq!(current.email.as_str(), "ahmet@email.com");
        assert_eq!(current.last_login_date, Some(today()));
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_rejected() {
        let mut users = directory(MemoryStore::new());
        let before = users.all_users().len();

        assert!(!users.register(new_user("ahmet@email.com")).await);
        assert_eq!(users.all_users().len(), before);
        assert!(!users.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_signs_in_and_seeds_password() {
        let mut users = directory(MemoryStore::new());
        assert!(users.register(new_user("mehmet@email.com")).await);

        let current = users.current_user().unwrap().clone();
        assert!(current.id.as_str().starts_with("user-"));
        assert!(current.is_active);
        assert_eq!(current.registration_date, today());
        assert!(current.order_history.is_empty());

        users.logout();
        assert!(users.current_user().is_none());
        assert!(users.login("mehmet@email.com", &secret("123456")).await);
        assert_eq!(users.current_user().unwrap().id, current.id);
    }

    #[tokio::test]
    async fn test_register_rejects_malformed_email() {
        let mut users = directory(MemoryStore::new());
        assert!(!users.register(new_user("not-an-email")).await);
    }

    #[tokio::test]
    async fn test_google_registration_flow() {
        let mut users = directory(MemoryStore::new());
        let slot = users.all_users().len();

        assert!(users.register_with_google(&google("zeynep@gmail.com")).await);
        assert!(!users.is_authenticated());
        assert!(users.requires_address());
        let pending = users.pending_user().unwrap();
        assert!(pending.id.as_str().starts_with("temp-"));
        assert_eq!(pending.first_name, "Zeynep");
        assert!(users.all_users()[slot].is_provisional());

        assert!(users.complete_google_registration(&address_form()));
        assert!(users.is_authenticated());
        assert!(!users.requires_address());

        let current = users.current_user().unwrap();
        assert_eq!(current.id.as_str(), "ATATURKCAD52");
        assert!(current.is_active);
        assert_eq!(current.address.street, "Atatürk Cad. Apt: 5 Daire: 2");
        assert_eq!(current.address.country, "Türkiye");
        assert_eq!(users.all_users()[slot].id().as_str(), "ATATURKCAD52");
        assert!(users.all_users().iter().all(|r| !r.is_provisional()));
    }

    #[tokio::test]
    async fn test_completion_requires_pending_user_and_fields() {
        let mut users = directory(MemoryStore::new());
        assert!(!users.complete_google_registration(&address_form()));

        assert!(users.register_with_google(&google("zeynep@gmail.com")).await);
        let mut form = address_form();
        form.district = " ".to_string();
        assert!(!users.complete_google_registration(&form));
        assert!(users.requires_address());
        assert!(users.pending_user().is_some());
    }

    #[tokio::test]
    async fn test_derived_id_collision_is_rejected() {
        let mut users = directory(MemoryStore::new());
        assert!(users.register_with_google(&google("zeynep@gmail.com")).await);
        assert!(users.complete_google_registration(&address_form()));
        users.logout();

        assert!(users.register_with_google(&google("komsu@gmail.com")).await);
        assert!(!users.complete_google_registration(&address_form()));
        assert!(users.requires_address());
    }

    #[tokio::test]
    async fn test_provisional_accounts_cannot_sign_in() {
        let mut users = directory(MemoryStore::new());
        assert!(users.register_with_google(&google("zeynep@gmail.com")).await);
        users.logout();

        assert!(!users.login_with_google(&google("zeynep@gmail.com")).await);
        assert!(!users.register(new_user("zeynep@gmail.com")).await);

        // Registering again resumes the address step.
        assert!(users.register_with_google(&google("zeynep@gmail.com")).await);
        assert!(users.requires_address());
    }

    #[tokio::test]
    async fn test_google_sign_in_for_existing_accounts() {
        let mut users = directory(MemoryStore::new());
        assert!(!users.login_with_google(&google("stranger@gmail.com")).await);
        assert!(users.login_with_google(&google("ayse@email.com")).await);
        assert_eq!(
            users.current_user().unwrap().email.as_str(),
            "ayse@email.com"
        );

        users.logout();
        assert!(users.register_with_google(&google("test@email.com")).await);
        assert!(users.is_authenticated());
        assert!(!users.requires_address());
    }

    #[tokio::test]
    async fn test_profile_updates() {
        let mut users = directory(MemoryStore::new());
        let update = UserUpdate {
            phone: Some("0555 123 45 67".to_string()),
            ..UserUpdate::default()
        };
        assert!(!users.update_profile(update.clone()));

        assert!(users.login("ayse@email.com", &secret("123456")).await);
        assert!(users.update_profile(update));
        assert_eq!(users.current_user().unwrap().phone, "0555 123 45 67");

        let taken = UserUpdate {
            email: Some(Email::parse("ahmet@email.com").unwrap()),
            ..UserUpdate::default()
        };
        assert!(!users.update_profile(taken));
    }

    #[tokio::test]
    async fn test_admin_edits_reach_current_user() {
        let mut users = directory(MemoryStore::new());
        assert!(users.login("ayse@email.com", &secret("123456")).await);
        let id = users.current_user().unwrap().id.clone();

        assert!(users.update_user(
            &id,
            UserUpdate {
                is_active: Some(false),
                ..UserUpdate::default()
            }
        ));
        assert!(!users.current_user().unwrap().is_active);
        assert!(!users.update_user(&UserId::new("missing"), UserUpdate::default()));

        assert!(users.delete_user(&id));
        assert!(!users.is_authenticated());
        assert!(users.user_by_id(&id).is_none());
        assert!(!users.delete_user(&id));
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let store = MemoryStore::new();
        let mut users = directory(store.clone());
        assert!(users.register(new_user("mehmet@email.com")).await);
        let id = users.current_user().unwrap().id.clone();
        assert!(store.raw(USER_STORAGE_KEY).is_some());

        let reopened = directory(store);
        assert_eq!(reopened.current_user().unwrap().id, id);
        assert_eq!(reopened.all_users().len(), 4);
    }

    #[tokio::test]
    async fn test_dangling_session_is_signed_out() {
        let store = MemoryStore::new();
        store
            .save(
                USER_STORAGE_KEY,
                r#"{"state":{"session":{"status":"authenticated","userId":"ghost"},"users":[]},"version":0}"#,
            )
            .unwrap();

        let users = directory(store);
        assert!(!users.is_authenticated());
        assert!(users.all_users().is_empty());
    }

    #[tokio::test]
    async fn test_events() {
        let mut users = directory(MemoryStore::new());
        let mut rx = users.subscribe();

        assert!(users.register_with_google(&google("zeynep@gmail.com")).await);
        assert!(users.complete_google_registration(&address_form()));
        users.logout();

        assert!(matches!(
            rx.try_recv().unwrap(),
            DirectoryEvent::AddressRequired { .. }
        ));
        match rx.try_recv().unwrap() {
            DirectoryEvent::RegistrationCompleted {
                provisional_id,
                user_id,
            } => {
                assert!(provisional_id.as_str().starts_with("temp-"));
                assert_eq!(user_id.as_str(), "ATATURKCAD52");
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(rx.try_recv().unwrap(), DirectoryEvent::SignedOut);
    }
}
