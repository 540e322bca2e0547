//! Session state holder.
//!
//! `SessionState` owns the observable fields the login and attendance screens
//! share, hydrates them from the key-value store at construction, and writes
//! every mutation back through to the store.

use chrono::{Duration, Local, Utc};
use tracing::{debug, warn};

use crate::observe::Observable;
use crate::store::KeyValueStore;

/// Store key for the session token
const KEY_COOKIE: &str = "cookie";

/// Store key for the session expiry (epoch millis)
const KEY_COOKIE_EXPIRY: &str = "cookieExpiry";

/// Store key for the login email
const KEY_EMAIL: &str = "email";

/// Store key for the login password
const KEY_PASSWORD: &str = "password";

/// Store key for the selected attendance date
const KEY_DATE: &str = "date";

/// Store key for the data-retention consent flag
const KEY_DATA_RETENTION_AGREED: &str = "dataRetentionAgreed";

/// Store key for the policy-seen flag
const KEY_HAS_SEEN_POLICY: &str = "hasSeenPolicy";

/// Expiry value older builds stored to mean "no session".
/// Honored at hydration so their mirrors still read as logged out.
const NO_SESSION_EXPIRY: i64 = -1;

/// Display format for attendance dates
const DATE_FORMAT: &str = "%d-%m-%Y";

/// Today's local calendar date, formatted for display.
pub fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// An authenticated session: bearer token plus absolute expiry.
///
/// Replaced wholesale on login and dropped wholesale on logout; fields are
/// never mutated individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredential {
    pub token: String,
    pub expires_at: i64,
}

impl SessionCredential {
    pub fn new(token: impl Into<String>, expires_at: i64) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at
    }

    pub fn time_until_expiry(&self) -> Duration {
        Duration::milliseconds(self.expires_at - Utc::now().timestamp_millis())
    }

    /// Get minutes remaining until expiry (for display)
    pub fn minutes_until_expiry(&self) -> i64 {
        self.time_until_expiry().num_minutes().max(0)
    }
}

/// The shared session state holder.
///
/// Holds six observable fields and the store they mirror into. Constructed
/// once per app scope; the caller injects the store and is the sole writer
/// of its key set.
pub struct SessionState<S: KeyValueStore> {
    store: S,
    session: Observable<Option<SessionCredential>>,
    email: Observable<String>,
    password: Observable<String>,
    date: Observable<String>,
    data_retention_agreed: Observable<bool>,
    has_seen_policy: Observable<bool>,
}

impl<S: KeyValueStore> SessionState<S> {
    /// Create the holder, hydrating every field from `store`.
    ///
    /// Missing or mistyped entries fall back to their defaults: empty
    /// strings, unset flags, today's date, no session. A session is restored
    /// only when both the token and a real expiry are present.
    pub fn new(store: S) -> Self {
        let expiry = store
            .get_i64(KEY_COOKIE_EXPIRY)
            .unwrap_or(NO_SESSION_EXPIRY);
        let session = match store.get_str(KEY_COOKIE) {
            Some(token) if expiry != NO_SESSION_EXPIRY => {
                Some(SessionCredential::new(token, expiry))
            }
            _ => None,
        };

        let email = store.get_str(KEY_EMAIL).unwrap_or_default();
        let password = store.get_str(KEY_PASSWORD).unwrap_or_default();
        let date = store.get_str(KEY_DATE).unwrap_or_else(today);
        let data_retention_agreed = store.get_bool(KEY_DATA_RETENTION_AGREED).unwrap_or(false);
        let has_seen_policy = store.get_bool(KEY_HAS_SEEN_POLICY).unwrap_or(false);

        debug!(
            has_session = session.is_some(),
            date = %date,
            "Hydrated session state"
        );

        Self {
            store,
            session: Observable::new(session),
            email: Observable::new(email),
            password: Observable::new(password),
            date: Observable::new(date),
            data_retention_agreed: Observable::new(data_retention_agreed),
            has_seen_policy: Observable::new(has_seen_policy),
        }
    }

    /// Replace the session after a successful login.
    pub fn set_session(&mut self, credential: SessionCredential) {
        self.store.put_str(KEY_COOKIE, &credential.token);
        self.store.put_i64(KEY_COOKIE_EXPIRY, credential.expires_at);
        self.session.set(Some(credential));
        self.persist();
    }

    pub fn set_email(&mut self, email: &str) {
        self.email.set(email.to_string());
        self.store.put_str(KEY_EMAIL, email);
        self.persist();
    }

    pub fn set_password(&mut self, password: &str) {
        self.password.set(password.to_string());
        self.store.put_str(KEY_PASSWORD, password);
        self.persist();
    }

    /// Set the selected attendance date.
    ///
    /// The value is stored as given; callers supply the `dd-MM-yyyy` form.
    pub fn set_date(&mut self, date: &str) {
        self.date.set(date.to_string());
        self.store.put_str(KEY_DATE, date);
        self.persist();
    }

    pub fn set_data_retention_agreed(&mut self, agreed: bool) {
        self.data_retention_agreed.set(agreed);
        self.store.put_bool(KEY_DATA_RETENTION_AGREED, agreed);
        self.persist();
    }

    pub fn set_has_seen_policy(&mut self, seen: bool) {
        self.has_seen_policy.set(seen);
        self.store.put_bool(KEY_HAS_SEEN_POLICY, seen);
        self.persist();
    }

    /// Drop the session and login fields, here and in the store.
    ///
    /// Consent flags survive logout: both stay in memory and in the store.
    pub fn clear(&mut self) {
        self.session.set(None);
        self.email.set(String::new());
        self.password.set(String::new());
        self.date.set(today());

        self.store.remove(KEY_COOKIE);
        self.store.remove(KEY_COOKIE_EXPIRY);
        self.store.remove(KEY_EMAIL);
        self.store.remove(KEY_PASSWORD);
        self.store.remove(KEY_DATE);
        self.persist();

        debug!("Cleared session state");
    }

    /// Check if the session is missing or past its expiry.
    pub fn is_session_expired(&self) -> bool {
        match self.session.get() {
            Some(credential) => credential.is_expired(),
            None => true,
        }
    }

    /// Get the bearer token if a session is present
    pub fn token(&self) -> Option<String> {
        self.session.get().map(|c| c.token)
    }

    // ===== Snapshot getters =====

    pub fn session(&self) -> Option<SessionCredential> {
        self.session.get()
    }

    pub fn email(&self) -> String {
        self.email.get()
    }

    pub fn password(&self) -> String {
        self.password.get()
    }

    pub fn date(&self) -> String {
        self.date.get()
    }

    pub fn data_retention_agreed(&self) -> bool {
        self.data_retention_agreed.get()
    }

    pub fn has_seen_policy(&self) -> bool {
        self.has_seen_policy.get()
    }

    // ===== Subscriptions =====

    pub fn watch_session(&self) -> tokio::sync::watch::Receiver<Option<SessionCredential>> {
        self.session.subscribe()
    }

    pub fn watch_email(&self) -> tokio::sync::watch::Receiver<String> {
        self.email.subscribe()
    }

    pub fn watch_password(&self) -> tokio::sync::watch::Receiver<String> {
        self.password.subscribe()
    }

    pub fn watch_date(&self) -> tokio::sync::watch::Receiver<String> {
        self.date.subscribe()
    }

    pub fn watch_data_retention_agreed(&self) -> tokio::sync::watch::Receiver<bool> {
        self.data_retention_agreed.subscribe()
    }

    pub fn watch_has_seen_policy(&self) -> tokio::sync::watch::Receiver<bool> {
        self.has_seen_policy.subscribe()
    }

    /// Read access to the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.commit() {
            warn!(error = %e, "Failed to persist session state");
        }
    }
}
