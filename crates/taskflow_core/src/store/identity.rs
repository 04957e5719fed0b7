//! Identity store: session, roster and authentication operations.
//!
//! # Responsibility
//! - Own the current session pointer and the fixed user roster.
//! - Provide login/register/logout with persisted session state.
//!
//! # Invariants
//! - Failed login/register leaves the session unchanged.
//! - A restored session that fails to decode is discarded, never fatal.
//! - Registration does not extend the queryable roster; only the session is
//!   affected.

use crate::model::user::{placeholder_avatar, User, UserRole};
use crate::repo::session_repo::SessionRepository;
use crate::repo::RepoError;
use crate::seed::{seed_users, DEMO_PASSWORD};
use crate::store::notice::{Notice, NoticeSink};
use crate::store::{simulate_delay, StoreConfig};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

/// Identity store error.
#[derive(Debug)]
pub enum IdentityStoreError {
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for IdentityStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IdentityStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for IdentityStoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Session and roster state with authentication operations.
pub struct IdentityStore<R: SessionRepository> {
    repo: R,
    roster: Vec<User>,
    session: Option<User>,
    config: StoreConfig,
    notices: Arc<dyn NoticeSink>,
}

impl<R: SessionRepository> IdentityStore<R> {
    /// Creates the store, restoring any persisted session.
    ///
    /// A malformed persisted session has already been discarded by the
    /// repository and restores as "no session".
    pub fn new(
        repo: R,
        config: StoreConfig,
        notices: Arc<dyn NoticeSink>,
    ) -> Result<Self, IdentityStoreError> {
        let session = repo.load()?;
        if let Some(user) = &session {
            info!(
                "event=session_restore module=store status=ok user_id={}",
                user.id
            );
        }

        Ok(Self {
            repo,
            roster: seed_users(),
            session,
            config,
            notices,
        })
    }

    /// Attempts to sign in with the demo credential scheme.
    ///
    /// # Contract
    /// - Email lookup against the roster is case-insensitive.
    /// - Succeeds only when a roster user matches and `password` equals the
    ///   fixed demo value; the session is then set and persisted.
    /// - On failure the session is left unchanged and `false` is returned.
    pub fn login(&mut self, email: &str, password: &str) -> Result<bool, IdentityStoreError> {
        simulate_delay(self.config.auth_delay);

        let found = self
            .roster
            .iter()
            .find(|user| user.email_matches(email))
            .cloned();

        let Some(user) = found.filter(|_| password == DEMO_PASSWORD) else {
            self.notices
                .publish(Notice::error("Invalid email or password"));
            return Ok(false);
        };

        if let Err(err) = self.repo.save(&user) {
            self.notices
                .publish(Notice::error("An error occurred during login"));
            return Err(err.into());
        }

        info!("event=login module=store status=ok user_id={}", user.id);
        self.notices
            .publish(Notice::success(format!("Welcome back, {}!", user.name)));
        self.session = Some(user);
        Ok(true)
    }

    /// Registers a new account and signs it in.
    ///
    /// # Contract
    /// - Fails when the email already exists in the roster (case-insensitive).
    /// - The new user gets a generated id, role `User` and a deterministic
    ///   placeholder avatar, and becomes the persisted session.
    /// - The roster itself is not extended; other components keep seeing only
    ///   the seeded users.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> Result<bool, IdentityStoreError> {
        simulate_delay(self.config.auth_delay);

        if self.roster.iter().any(|user| user.email_matches(email)) {
            self.notices
                .publish(Notice::error("Email already registered"));
            return Ok(false);
        }

        let id = Uuid::new_v4();
        let user = User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role: UserRole::User,
            avatar: Some(placeholder_avatar(id)),
        };

        if let Err(err) = self.repo.save(&user) {
            self.notices
                .publish(Notice::error("An error occurred during registration"));
            return Err(err.into());
        }

        info!(
            "event=register module=store status=ok user_id={} roster=unchanged",
            user.id
        );
        self.notices
            .publish(Notice::success(format!("Welcome, {name}!")));
        self.session = Some(user);
        Ok(true)
    }

    /// Clears the session and its persisted record.
    pub fn logout(&mut self) -> Result<(), IdentityStoreError> {
        self.repo.clear()?;
        self.session = None;
        info!("event=logout module=store status=ok");
        self.notices.publish(Notice::info("You've been logged out"));
        Ok(())
    }

    /// Current session user, if signed in.
    pub fn session(&self) -> Option<&User> {
        self.session.as_ref()
    }

    /// The fixed, queryable user roster.
    pub fn roster(&self) -> &[User] {
        &self.roster
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}
