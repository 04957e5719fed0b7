//! User domain model.
//!
//! # Responsibility
//! - Define the user record shared by the roster and the session pointer.
//!
//! # Invariants
//! - `id` is stable and never reused for another user.
//! - Users are never mutated or deleted once created.
//! - Email uniqueness is checked case-insensitively at registration.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a user record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type UserId = Uuid;

/// Authorization role attached to a user.
///
/// Roles are descriptive only; no operation in this layer enforces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    User,
}

/// Canonical user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable global ID used for attribution and feed scoping.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email. Compared case-insensitively, stored as entered.
    pub email: String,
    pub role: UserRole,
    /// Optional avatar image reference.
    pub avatar: Option<String>,
}

impl User {
    /// Returns whether `email` matches this user's email, ignoring case.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}

/// Derives the placeholder avatar reference for a generated user.
///
/// Deterministic for a given `id`, so re-registration flows always render the
/// same image for the same account.
pub fn placeholder_avatar(id: UserId) -> String {
    format!("https://i.pravatar.cc/150?u={id}")
}
