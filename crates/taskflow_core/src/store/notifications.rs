//! Notification store: per-user feed of task side-effect entries.
//!
//! # Responsibility
//! - Hold the signed-in user's feed in memory, newest first, and mirror
//!   every change to durable storage.
//! - Consume task events routed by the application context.
//!
//! # Invariants
//! - Recording is a no-op while no user is signed in.
//! - Switching users swaps the in-memory feed; persisted feeds of other
//!   users are left untouched.
//! - A failed persist leaves the in-memory feed unchanged.

use crate::model::notification::{Notification, NotificationId};
use crate::model::user::UserId;
use crate::repo::feed_repo::FeedRepository;
use crate::repo::RepoError;
use crate::store::event::TaskEvent;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Notification store error.
#[derive(Debug)]
pub enum NotificationStoreError {
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NotificationStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NotificationStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for NotificationStoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Per-user notification feed state.
pub struct NotificationStore<R: FeedRepository> {
    repo: R,
    user_id: Option<UserId>,
    feed: Vec<Notification>,
}

impl<R: FeedRepository> NotificationStore<R> {
    /// Creates the store with no user and an empty feed.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            user_id: None,
            feed: Vec::new(),
        }
    }

    /// Follows a session change: loads the feed for `user_id`, or empties the
    /// in-memory feed when signed out.
    pub fn sync_session(&mut self, user_id: Option<UserId>) -> Result<(), NotificationStoreError> {
        self.feed = match user_id {
            Some(id) => self.repo.load(id)?,
            None => Vec::new(),
        };
        self.user_id = user_id;
        Ok(())
    }

    /// Records a task event as a fresh unread entry, newest first.
    ///
    /// Returns the new entry's id, or `None` when no user is signed in.
    pub fn record(
        &mut self,
        event: TaskEvent,
    ) -> Result<Option<NotificationId>, NotificationStoreError> {
        let Some(user_id) = self.user_id else {
            return Ok(None);
        };

        let entry = Notification::new(event.kind, event.task_id, event.message);
        let entry_id = entry.id;

        let mut next = self.feed.clone();
        next.insert(0, entry);
        self.repo.save(user_id, &next)?;
        self.feed = next;
        Ok(Some(entry_id))
    }

    /// Marks one entry as read; no-op when the id is unknown or already read.
    pub fn mark_as_read(&mut self, id: NotificationId) -> Result<(), NotificationStoreError> {
        let Some(user_id) = self.user_id else {
            return Ok(());
        };
        let Some(pos) = self.feed.iter().position(|entry| entry.id == id) else {
            return Ok(());
        };
        if self.feed[pos].read {
            return Ok(());
        }

        let mut next = self.feed.clone();
        next[pos].read = true;
        self.repo.save(user_id, &next)?;
        self.feed = next;
        Ok(())
    }

    /// Marks every entry as read.
    pub fn mark_all_as_read(&mut self) -> Result<(), NotificationStoreError> {
        let Some(user_id) = self.user_id else {
            return Ok(());
        };
        if self.feed.iter().all(|entry| entry.read) {
            return Ok(());
        }

        let mut next = self.feed.clone();
        for entry in &mut next {
            entry.read = true;
        }
        self.repo.save(user_id, &next)?;
        self.feed = next;
        Ok(())
    }

    /// Removes one entry; no-op when the id is unknown.
    pub fn clear(&mut self, id: NotificationId) -> Result<(), NotificationStoreError> {
        let Some(user_id) = self.user_id else {
            return Ok(());
        };
        if !self.feed.iter().any(|entry| entry.id == id) {
            return Ok(());
        }

        let mut next = self.feed.clone();
        next.retain(|entry| entry.id != id);
        self.repo.save(user_id, &next)?;
        self.feed = next;
        Ok(())
    }

    /// The signed-in user's feed, newest first.
    pub fn feed(&self) -> &[Notification] {
        &self.feed
    }

    /// Number of unread entries.
    pub fn unread_count(&self) -> usize {
        self.feed.iter().filter(|entry| !entry.read).count()
    }
}
