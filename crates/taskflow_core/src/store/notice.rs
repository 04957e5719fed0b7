//! Transient user-facing notices.
//!
//! # Responsibility
//! - Carry success/error/info notices out of store operations without
//!   coupling stores to any presentation code.
//!
//! # Invariants
//! - Notices are fire-and-forget; publishing must not fail or block store
//!   operations.

use log::{error, info};

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// One transient notice, independent of the notification feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Consumer of transient notices.
///
/// The presentation layer implements this to render toasts; the default
/// implementation routes notices into the log.
pub trait NoticeSink {
    fn publish(&self, notice: Notice);
}

/// Default sink writing notices to the process log.
#[derive(Debug, Default)]
pub struct LogNoticeSink;

impl NoticeSink for LogNoticeSink {
    fn publish(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => error!(
                "event=notice module=store level={} message={}",
                notice.level.as_str(),
                notice.message
            ),
            _ => info!(
                "event=notice module=store level={} message={}",
                notice.level.as_str(),
                notice.message
            ),
        }
    }
}
