//! # Core Traits (Ports)
//!
//! The surfaces the core hands work off to. Any plugin must implement these
//! traits to be used by the binary.

use chrono::{DateTime, Utc};

use crate::models::{Report, SharePayload};

/// An external sharing surface (system share sheet, clipboard, ...).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ShareSurface: Send + Sync {
    /// Whether the surface can be used right now. A share sheet may be missing
    /// on some platforms; a clipboard is always there.
    fn is_available(&self) -> bool {
        true
    }

    fn share(&self, payload: &SharePayload) -> anyhow::Result<()>;
}

/// Where post reports go.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ReportSink: Send + Sync {
    fn report(&self, report: &Report) -> anyhow::Result<()>;
}

/// Source of creation times for posts.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
