//! # cb-surfaces-local
//!
//! In-process implementations of the share and report surfaces.
//! Features: a clipboard buffer, share-sheet fallback routing, and a report
//! sink that writes structured log events.

use std::sync::Mutex;

use anyhow::anyhow;
use cb_core::models::{Report, SharePayload};
use cb_core::traits::{ReportSink, ShareSurface};
use tracing::info;

/// A clipboard held in memory. Sharing replaces its contents with the
/// plain-text form of the post.
#[derive(Debug, Default)]
pub struct ClipboardShare {
    buffer: Mutex<Option<String>>,
}

impl ClipboardShare {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whatever was last copied, if anything.
    pub fn contents(&self) -> Option<String> {
        self.buffer.lock().ok().and_then(|b| b.clone())
    }
}

impl ShareSurface for ClipboardShare {
    fn share(&self, payload: &SharePayload) -> anyhow::Result<()> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| anyhow!("clipboard lock poisoned"))?;
        *buffer = Some(payload.to_clipboard_text());
        Ok(())
    }
}

/// Uses the share sheet when there is one and it is usable, otherwise the
/// fallback (normally a clipboard).
pub struct FallbackShare<F: ShareSurface> {
    sheet: Option<Box<dyn ShareSurface>>,
    fallback: F,
}

impl<F: ShareSurface> FallbackShare<F> {
    pub fn new(sheet: Option<Box<dyn ShareSurface>>, fallback: F) -> Self {
        Self { sheet, fallback }
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }
}

impl<F: ShareSurface> ShareSurface for FallbackShare<F> {
    fn share(&self, payload: &SharePayload) -> anyhow::Result<()> {
        match &self.sheet {
            Some(sheet) if sheet.is_available() => sheet.share(payload),
            _ => self.fallback.share(payload),
        }
    }
}

/// Emits every report as an `info` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReportSink;

impl ReportSink for LogReportSink {
    fn report(&self, report: &Report) -> anyhow::Result<()> {
        info!(
            post_id = %report.post_id,
            reason = %report.reason,
            reported_at = %report.reported_at,
            "post reported"
        );
        Ok(())
    }
}
