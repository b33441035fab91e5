//! Export progress reporting
//!
//! Progress is reported synchronously at fixed milestones. The callback is
//! never awaited and its outcome does not affect the export.

use serde::{Deserialize, Serialize};

/// Phase of an export call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportPhase {
    Preparing,
    Formatting,
    Generating,
    Complete,
}

/// A progress notification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportProgress {
    pub phase: ExportPhase,
    /// 0 to 100
    pub percent: u8,
    /// Rows processed so far, when meaningful for the phase
    pub current: Option<usize>,
    pub total: Option<usize>,
}

impl ExportProgress {
    pub fn preparing() -> Self {
        Self {
            phase: ExportPhase::Preparing,
            percent: 0,
            current: None,
            total: None,
        }
    }

    pub fn formatting(total_rows: usize) -> Self {
        Self {
            phase: ExportPhase::Formatting,
            percent: 25,
            current: Some(0),
            total: Some(total_rows),
        }
    }

    pub fn generating(total_rows: usize) -> Self {
        Self {
            phase: ExportPhase::Generating,
            percent: 75,
            current: Some(total_rows),
            total: Some(total_rows),
        }
    }

    pub fn complete() -> Self {
        Self {
            phase: ExportPhase::Complete,
            percent: 100,
            current: None,
            total: None,
        }
    }
}

/// Optional caller callback receiving milestones
pub(crate) struct ProgressSink<'a> {
    callback: Option<Box<dyn FnMut(ExportProgress) + 'a>>,
}

impl<'a> ProgressSink<'a> {
    pub(crate) fn new(callback: Option<Box<dyn FnMut(ExportProgress) + 'a>>) -> Self {
        Self { callback }
    }

    pub(crate) fn none() -> Self {
        Self { callback: None }
    }

    pub(crate) fn report(&mut self, progress: ExportProgress) {
        tracing::trace!(
            "export progress: {:?} {}%",
            progress.phase,
            progress.percent
        );
        if let Some(callback) = self.callback.as_mut() {
            callback(progress);
        }
    }
}

impl std::fmt::Debug for ProgressSink<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSink")
            .field("callback", &self.callback.as_ref().map(|_| "<callback>"))
            .finish()
    }
}
