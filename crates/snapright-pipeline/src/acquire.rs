//! Image acquisition sessions.
//!
//! At most one acquisition prompt is outstanding at a time. Starting a new
//! acquisition supersedes the active session; in-flight work is not
//! aborted, but a superseded session's result is discarded rather than
//! delivered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AcquireError;
use crate::ports::ImageAcquirer;
use crate::request::ImageSource;

/// Options for soliciting images from the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionPrompt {
    /// Allow selecting several images at once.
    pub multiple: bool,
    /// Restrict the host to live capture instead of stored files.
    pub camera_only: bool,
}

/// Single-slot coordinator for image acquisition.
///
/// The active-session handle is the only shared mutable state in the
/// pipeline; it is a generation counter, so supersession is an atomic
/// store and stale deliveries are filtered by comparing generations.
pub struct AcquisitionCoordinator {
    acquirer: Arc<dyn ImageAcquirer>,
    active: AtomicU64,
    next_session: AtomicU64,
}

impl AcquisitionCoordinator {
    /// Create a coordinator around the host capability.
    ///
    /// A host without acquisition support is rejected at construction
    /// time with [`AcquireError::Unsupported`].
    pub fn new(acquirer: Option<Arc<dyn ImageAcquirer>>) -> Result<Self, AcquireError> {
        let acquirer = acquirer.ok_or(AcquireError::Unsupported)?;
        Ok(Self {
            acquirer,
            active: AtomicU64::new(0),
            next_session: AtomicU64::new(1),
        })
    }

    /// Prompt the host for images.
    ///
    /// Starting a new acquisition supersedes any session still in flight;
    /// the superseded call reports [`AcquireError::Superseded`] instead of
    /// delivering its stale result. A prompt that completes with no input
    /// reports [`AcquireError::NoInput`].
    pub async fn acquire(
        &self,
        prompt: AcquisitionPrompt,
    ) -> Result<Vec<ImageSource>, AcquireError> {
        let session = self.next_session.fetch_add(1, Ordering::Relaxed);
        self.active.store(session, Ordering::SeqCst);
        debug!(session, ?prompt, "starting acquisition");

        let result = self.acquirer.acquire(&prompt).await;

        if self.active.load(Ordering::SeqCst) != session {
            debug!(session, "acquisition superseded; discarding result");
            return Err(AcquireError::Superseded);
        }

        match result {
            Ok(sources) if sources.is_empty() => Err(AcquireError::NoInput),
            other => other,
        }
    }
}
