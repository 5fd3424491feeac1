//! Change notification for grid edits.
//!
//! After a region operation changes the map, observers need two things:
//! their derived caches (transport sources, resource lookups) dropped, and a
//! redraw. Redraws are delivered in two phases so both pull-based and
//! push-based views converge:
//!
//! - **Immediate** -- delivered inside [`RefreshHub::grid_changed`].
//! - **NextFrame** -- queued, delivered by the caller's frame loop through
//!   [`RefreshHub::flush_frame`].
//!
//! Observer failures are logged and counted. They never propagate, so a
//! broken view cannot undo an edit that already happened.

use std::fmt;

/// Which delivery phase a refresh belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshPhase {
    Immediate,
    NextFrame,
}

/// Failure reported by an observer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{observer}: {detail}")]
pub struct ObserverError {
    pub observer: String,
    pub detail: String,
}

impl ObserverError {
    pub fn new(observer: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            observer: observer.into(),
            detail: detail.into(),
        }
    }
}

/// Something that caches or renders grid state.
///
/// Both methods default to no-ops so observers only override what they
/// care about.
pub trait GridObserver: fmt::Debug + Send {
    /// Drop any cache derived from building positions.
    fn invalidate_caches(&mut self) -> Result<(), ObserverError> {
        Ok(())
    }

    /// The grid changed; redraw.
    fn grid_updated(&mut self, phase: RefreshPhase) -> Result<(), ObserverError> {
        let _ = phase;
        Ok(())
    }
}

/// Running counters, mostly for tests and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
    /// Calls to [`RefreshHub::grid_changed`].
    pub changes: u64,
    /// Deferred refreshes delivered through [`RefreshHub::flush_frame`].
    pub frames_flushed: u64,
    /// Observer calls that returned an error.
    pub failures: u64,
}

/// Fan-out point for grid change notifications.
#[derive(Debug, Default)]
pub struct RefreshHub {
    observers: Vec<Box<dyn GridObserver>>,
    frame_pending: bool,
    stats: RefreshStats,
}

impl RefreshHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn GridObserver>) {
        self.observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Invalidate caches, refresh immediately, and queue a next-frame refresh.
    pub fn grid_changed(&mut self) {
        self.stats.changes += 1;
        for observer in &mut self.observers {
            if let Err(e) = observer.invalidate_caches() {
                tracing::warn!(error = %e, "cache invalidation failed");
                self.stats.failures += 1;
            }
            if let Err(e) = observer.grid_updated(RefreshPhase::Immediate) {
                tracing::warn!(error = %e, "immediate refresh failed");
                self.stats.failures += 1;
            }
        }
        self.frame_pending = true;
    }

    /// Whether a next-frame refresh is queued.
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Deliver the queued next-frame refresh, if any. Several changes within
    /// one frame collapse into a single delivery.
    pub fn flush_frame(&mut self) {
        if !self.frame_pending {
            return;
        }
        self.frame_pending = false;
        self.stats.frames_flushed += 1;
        for observer in &mut self.observers {
            if let Err(e) = observer.grid_updated(RefreshPhase::NextFrame) {
                tracing::warn!(error = %e, "next-frame refresh failed");
                self.stats.failures += 1;
            }
        }
    }

    pub fn stats(&self) -> RefreshStats {
        self.stats
    }
}
