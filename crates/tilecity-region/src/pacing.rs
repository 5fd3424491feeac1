//! Paced placement: the same fill, spread out over time.
//!
//! A paced fill awaits [`Pacing::interval`] between placements so the player
//! can watch the city grow. It stops at the next suspension point once its
//! [`CancelToken`] is cancelled and reports what it managed so far.

use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;

use crate::editor::{NO_TILES_MESSAGE, RegionEditor};
use crate::fill::{FillReport, Filler, PlacementSpec, log_fill};
use crate::region::Region;

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Shared cancellation flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    state: Arc<CancelState>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every operation holding a clone of this token. Idempotent.
    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
        self.state.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        loop {
            let mut notified = pin!(self.state.notify.notified());
            // Register before checking the flag so a cancel in between is
            // not lost.
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// How a paced fill spreads its placements.
#[derive(Debug, Clone, Default)]
pub struct Pacing {
    /// Delay between consecutive placements. Zero only yields.
    pub interval: Duration,
    /// Refresh after every placement instead of once at the end.
    pub refresh_each: bool,
    pub cancel: CancelToken,
}

impl Pacing {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn refresh_each(mut self, refresh_each: bool) -> Self {
        self.refresh_each = refresh_each;
        self
    }

    async fn pause(&self) -> Result<(), Cancelled> {
        if self.interval.is_zero() {
            tokio::task::yield_now().await;
            return if self.cancel.is_cancelled() {
                Err(Cancelled)
            } else {
                Ok(())
            };
        }
        tokio::select! {
            _ = tokio::time::sleep(self.interval) => Ok(()),
            _ = self.cancel.cancelled() => Err(Cancelled),
        }
    }
}

struct Cancelled;

impl RegionEditor<'_> {
    /// [`place_in_region`](Self::place_in_region), awaiting the pacing
    /// interval between placements.
    ///
    /// The editor stays borrowed until the future completes, so nothing else
    /// can touch the map while the fill is suspended.
    pub async fn place_in_region_paced(
        &mut self,
        region: Region,
        specs: &[PlacementSpec],
        pacing: &Pacing,
    ) -> FillReport {
        if self.map.is_empty() {
            return FillReport::unplaced(specs, NO_TILES_MESSAGE);
        }

        let mut filler = Filler::new(self, region, specs);
        let mut placed_any = false;

        loop {
            if pacing.cancel.is_cancelled() {
                filler.cancel();
                break;
            }
            let Some(placement) = filler.step(self) else {
                break;
            };
            placed_any = true;
            tracing::trace!(point = %placement.point, kind = %placement.kind, "placed");
            if pacing.refresh_each {
                self.hub.grid_changed();
            }
            if !filler.has_work() {
                break;
            }
            if pacing.pause().await.is_err() {
                filler.cancel();
                break;
            }
        }

        if placed_any && !pacing.refresh_each {
            self.hub.grid_changed();
        }

        let report = filler.finish();
        log_fill(&region, &report);
        report
    }
}
