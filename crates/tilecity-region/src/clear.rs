use tilecity_core::MapBounds;

use crate::editor::{MAX_CLEAR_PASSES, NO_TILES_MESSAGE, RegionEditor};
use crate::protect::{Occupancy, classify};
use crate::region::{Region, Strip, present_points};

/// Outcome of a clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub cleared: usize,
    /// Wonders seen in the region (first pass).
    pub preserved_wonders: usize,
    /// Protected extractors seen in the region (first pass).
    pub preserved_mines: usize,
    pub passes: u32,
    pub message: Option<String>,
}

impl ClearReport {
    fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

impl RegionEditor<'_> {
    /// Remove every unprotected building in the inclusive rectangle.
    pub fn clear_region(&mut self, region: Region) -> ClearReport {
        if self.map.is_empty() {
            return ClearReport::with_message(NO_TILES_MESSAGE);
        }

        let max_passes = self.options.max_clear_passes.clamp(1, MAX_CLEAR_PASSES);
        let mut report = ClearReport::default();
        let scan = present_points(self.map, region);

        for pass in 0..max_passes {
            let mut cleared = 0;
            let mut wonders = 0;
            let mut mines = 0;

            for &point in &scan {
                let Some(tile) = self.map.tile_mut(point) else {
                    continue;
                };
                match classify(tile, self.catalog, self.options.protection) {
                    Occupancy::Empty => {}
                    Occupancy::Wonder => wonders += 1,
                    Occupancy::ProtectedExtractor => mines += 1,
                    Occupancy::Removable => {
                        tile.building = None;
                        cleared += 1;
                    }
                }
            }

            report.passes = pass + 1;
            if pass == 0 {
                report.preserved_wonders = wonders;
                report.preserved_mines = mines;
            }
            report.cleared += cleared;
            if cleared == 0 {
                break;
            }
        }

        if report.cleared > 0 {
            self.hub.grid_changed();
        }
        tracing::debug!(
            ?region,
            cleared = report.cleared,
            wonders = report.preserved_wonders,
            mines = report.preserved_mines,
            passes = report.passes,
            "cleared region"
        );
        report
    }

    /// Clear a strip anchored to the left or right edge of the map.
    pub fn clear_strip(&mut self, strip: Strip) -> ClearReport {
        let Some(bounds) = self.map.observed_bounds() else {
            return ClearReport::with_message(NO_TILES_MESSAGE);
        };
        match strip.resolve(bounds) {
            Some(region) => self.clear_region(region),
            None => ClearReport::with_message(strip_outside(&strip, bounds)),
        }
    }
}

pub(crate) fn strip_outside(strip: &Strip, bounds: MapBounds) -> String {
    format!(
        "{:?} strip of width {} from row {} lies outside the map ({}..={}, {}..={})",
        strip.side, strip.width, strip.start_row, bounds.min_x, bounds.max_x, bounds.min_y,
        bounds.max_y
    )
}
