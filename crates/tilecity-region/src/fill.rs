//! Tier-ordered sequential placement.
//!
//! A fill walks the region once, in scan order, with a single cursor shared
//! by every spec. Specs are attempted lowest tier first; each one takes the
//! next empty tiles until its count is met or the region runs out, and the
//! next spec resumes where the cursor stopped. A later spec therefore never
//! takes a tile ahead of an earlier one.
//!
//! The walk is a step machine ([`Filler`]) so the synchronous fill and the
//! paced async fill share one implementation.

use serde::{Deserialize, Serialize};
use tilecity_core::{BuildingKind, CityMap, Point};

use crate::clear::strip_outside;
use crate::editor::{NO_TILES_MESSAGE, RegionEditor};
use crate::protect::{Occupancy, classify};
use crate::region::{Region, Strip, present_points};

/// A request to place `count` buildings of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementSpec {
    pub kind: BuildingKind,
    pub count: usize,
    #[serde(default)]
    pub target_level: Option<u16>,
}

impl PlacementSpec {
    pub fn new(kind: BuildingKind, count: usize) -> Self {
        Self {
            kind,
            count,
            target_level: None,
        }
    }

    pub fn at_level(mut self, level: u16) -> Self {
        self.target_level = Some(level);
        self
    }
}

/// Per-spec outcome, reported in the caller's input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementResult {
    pub kind: BuildingKind,
    pub requested: usize,
    pub placed: usize,
}

/// Outcome of a fill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    pub results: Vec<PlacementResult>,
    /// Occupied wonder tiles the cursor walked past.
    pub skipped_wonders: usize,
    /// Occupied protected-extractor tiles the cursor walked past.
    pub skipped_mines: usize,
    /// Where a power plant was placed to satisfy a power requirement.
    pub power_plant: Option<Point>,
    /// Kinds with no catalog definition; recorded with `placed: 0`.
    pub unknown: Vec<BuildingKind>,
    /// Set when a paced fill was cancelled before finishing.
    pub cancelled: bool,
    pub message: Option<String>,
}

impl FillReport {
    pub fn total_placed(&self) -> usize {
        self.results.iter().map(|r| r.placed).sum()
    }

    pub fn total_requested(&self) -> usize {
        self.results.iter().map(|r| r.requested).sum()
    }

    /// Every spec got its full count.
    pub fn is_complete(&self) -> bool {
        self.results.iter().all(|r| r.placed >= r.requested)
    }

    fn pending(specs: &[PlacementSpec]) -> Self {
        Self {
            results: specs
                .iter()
                .map(|s| PlacementResult {
                    kind: s.kind,
                    requested: s.count,
                    placed: 0,
                })
                .collect(),
            ..Self::default()
        }
    }

    pub(crate) fn unplaced(specs: &[PlacementSpec], message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::pending(specs)
        }
    }
}

/// One placement made by a [`Filler`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub point: Point,
    pub kind: BuildingKind,
}

/// Step machine for a single fill.
#[derive(Debug)]
pub(crate) struct Filler {
    scan: Vec<Point>,
    cursor: usize,
    /// Indices into `levels` / `report.results`, in placement priority.
    order: Vec<usize>,
    next: usize,
    levels: Vec<u16>,
    needs_power_plant: bool,
    report: FillReport,
}

impl Filler {
    pub(crate) fn new(editor: &RegionEditor<'_>, region: Region, specs: &[PlacementSpec]) -> Self {
        let catalog = editor.catalog;
        let map: &CityMap = &*editor.map;

        let scan = present_points(map, region);

        let mut report = FillReport::pending(specs);

        let mut order = Vec::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            if catalog.definition(spec.kind).is_some() {
                order.push(i);
            } else {
                tracing::warn!(kind = %spec.kind, "no definition for building; skipping");
                report.unknown.push(spec.kind);
            }
        }
        // Stable: equal tiers keep input order.
        order.sort_by_key(|&i| catalog.tier(specs[i].kind).unwrap_or(u32::MAX));

        let levels = specs
            .iter()
            .map(|s| s.target_level.unwrap_or(editor.options.default_target_level))
            .collect();

        let wants_power = order
            .iter()
            .any(|&i| specs[i].count > 0 && catalog.requires_power(specs[i].kind));
        let needs_power_plant = wants_power
            && match catalog.power_plant() {
                Some(plant) => !scan.iter().any(|p| {
                    map.tile(*p).and_then(|t| t.building_kind()) == Some(plant)
                }),
                None => {
                    tracing::warn!("catalog has no power plant; power requirement ignored");
                    false
                }
            };

        Self {
            scan,
            cursor: 0,
            order,
            next: 0,
            levels,
            needs_power_plant,
            report,
        }
    }

    /// Advance the cursor to the next tile that can take a building,
    /// counting the occupied tiles walked past. The cursor ends just past the
    /// returned point.
    fn next_free(&mut self, editor: &RegionEditor<'_>) -> Option<Point> {
        while let Some(&point) = self.scan.get(self.cursor) {
            self.cursor += 1;
            let Some(tile) = editor.map.tile(point) else {
                continue;
            };
            match classify(tile, editor.catalog, editor.options.protection) {
                Occupancy::Empty => {
                    if editor.options.require_explored && !tile.explored {
                        continue;
                    }
                    return Some(point);
                }
                Occupancy::Wonder => self.report.skipped_wonders += 1,
                Occupancy::ProtectedExtractor => self.report.skipped_mines += 1,
                Occupancy::Removable => {}
            }
        }
        None
    }

    /// Place one building. `None` once every spec is satisfied or the region
    /// is exhausted.
    pub(crate) fn step(&mut self, editor: &mut RegionEditor<'_>) -> Option<Placement> {
        if self.needs_power_plant {
            self.needs_power_plant = false;
            if let Some(plant) = editor.catalog.power_plant() {
                match self.next_free(editor) {
                    Some(point) if editor.place_at(point, plant, editor.options.power_plant_level) => {
                        self.report.power_plant = Some(point);
                        return Some(Placement { point, kind: plant });
                    }
                    _ => tracing::warn!("no free tile for power plant"),
                }
            }
        }

        loop {
            let &idx = self.order.get(self.next)?;
            let result = self.report.results[idx];
            if result.placed >= result.requested {
                self.next += 1;
                continue;
            }
            let point = self.next_free(editor)?;
            if !editor.place_at(point, result.kind, self.levels[idx]) {
                continue;
            }
            self.report.results[idx].placed += 1;
            return Some(Placement {
                point,
                kind: result.kind,
            });
        }
    }

    /// Whether another step could still place something.
    pub(crate) fn has_work(&self) -> bool {
        if self.needs_power_plant {
            return true;
        }
        self.cursor < self.scan.len()
            && self.order[self.next..]
                .iter()
                .any(|&i| self.report.results[i].placed < self.report.results[i].requested)
    }

    pub(crate) fn cancel(&mut self) {
        self.report.cancelled = true;
    }

    pub(crate) fn finish(self) -> FillReport {
        self.report
    }
}

impl RegionEditor<'_> {
    /// Fill the region with the specs, lowest tier first.
    pub fn place_in_region(&mut self, region: Region, specs: &[PlacementSpec]) -> FillReport {
        if self.map.is_empty() {
            return FillReport::unplaced(specs, NO_TILES_MESSAGE);
        }

        let mut filler = Filler::new(self, region, specs);
        let mut placed_any = false;
        while filler.step(self).is_some() {
            placed_any = true;
        }
        if placed_any {
            self.hub.grid_changed();
        }

        let report = filler.finish();
        log_fill(&region, &report);
        report
    }

    /// Fill a strip anchored to the left or right edge of the map.
    pub fn place_in_strip(&mut self, strip: Strip, specs: &[PlacementSpec]) -> FillReport {
        let Some(bounds) = self.map.observed_bounds() else {
            return FillReport::unplaced(specs, NO_TILES_MESSAGE);
        };
        match strip.resolve(bounds) {
            Some(region) => self.place_in_region(region, specs),
            None => FillReport::unplaced(specs, strip_outside(&strip, bounds)),
        }
    }
}

pub(crate) fn log_fill(region: &Region, report: &FillReport) {
    tracing::debug!(
        ?region,
        placed = report.total_placed(),
        requested = report.total_requested(),
        skipped_wonders = report.skipped_wonders,
        skipped_mines = report.skipped_mines,
        power_plant = ?report.power_plant,
        cancelled = report.cancelled,
        "filled region"
    );
}
