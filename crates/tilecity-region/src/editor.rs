use serde::{Deserialize, Serialize};
use tilecity_core::{Building, BuildingKind, Catalog, CityMap, PlacementStyle, Point, RefreshHub};

use crate::protect::ExtractorProtection;

/// Hard cap on clear passes, whatever the configuration asks for.
pub const MAX_CLEAR_PASSES: u32 = 10;

/// Message attached to reports when the map has no tiles at all.
pub const NO_TILES_MESSAGE: &str = "no map tiles available";

/// Tunables shared by all region operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Clear passes per call, clamped to `1..=MAX_CLEAR_PASSES`. Scanning
    /// stops early once a pass removes nothing.
    pub max_clear_passes: u32,
    pub protection: ExtractorProtection,
    /// Desired level for specs that do not name one.
    pub default_target_level: u16,
    /// Desired level of a power plant placed to satisfy a power requirement.
    pub power_plant_level: u16,
    pub style: PlacementStyle,
    /// Only place onto explored tiles.
    pub require_explored: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            max_clear_passes: 1,
            protection: ExtractorProtection::default(),
            default_target_level: 1,
            power_plant_level: 1,
            style: PlacementStyle::Default,
            require_explored: false,
        }
    }
}

/// Borrowed view over everything a region edit touches.
///
/// The map is borrowed mutably for the editor's whole lifetime, so two bulk
/// operations can never interleave on the same map.
#[derive(Debug)]
pub struct RegionEditor<'a> {
    pub(crate) map: &'a mut CityMap,
    pub(crate) catalog: &'a Catalog,
    pub(crate) hub: &'a mut RefreshHub,
    pub(crate) options: EditorOptions,
}

impl<'a> RegionEditor<'a> {
    pub fn new(map: &'a mut CityMap, catalog: &'a Catalog, hub: &'a mut RefreshHub) -> Self {
        Self {
            map,
            catalog,
            hub,
            options: EditorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EditorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn map(&self) -> &CityMap {
        self.map
    }

    /// Put a new level-0 building on `point` if the tile exists and is empty.
    /// Returns `false` without touching the tile otherwise.
    pub(crate) fn place_at(&mut self, point: Point, kind: BuildingKind, desired_level: u16) -> bool {
        let style = self.options.style;
        match self.map.tile_mut(point) {
            Some(tile) if tile.building.is_none() => {
                tile.building = Some(Building::construct(kind, desired_level, style));
                true
            }
            _ => false,
        }
    }
}
