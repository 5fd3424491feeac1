//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::building::{Building, PlacementStyle};
use crate::catalog::Catalog;
use crate::coord::Point;
use crate::kind::{BuildingKind, DepositKind};
use crate::map::{CityMap, Tile};
use crate::refresh::{GridObserver, ObserverError, RefreshPhase};
use std::sync::{Arc, Mutex};

// ===========================================================================
// Map fixtures
// ===========================================================================

pub fn catalog() -> Catalog {
    Catalog::standard()
}

/// A fully populated, explored `width` x `height` map at the origin.
pub fn empty_map(width: u32, height: u32) -> CityMap {
    CityMap::filled(64, width, height)
}

pub fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// Put a completed building on an existing tile.
pub fn put(map: &mut CityMap, point: Point, kind: BuildingKind) {
    if let Some(tile) = map.tile_mut(point) {
        tile.building = Some(Building::completed(kind, 1));
    }
}

/// Put a building that is still under construction on an existing tile.
pub fn put_unfinished(map: &mut CityMap, point: Point, kind: BuildingKind, desired: u16) {
    if let Some(tile) = map.tile_mut(point) {
        tile.building = Some(Building::construct(kind, desired, PlacementStyle::Default));
    }
}

/// Add a deposit to an existing tile.
pub fn deposit(map: &mut CityMap, point: Point, deposit: DepositKind) {
    if let Some(tile) = map.tile_mut(point) {
        tile.deposits.insert(deposit);
    }
}

/// A map built from a row-per-string layout. Each character is one tile:
///
/// - `.` empty tile
/// - `W` wonder (Atomium)
/// - `F` wheat farm
/// - `H` house
/// - `s` stone deposit, empty
/// - `Q` stone deposit with a stone quarry
/// - `i` iron deposit, empty
/// - `X` iron deposit with a stone quarry (mismatched extractor)
/// - `P` coal power plant
/// - ` ` no tile at all
pub fn layout(rows: &[&str]) -> CityMap {
    let mut map = CityMap::new(64);
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            let point = Point::new(x as i32, y as i32);
            let tile = match c {
                ' ' => continue,
                '.' => Tile::new(),
                'W' => Tile::new().with_building(Building::completed(BuildingKind::Atomium, 1)),
                'F' => Tile::new().with_building(Building::completed(BuildingKind::WheatFarm, 1)),
                'H' => Tile::new().with_building(Building::completed(BuildingKind::House, 1)),
                's' => Tile::new().with_deposit(DepositKind::Stone),
                'Q' => Tile::new()
                    .with_deposit(DepositKind::Stone)
                    .with_building(Building::completed(BuildingKind::StoneQuarry, 1)),
                'i' => Tile::new().with_deposit(DepositKind::Iron),
                'X' => Tile::new()
                    .with_deposit(DepositKind::Iron)
                    .with_building(Building::completed(BuildingKind::StoneQuarry, 1)),
                'P' => Tile::new()
                    .with_building(Building::completed(BuildingKind::CoalPowerPlant, 1)),
                other => panic!("unknown layout character {other:?}"),
            };
            map.insert_tile(point, tile.explored())
                .expect("layout tiles are unique and on-grid");
        }
    }
    map
}

/// Snapshot of building kinds by point, for before/after comparisons.
pub fn kinds(map: &CityMap) -> Vec<(Point, Option<BuildingKind>)> {
    map.iter().map(|(p, t)| (p, t.building_kind())).collect()
}

// ===========================================================================
// Observers
// ===========================================================================

/// Records every observer call. Clone the handle before subscribing to read
/// the log afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub log: Arc<Mutex<Vec<Option<RefreshPhase>>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cache invalidations seen.
    pub fn invalidations(&self) -> usize {
        self.log().iter().filter(|e| e.is_none()).count()
    }

    /// Number of refreshes seen in `phase`.
    pub fn refreshes(&self, phase: RefreshPhase) -> usize {
        self.log().iter().filter(|e| **e == Some(phase)).count()
    }

    fn log(&self) -> Vec<Option<RefreshPhase>> {
        self.log.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl GridObserver for RecordingObserver {
    fn invalidate_caches(&mut self) -> Result<(), ObserverError> {
        if let Ok(mut log) = self.log.lock() {
            log.push(None);
        }
        Ok(())
    }

    fn grid_updated(&mut self, phase: RefreshPhase) -> Result<(), ObserverError> {
        if let Ok(mut log) = self.log.lock() {
            log.push(Some(phase));
        }
        Ok(())
    }
}

/// An observer whose every call fails.
#[derive(Debug, Default)]
pub struct FailingObserver;

impl GridObserver for FailingObserver {
    fn invalidate_caches(&mut self) -> Result<(), ObserverError> {
        Err(ObserverError::new("failing", "cache unavailable"))
    }

    fn grid_updated(&mut self, _phase: RefreshPhase) -> Result<(), ObserverError> {
        Err(ObserverError::new("failing", "view unavailable"))
    }
}
