//! The sparse tile collection region operations edit.
//!
//! A [`CityMap`] only contains the tiles the game has generated; coordinates
//! without an entry are simply not part of the map. Region operations mutate
//! `Tile::building` in place and never add or remove entries.

use crate::building::Building;
use crate::coord::{Point, TileCodec, TileKey};
use crate::kind::{BuildingKind, DepositKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One tile of the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    #[serde(default)]
    pub deposits: BTreeSet<DepositKind>,
    #[serde(default)]
    pub building: Option<Building>,
    #[serde(default)]
    pub explored: bool,
}

impl Tile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deposit(mut self, deposit: DepositKind) -> Self {
        self.deposits.insert(deposit);
        self
    }

    pub fn with_building(mut self, building: Building) -> Self {
        self.building = Some(building);
        self
    }

    pub fn explored(mut self) -> Self {
        self.explored = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.building.is_none()
    }

    pub fn building_kind(&self) -> Option<BuildingKind> {
        self.building.as_ref().map(|b| b.kind)
    }

    pub fn has_deposit(&self, deposit: DepositKind) -> bool {
        self.deposits.contains(&deposit)
    }
}

/// Bounding box of the tiles present in a map (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl MapBounds {
    /// The bottom-right corner `(max_x, max_y)`.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x) as u32 + 1
    }

    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y) as u32 + 1
    }
}

/// Errors from map construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("tile {point} is outside the {size}x{size} grid")]
    OffGrid { point: Point, size: u32 },
    #[error("tile {0} is defined twice")]
    DuplicateTile(Point),
}

/// Sparse map of packed tile keys to tiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityMap {
    codec: TileCodec,
    tiles: BTreeMap<TileKey, Tile>,
}

impl CityMap {
    /// An empty map on a `size` x `size` grid.
    pub fn new(size: u32) -> Self {
        Self {
            codec: TileCodec::new(size),
            tiles: BTreeMap::new(),
        }
    }

    /// A map with every tile of a `width` x `height` rectangle at the origin
    /// present and empty.
    pub fn filled(size: u32, width: u32, height: u32) -> Self {
        let mut map = Self::new(size);
        for x in 0..width as i32 {
            for y in 0..height as i32 {
                if let Some(key) = map.codec.encode(Point::new(x, y)) {
                    map.tiles.insert(key, Tile::new().explored());
                }
            }
        }
        map
    }

    pub fn codec(&self) -> TileCodec {
        self.codec
    }

    // -- Map construction --

    /// Add a tile entry. This is the only way entries are created; region
    /// operations never call it.
    pub fn insert_tile(&mut self, point: Point, tile: Tile) -> Result<(), MapError> {
        let key = self.codec.encode(point).ok_or(MapError::OffGrid {
            point,
            size: self.codec.size(),
        })?;
        if self.tiles.contains_key(&key) {
            return Err(MapError::DuplicateTile(point));
        }
        self.tiles.insert(key, tile);
        Ok(())
    }

    // -- Point queries --

    pub fn tile(&self, point: Point) -> Option<&Tile> {
        self.codec.encode(point).and_then(|key| self.tiles.get(&key))
    }

    pub fn tile_mut(&mut self, point: Point) -> Option<&mut Tile> {
        let key = self.codec.encode(point)?;
        self.tiles.get_mut(&key)
    }

    pub fn building_at(&self, point: Point) -> Option<&Building> {
        self.tile(point).and_then(|t| t.building.as_ref())
    }

    // -- Whole-map queries --

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate tiles in key order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Tile)> {
        self.tiles.iter().map(|(key, tile)| (key.point(), tile))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Point, &mut Tile)> {
        self.tiles.iter_mut().map(|(key, tile)| (key.point(), tile))
    }

    /// Number of tiles holding a building.
    pub fn building_count(&self) -> usize {
        self.tiles.values().filter(|t| t.building.is_some()).count()
    }

    /// Count buildings of one kind.
    pub fn count_kind(&self, kind: BuildingKind) -> usize {
        self.tiles
            .values()
            .filter(|t| t.building_kind() == Some(kind))
            .count()
    }

    /// Bounding box of all present tiles, found by scanning every key.
    /// `None` for an empty map.
    pub fn observed_bounds(&self) -> Option<MapBounds> {
        let mut keys = self.tiles.keys().map(|k| k.point());
        let first = keys.next()?;
        let mut bounds = MapBounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for p in keys {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::PlacementStyle;

    #[test]
    fn filled_map_has_every_tile() {
        let map = CityMap::filled(16, 3, 2);
        assert_eq!(map.len(), 6);
        assert!(map.tile(Point::new(2, 1)).is_some());
        assert!(map.tile(Point::new(3, 0)).is_none());
        assert_eq!(map.building_count(), 0);
    }

    #[test]
    fn insert_tile_rejects_off_grid_and_duplicates() {
        let mut map = CityMap::new(4);
        assert!(map.insert_tile(Point::new(1, 1), Tile::new()).is_ok());
        assert_eq!(
            map.insert_tile(Point::new(1, 1), Tile::new()),
            Err(MapError::DuplicateTile(Point::new(1, 1)))
        );
        assert!(matches!(
            map.insert_tile(Point::new(4, 0), Tile::new()),
            Err(MapError::OffGrid { size: 4, .. })
        ));
    }

    #[test]
    fn observed_bounds_scans_keys() {
        let mut map = CityMap::new(32);
        map.insert_tile(Point::new(5, 7), Tile::new()).unwrap();
        map.insert_tile(Point::new(2, 9), Tile::new()).unwrap();
        map.insert_tile(Point::new(11, 3), Tile::new()).unwrap();

        let bounds = map.observed_bounds().unwrap();
        assert_eq!(
            bounds,
            MapBounds {
                min_x: 2,
                max_x: 11,
                min_y: 3,
                max_y: 9,
            }
        );
        assert_eq!(bounds.bottom_right(), Point::new(11, 9));
        assert_eq!(bounds.width(), 10);
        assert_eq!(bounds.height(), 7);
    }

    #[test]
    fn observed_bounds_empty_map() {
        assert_eq!(CityMap::new(8).observed_bounds(), None);
    }

    #[test]
    fn tile_mut_edits_in_place() {
        let mut map = CityMap::filled(8, 2, 2);
        let p = Point::new(1, 0);
        map.tile_mut(p).unwrap().building = Some(Building::construct(
            BuildingKind::House,
            1,
            PlacementStyle::Default,
        ));
        assert_eq!(map.building_at(p).map(|b| b.kind), Some(BuildingKind::House));
        assert_eq!(map.count_kind(BuildingKind::House), 1);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn tile_builders() {
        let tile = Tile::new()
            .with_deposit(DepositKind::Stone)
            .with_building(Building::completed(BuildingKind::StoneQuarry, 1))
            .explored();
        assert!(tile.has_deposit(DepositKind::Stone));
        assert!(!tile.has_deposit(DepositKind::Iron));
        assert_eq!(tile.building_kind(), Some(BuildingKind::StoneQuarry));
        assert!(!tile.is_empty());
        assert!(tile.explored);
    }

    #[test]
    fn iter_walks_key_order() {
        let map = CityMap::filled(8, 2, 2);
        let points: Vec<Point> = map.iter().map(|(p, _)| p).collect();
        assert_eq!(
            points,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 0),
                Point::new(1, 1),
            ]
        );
    }
}
