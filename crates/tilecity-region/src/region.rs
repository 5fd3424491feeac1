use serde::{Deserialize, Serialize};
use tilecity_core::{CityMap, MapBounds, Point};

/// An inclusive rectangle `[min_x..=max_x] x [min_y..=max_y]`.
///
/// A region with `min > max` on either axis is empty; it is not normalized,
/// since a reversed range from a caller usually means "nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Region {
    pub fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Number of coordinates in the region.
    pub fn area(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let w = (self.max_x as i64 - self.min_x as i64 + 1) as u64;
        let h = (self.max_y as i64 - self.min_y as i64 + 1) as u64;
        w * h
    }

    /// The part of the region inside `bounds`. Empty when they do not
    /// overlap.
    pub fn intersect(&self, bounds: MapBounds) -> Region {
        Region::new(
            self.min_x.max(bounds.min_x),
            self.max_x.min(bounds.max_x),
            self.min_y.max(bounds.min_y),
            self.max_y.min(bounds.max_y),
        )
    }

    /// Row-major scan order: top to bottom, then left to right within a row.
    /// The order is fixed so repeated scans of an unchanged region agree.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let Region {
            min_x,
            max_x,
            min_y,
            max_y,
        } = *self;
        (min_y..=max_y).flat_map(move |y| (min_x..=max_x).map(move |x| Point::new(x, y)))
    }
}

/// Which map edge a strip is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// A region anchored to the left or right edge of the live map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Strip {
    pub side: Side,
    /// Number of columns, counted inward from the edge.
    pub width: u32,
    pub start_row: i32,
    /// Last row, inclusive. `None` runs to the bottom of the map.
    #[serde(default)]
    pub end_row: Option<i32>,
}

impl Strip {
    pub fn new(side: Side, width: u32, start_row: i32) -> Self {
        Self {
            side,
            width,
            start_row,
            end_row: None,
        }
    }

    pub fn rows(mut self, start_row: i32, end_row: i32) -> Self {
        self.start_row = start_row;
        self.end_row = Some(end_row);
        self
    }

    /// Resolve against observed map bounds. Columns and rows are clamped to
    /// the bounds; returns `None` when nothing of the strip lies on the map.
    pub fn resolve(&self, bounds: MapBounds) -> Option<Region> {
        if self.width == 0 {
            return None;
        }
        let span = (self.width - 1).min(i32::MAX as u32) as i32;
        let (min_x, max_x) = match self.side {
            Side::Left => (
                bounds.min_x,
                bounds.min_x.saturating_add(span).min(bounds.max_x),
            ),
            Side::Right => (
                bounds.max_x.saturating_sub(span).max(bounds.min_x),
                bounds.max_x,
            ),
        };
        let min_y = self.start_row.max(bounds.min_y);
        let max_y = self.end_row.unwrap_or(bounds.max_y).min(bounds.max_y);

        let region = Region::new(min_x, max_x, min_y, max_y);
        (!region.is_empty()).then_some(region)
    }
}

/// Points of `region` that have a tile, in row-major order.
///
/// The region is clipped to the observed bounds first. When the clipped
/// rectangle still holds more coordinates than the map holds tiles, the
/// tiles are walked instead of the coordinates.
pub(crate) fn present_points(map: &CityMap, region: Region) -> Vec<Point> {
    let Some(bounds) = map.observed_bounds() else {
        return Vec::new();
    };
    let clipped = region.intersect(bounds);
    if clipped.area() <= map.len() as u64 {
        return clipped.points().filter(|p| map.tile(*p).is_some()).collect();
    }
    let mut points: Vec<Point> = map
        .iter()
        .map(|(p, _)| p)
        .filter(|p| clipped.contains(*p))
        .collect();
    points.sort_unstable_by_key(|p| (p.y, p.x));
    points
}
