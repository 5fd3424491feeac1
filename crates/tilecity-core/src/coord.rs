use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest grid side length a [`TileKey`] can address (16 bits per axis).
pub const MAX_GRID_SIZE: u32 = 1 << 16;

/// A position on the 2D tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another point.
    pub fn manhattan_distance(&self, other: &Point) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Packed linear tile key: `(x << 16) | y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileKey(pub u32);

impl TileKey {
    /// The unpacked coordinate. Always valid, regardless of grid size.
    pub fn point(self) -> Point {
        Point::new((self.0 >> 16) as i32, (self.0 & 0xffff) as i32)
    }
}

/// Converts between points and packed keys on a square grid of `size` tiles
/// per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileCodec {
    size: u32,
}

impl TileCodec {
    /// Create a codec for a `size` x `size` grid. `size` is clamped to
    /// `1..=MAX_GRID_SIZE`.
    pub fn new(size: u32) -> Self {
        Self {
            size: size.clamp(1, MAX_GRID_SIZE),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Whether the point lies on the grid.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0 && point.y >= 0 && (point.x as u32) < self.size && (point.y as u32) < self.size
    }

    /// Pack a point into a tile key. Returns `None` for off-grid points.
    pub fn encode(&self, point: Point) -> Option<TileKey> {
        if !self.contains(point) {
            return None;
        }
        Some(TileKey(((point.x as u32) << 16) | point.y as u32))
    }

    /// Unpack a tile key. Returns `None` if the key addresses a tile outside
    /// this grid.
    pub fn decode(&self, key: TileKey) -> Option<Point> {
        let point = key.point();
        self.contains(point).then_some(point)
    }
}

impl Default for TileCodec {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        let a = Point::new(0, 0);
        let b = Point::new(3, -4);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(b.manhattan_distance(&a), 7);
        assert_eq!(a.manhattan_distance(&a), 0);
    }

    #[test]
    fn point_display() {
        assert_eq!(Point::new(3, -2).to_string(), "(3, -2)");
    }

    #[test]
    fn encode_packs_x_high_y_low() {
        let codec = TileCodec::new(100);
        assert_eq!(codec.encode(Point::new(2, 5)), Some(TileKey((2 << 16) | 5)));
        assert_eq!(codec.encode(Point::new(0, 0)), Some(TileKey(0)));
    }

    #[test]
    fn encode_rejects_off_grid() {
        let codec = TileCodec::new(10);
        assert_eq!(codec.encode(Point::new(-1, 0)), None);
        assert_eq!(codec.encode(Point::new(0, -1)), None);
        assert_eq!(codec.encode(Point::new(10, 0)), None);
        assert_eq!(codec.encode(Point::new(0, 10)), None);
        assert!(codec.encode(Point::new(9, 9)).is_some());
    }

    #[test]
    fn decode_inverts_encode() {
        let codec = TileCodec::new(300);
        let p = Point::new(257, 17);
        let key = codec.encode(p).unwrap();
        assert_eq!(codec.decode(key), Some(p));
        assert_eq!(key.point(), p);
    }

    #[test]
    fn decode_rejects_keys_beyond_grid() {
        let codec = TileCodec::new(4);
        assert_eq!(codec.decode(TileKey((5 << 16) | 1)), None);
    }

    #[test]
    fn size_is_clamped() {
        assert_eq!(TileCodec::new(0).size(), 1);
        assert_eq!(TileCodec::new(u32::MAX).size(), MAX_GRID_SIZE);
    }
}
