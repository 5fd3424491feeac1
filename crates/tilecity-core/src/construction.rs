use crate::coord::Point;
use crate::map::CityMap;

/// Seam to the construction system that turns `desired_level` into real
/// levels. The editor only places level-0 buildings; something else has to
/// build them.
pub trait ConstructionDriver: std::fmt::Debug + Send {
    /// Advance construction by one step. Returns the number of buildings
    /// whose level changed.
    fn advance(&mut self, map: &mut CityMap) -> usize;
}

/// Raises every unfinished building by a fixed number of levels per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStepper {
    pub levels_per_step: u16,
}

impl LevelStepper {
    pub fn new(levels_per_step: u16) -> Self {
        Self { levels_per_step }
    }
}

impl Default for LevelStepper {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ConstructionDriver for LevelStepper {
    fn advance(&mut self, map: &mut CityMap) -> usize {
        let mut changed = 0;
        for (_, tile) in map.iter_mut() {
            if let Some(building) = tile.building.as_mut() {
                if building.advance(self.levels_per_step) {
                    changed += 1;
                }
            }
        }
        changed
    }
}

/// Points whose building has not yet reached its desired level, within an
/// optional point filter.
pub fn unfinished(map: &CityMap, mut filter: impl FnMut(Point) -> bool) -> Vec<Point> {
    map.iter()
        .filter(|(p, tile)| {
            tile.building.as_ref().is_some_and(|b| !b.is_complete()) && filter(*p)
        })
        .map(|(p, _)| p)
        .collect()
}
