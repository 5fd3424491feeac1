//! Serde structs for plan files.
//!
//! Building names stay strings: a plan naming a building the catalog does
//! not know still loads, and the runner skips the affected step or spec.

use serde::{Deserialize, Serialize};
use tilecity_core::CityMap;
use tilecity_region::{Region, Side, Strip};

/// A plan file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanData {
    pub name: String,
    /// Shown in the summary. Falls back to `name`.
    #[serde(default)]
    pub title: String,
    pub steps: Vec<StepData>,
}

impl PlanData {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}

/// One step of a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StepData {
    Clear {
        area: AreaData,
    },
    Fill {
        area: AreaData,
        specs: Vec<SpecData>,
        /// Overrides the configured pacing interval. 0 runs unpaced.
        #[serde(default)]
        interval_ms: Option<u64>,
    },
    Extractors {
        building: String,
        #[serde(default = "default_level")]
        level: u16,
        quantity: usize,
    },
    WaitForConstruction {
        area: AreaData,
        #[serde(default)]
        max_wait_ms: Option<u64>,
        #[serde(default)]
        poll_ms: Option<u64>,
    },
}

impl StepData {
    pub fn label(&self) -> &'static str {
        match self {
            StepData::Clear { .. } => "clear",
            StepData::Fill { .. } => "fill",
            StepData::Extractors { .. } => "extractors",
            StepData::WaitForConstruction { .. } => "wait",
        }
    }
}

fn default_level() -> u16 {
    1
}

/// A building request inside a fill step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecData {
    pub building: String,
    pub count: usize,
    #[serde(default)]
    pub level: Option<u16>,
}

/// Where a step applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaData {
    /// Inclusive rectangle.
    Rect {
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
    },
    /// Columns anchored to the left or right map edge.
    Strip {
        side: Side,
        width: u32,
        #[serde(default)]
        start_row: i32,
        #[serde(default)]
        end_row: Option<i32>,
    },
    /// Every tile of the map.
    Map,
}

/// An area resolved far enough for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Area {
    Region(Region),
    Strip(Strip),
}

impl AreaData {
    pub(crate) fn resolve(self, map: &CityMap) -> Area {
        match self {
            AreaData::Rect {
                min_x,
                max_x,
                min_y,
                max_y,
            } => Area::Region(Region::new(min_x, max_x, min_y, max_y)),
            AreaData::Strip {
                side,
                width,
                start_row,
                end_row,
            } => Area::Strip(Strip {
                side,
                width,
                start_row,
                end_row,
            }),
            // An empty map yields an empty region; the editor reports it.
            AreaData::Map => Area::Region(match map.observed_bounds() {
                Some(b) => Region::new(b.min_x, b.max_x, b.min_y, b.max_y),
                None => Region::new(0, -1, 0, -1),
            }),
        }
    }

    /// The concrete rectangle on this map, if any of the area lies on it.
    pub(crate) fn region(self, map: &CityMap) -> Option<Region> {
        match self.resolve(map) {
            Area::Region(region) => (!region.is_empty()).then_some(region),
            Area::Strip(strip) => strip.resolve(map.observed_bounds()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilecity_core::test_utils::*;

    #[test]
    fn deserialize_plan() {
        let input = r#"(
            name: "initial_mines",
            title: "Build Initial Mines",
            steps: [
                Clear(area: Strip(side: Right, width: 4)),
                Fill(
                    area: Rect(min_x: 0, max_x: 5, min_y: 0, max_y: 3),
                    specs: [(building: "House", count: 6), (building: "WheatFarm", count: 2, level: Some(3))],
                    interval_ms: Some(50),
                ),
                Extractors(building: "StoneQuarry", quantity: 3),
                WaitForConstruction(area: Map, max_wait_ms: Some(1000)),
            ],
        )"#;

        let plan: PlanData = ron::from_str(input).unwrap();
        assert_eq!(plan.display_title(), "Build Initial Mines");
        assert_eq!(plan.steps.len(), 4);
        assert!(matches!(
            plan.steps[0],
            StepData::Clear {
                area: AreaData::Strip { side: Side::Right, width: 4, start_row: 0, end_row: None }
            }
        ));
        match &plan.steps[1] {
            StepData::Fill { specs, interval_ms, .. } => {
                assert_eq!(specs.len(), 2);
                assert_eq!(specs[1].level, Some(3));
                assert_eq!(*interval_ms, Some(50));
            }
            other => panic!("expected fill, got {other:?}"),
        }
        assert!(matches!(plan.steps[2], StepData::Extractors { level: 1, quantity: 3, .. }));
        assert_eq!(plan.steps[3].label(), "wait");
    }

    #[test]
    fn title_falls_back_to_name() {
        let plan: PlanData = ron::from_str(r#"(name: "lhc_part_3", steps: [])"#).unwrap();
        assert_eq!(plan.display_title(), "lhc_part_3");
    }

    #[test]
    fn map_area_covers_observed_bounds() {
        let map = empty_map(4, 3);
        assert_eq!(AreaData::Map.region(&map), Some(Region::new(0, 3, 0, 2)));

        let empty = CityMap::new(8);
        assert_eq!(AreaData::Map.region(&empty), None);
    }

    #[test]
    fn strip_area_resolves_against_map() {
        let map = empty_map(6, 6);
        let area = AreaData::Strip {
            side: Side::Left,
            width: 2,
            start_row: 4,
            end_row: None,
        };
        assert_eq!(area.region(&map), Some(Region::new(0, 1, 4, 5)));
    }
}
