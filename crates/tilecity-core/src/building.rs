use crate::kind::BuildingKind;
use serde::{Deserialize, Serialize};

/// Stockpile capacity given to a freshly constructed building.
pub const DEFAULT_STOCKPILE_CAPACITY: u32 = 1;
/// Stockpile ceiling given to a freshly constructed building.
pub const DEFAULT_STOCKPILE_MAX: u32 = 5;
/// Input capacity multiplier given to a freshly constructed building.
pub const DEFAULT_INPUT_CAPACITY: u32 = 1;

/// Largest stockpile capacity a building can be configured with.
pub const MAX_STOCKPILE_CAPACITY: u32 = 16;
/// Largest stockpile ceiling a building can be configured with.
pub const MAX_STOCKPILE_MAX: u32 = 50;
/// Largest input capacity multiplier a building can be configured with.
pub const MAX_INPUT_CAPACITY: u32 = 8;

/// Construction state of a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildingStatus {
    /// Level 0, waiting for the construction system to raise it.
    #[default]
    Building,
    /// Partially built toward a higher desired level.
    Upgrading,
    /// At or above its desired level.
    Completed,
}

/// How a new building's stockpile and input fields are configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlacementStyle {
    /// The factory defaults; the building ramps up on its own.
    #[default]
    Default,
    /// Maximum stockpile and input capacity, so the building accepts
    /// resources immediately.
    MaxStockpile,
}

/// A building standing on a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    pub level: u16,
    pub desired_level: u16,
    #[serde(default)]
    pub status: BuildingStatus,
    #[serde(default = "default_stockpile_capacity")]
    pub stockpile_capacity: u32,
    #[serde(default = "default_stockpile_max")]
    pub stockpile_max: u32,
    #[serde(default = "default_input_capacity")]
    pub input_capacity: u32,
}

fn default_stockpile_capacity() -> u32 {
    DEFAULT_STOCKPILE_CAPACITY
}

fn default_stockpile_max() -> u32 {
    DEFAULT_STOCKPILE_MAX
}

fn default_input_capacity() -> u32 {
    DEFAULT_INPUT_CAPACITY
}

impl Building {
    /// A building at level 0 that the construction system will drive toward
    /// `desired_level`.
    pub fn construct(kind: BuildingKind, desired_level: u16, style: PlacementStyle) -> Self {
        let mut building = Self {
            kind,
            level: 0,
            desired_level,
            status: BuildingStatus::Building,
            stockpile_capacity: DEFAULT_STOCKPILE_CAPACITY,
            stockpile_max: DEFAULT_STOCKPILE_MAX,
            input_capacity: DEFAULT_INPUT_CAPACITY,
        };
        if style == PlacementStyle::MaxStockpile {
            building.stockpile_capacity = MAX_STOCKPILE_CAPACITY;
            building.stockpile_max = MAX_STOCKPILE_MAX;
            building.input_capacity = MAX_INPUT_CAPACITY;
        }
        building
    }

    /// A finished building at `level`. Used for fixtures and loaded maps.
    pub fn completed(kind: BuildingKind, level: u16) -> Self {
        Self {
            level,
            status: BuildingStatus::Completed,
            ..Self::construct(kind, level, PlacementStyle::Default)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.level >= self.desired_level
    }

    /// Raise the level by up to `levels` toward `desired_level` and update
    /// the status. Returns `true` if the level changed.
    pub fn advance(&mut self, levels: u16) -> bool {
        let before = self.level;
        if self.level < self.desired_level {
            let step = levels.min(self.desired_level - self.level);
            self.level += step;
        }
        self.status = if self.is_complete() {
            BuildingStatus::Completed
        } else if self.level == 0 {
            BuildingStatus::Building
        } else {
            BuildingStatus::Upgrading
        };
        self.level != before
    }
}
