//! Serde data file structs for the building catalog and city maps.
//!
//! Kind names are kept as strings here and resolved into the closed enums
//! by the content loader, so an unknown name is reported together with the
//! file it came from.

use serde::{Deserialize, Serialize};
use tilecity_core::BuildingStatus;

// ===========================================================================
// Catalog
// ===========================================================================

/// A building catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    /// Building placed to satisfy power requirements.
    #[serde(default)]
    pub power_plant: Option<String>,
    pub buildings: Vec<BuildingData>,
}

/// A building definition in a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingData {
    pub name: String,
    pub tier: u32,
    #[serde(default)]
    pub power: bool,
    /// Deposits this building extracts.
    #[serde(default)]
    pub deposits: Vec<String>,
    #[serde(default)]
    pub wonder: Option<WonderData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WonderData {
    World,
    Natural,
}

// ===========================================================================
// Map
// ===========================================================================

/// A city map file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapData {
    /// Grid edge length used by the tile key codec.
    #[serde(default = "default_size")]
    pub size: u32,
    pub tiles: Vec<TileData>,
}

fn default_size() -> u32 {
    64
}

/// One tile in a map file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileData {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub explored: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deposits: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<BuildingStateData>,
}

/// A building standing on a tile in a map file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingStateData {
    pub kind: String,
    #[serde(default)]
    pub level: u16,
    /// Defaults to `level`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_level: Option<u16>,
    /// Derived from the levels when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BuildingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stockpile_capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stockpile_max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_capacity: Option<u32>,
}
