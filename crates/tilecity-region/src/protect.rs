use serde::{Deserialize, Serialize};
use tilecity_core::{Catalog, Tile};

/// When a building standing on a deposit is protected from clearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExtractorProtection {
    /// Protected only while the building is the extractor the catalog
    /// assigns to one of the tile's deposits.
    #[default]
    MatchingExtractor,
    /// Any building on a tile with a deposit is protected.
    AnyDeposit,
}

/// What a region operation may do with a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupancy {
    Empty,
    Wonder,
    ProtectedExtractor,
    Removable,
}

/// Classify a tile. Wonders take precedence over extractor protection.
pub fn classify(tile: &Tile, catalog: &Catalog, rule: ExtractorProtection) -> Occupancy {
    let Some(building) = tile.building.as_ref() else {
        return Occupancy::Empty;
    };
    if catalog.is_wonder(building.kind) {
        return Occupancy::Wonder;
    }
    let protected = match rule {
        ExtractorProtection::MatchingExtractor => tile
            .deposits
            .iter()
            .any(|&d| catalog.extractor_for(d) == Some(building.kind)),
        ExtractorProtection::AnyDeposit => !tile.deposits.is_empty(),
    };
    if protected {
        Occupancy::ProtectedExtractor
    } else {
        Occupancy::Removable
    }
}
