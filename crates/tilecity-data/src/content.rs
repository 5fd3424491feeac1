//! Loading and saving catalogs and maps.

use std::path::Path;

use tilecity_core::{
    Building, BuildingDef, BuildingKind, Catalog, CityMap, DepositKind, PlacementStyle, Point, Tile,
    WonderClass,
};

use crate::loader::{DataLoadError, deserialize_file, resolve_name, serialize_file};
use crate::schema::{BuildingData, BuildingStateData, CatalogData, MapData, TileData, WonderData};

// ===========================================================================
// Catalog
// ===========================================================================

/// Load a building catalog file and freeze it.
pub fn load_catalog(path: &Path) -> Result<Catalog, DataLoadError> {
    let data: CatalogData = deserialize_file(path)?;
    let catalog = resolve_catalog(&data, path)?;
    tracing::debug!(file = %path.display(), buildings = catalog.len(), "loaded catalog");
    Ok(catalog)
}

fn resolve_catalog(data: &CatalogData, path: &Path) -> Result<Catalog, DataLoadError> {
    let mut builder = Catalog::builder();
    for building in &data.buildings {
        builder.register(resolve_definition(building, path)?);
    }
    if let Some(name) = &data.power_plant {
        builder.power_plant(resolve_name(name, path, "building")?);
    }
    builder.build().map_err(|source| DataLoadError::Catalog {
        file: path.to_path_buf(),
        source,
    })
}

fn resolve_definition(data: &BuildingData, path: &Path) -> Result<BuildingDef, DataLoadError> {
    let kind: BuildingKind = resolve_name(&data.name, path, "building")?;
    let mut def = BuildingDef::new(kind, data.tier);
    if data.power {
        def = def.powered();
    }
    for name in &data.deposits {
        def = def.extracts(resolve_name::<DepositKind>(name, path, "deposit")?);
    }
    if let Some(wonder) = data.wonder {
        def = def.wonder(match wonder {
            WonderData::World => WonderClass::World,
            WonderData::Natural => WonderClass::Natural,
        });
    }
    Ok(def)
}

// ===========================================================================
// Map
// ===========================================================================

/// Load a city map file.
pub fn load_map(path: &Path) -> Result<CityMap, DataLoadError> {
    let data: MapData = deserialize_file(path)?;
    let mut map = CityMap::new(data.size);
    for tile in &data.tiles {
        let point = Point::new(tile.x, tile.y);
        map.insert_tile(point, resolve_tile(tile, path)?)
            .map_err(|source| DataLoadError::Map {
                file: path.to_path_buf(),
                source,
            })?;
    }
    tracing::debug!(
        file = %path.display(),
        tiles = map.len(),
        buildings = map.building_count(),
        "loaded map"
    );
    Ok(map)
}

fn resolve_tile(data: &TileData, path: &Path) -> Result<Tile, DataLoadError> {
    let mut tile = Tile::new();
    tile.explored = data.explored;
    for name in &data.deposits {
        tile.deposits.insert(resolve_name(name, path, "deposit")?);
    }
    if let Some(building) = &data.building {
        tile.building = Some(resolve_building(building, path)?);
    }
    Ok(tile)
}

fn resolve_building(data: &BuildingStateData, path: &Path) -> Result<Building, DataLoadError> {
    let kind = resolve_name(&data.kind, path, "building")?;
    let desired = data.desired_level.unwrap_or(data.level);
    let mut building = Building::construct(kind, desired, PlacementStyle::Default);
    building.level = data.level;
    // Zero-level advance only recomputes the status.
    building.advance(0);
    if let Some(status) = data.status {
        building.status = status;
    }
    if let Some(v) = data.stockpile_capacity {
        building.stockpile_capacity = v;
    }
    if let Some(v) = data.stockpile_max {
        building.stockpile_max = v;
    }
    if let Some(v) = data.input_capacity {
        building.input_capacity = v;
    }
    Ok(building)
}

/// The on-disk form of a map.
pub fn map_data(map: &CityMap) -> MapData {
    MapData {
        size: map.codec().size(),
        tiles: map
            .iter()
            .map(|(point, tile)| TileData {
                x: point.x,
                y: point.y,
                explored: tile.explored,
                deposits: tile.deposits.iter().map(|d| d.name().to_string()).collect(),
                building: tile.building.as_ref().map(|b| BuildingStateData {
                    kind: b.kind.name().to_string(),
                    level: b.level,
                    desired_level: Some(b.desired_level),
                    status: Some(b.status),
                    stockpile_capacity: Some(b.stockpile_capacity),
                    stockpile_max: Some(b.stockpile_max),
                    input_capacity: Some(b.input_capacity),
                }),
            })
            .collect(),
    }
}

/// Write a map in the format implied by the file extension.
pub fn save_map(path: &Path, map: &CityMap) -> Result<(), DataLoadError> {
    serialize_file(path, &map_data(map))?;
    tracing::debug!(file = %path.display(), tiles = map.len(), "saved map");
    Ok(())
}
