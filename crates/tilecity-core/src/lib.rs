//! Tilecity Core -- the shared tile-grid model for the city editor.
//!
//! This crate holds the data every region operation works against: the
//! packed tile coordinate codec, tiles and the buildings standing on them,
//! the immutable building catalog, and the hooks used to tell the rest of
//! the game that the grid changed.
//!
//! # Key Types
//!
//! - [`coord::TileCodec`] -- converts between [`coord::Point`] and the
//!   packed [`coord::TileKey`].
//! - [`map::CityMap`] -- sparse key -> [`map::Tile`] collection. Region
//!   operations receive it explicitly; there is no global game state.
//! - [`building::Building`] -- a placed building and its construction state.
//! - [`catalog::Catalog`] -- per-kind static metadata (tier, power,
//!   deposits, wonder class), frozen at startup.
//! - [`refresh::RefreshHub`] -- cache invalidation plus the two-phase
//!   (immediate / next frame) refresh notification.
//! - [`construction::ConstructionDriver`] -- seam to the external
//!   construction system.

pub mod building;
pub mod catalog;
pub mod construction;
pub mod coord;
pub mod kind;
pub mod map;
pub mod refresh;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use building::{Building, BuildingStatus, PlacementStyle};
pub use catalog::{BuildingDef, Catalog, CatalogBuilder, CatalogError, WonderClass};
pub use construction::{ConstructionDriver, LevelStepper};
pub use coord::{Point, TileCodec, TileKey};
pub use kind::{BuildingKind, DepositKind, UnknownBuildingKind, UnknownDepositKind};
pub use map::{CityMap, MapBounds, MapError, Tile};
pub use refresh::{GridObserver, ObserverError, RefreshHub, RefreshPhase, RefreshStats};
