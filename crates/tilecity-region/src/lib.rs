//! Region editing for the tile grid: bulk clear, tier-ordered fill, and
//! extractor placement.
//!
//! All operations go through a [`RegionEditor`], which borrows the map, the
//! catalog and the refresh hub for the duration of the edit. Operations never
//! fail; soft conditions (empty map, unknown building, no space) come back in
//! the report.
//!
//! ```rust,ignore
//! let mut editor = RegionEditor::new(&mut map, &catalog, &mut hub);
//! let cleared = editor.clear_region(Region::new(0, 9, 0, 9));
//! let filled = editor.place_in_region(
//!     Region::new(0, 9, 0, 9),
//!     &[PlacementSpec::new(BuildingKind::House, 20)],
//! );
//! ```

pub mod clear;
pub mod editor;
pub mod extract;
pub mod fill;
pub mod pacing;
pub mod protect;
pub mod region;

pub use clear::ClearReport;
pub use editor::{EditorOptions, MAX_CLEAR_PASSES, NO_TILES_MESSAGE, RegionEditor};
pub use extract::ExtractorReport;
pub use fill::{FillReport, Placement, PlacementResult, PlacementSpec};
pub use pacing::{CancelToken, Pacing};
pub use protect::{ExtractorProtection, Occupancy, classify};
pub use region::{Region, Side, Strip};
