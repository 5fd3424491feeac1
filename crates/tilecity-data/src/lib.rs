pub mod config;
pub mod content;
pub mod loader;
pub mod schema;

pub use config::{EditorConfig, load_config};
pub use content::{load_catalog, load_map, map_data, save_map};
pub use loader::{DataLoadError, Format, deserialize_file, serialize_file};
