//! The sample data shipped in `data/` loads cleanly.

use std::path::{Path, PathBuf};

use tilecity_core::{BuildingKind, Catalog, WonderClass};
use tilecity_data::{EditorConfig, load_catalog, load_config, load_map};

fn data_path(file: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data").join(file)
}

#[test]
fn bundled_catalog_matches_standard() {
    let loaded = load_catalog(&data_path("catalog.ron")).unwrap();
    let standard = Catalog::standard();

    assert_eq!(loaded.len(), standard.len());
    assert_eq!(loaded.power_plant(), standard.power_plant());
    for &kind in BuildingKind::ALL {
        assert_eq!(loaded.tier(kind), standard.tier(kind), "{kind}");
        assert_eq!(loaded.requires_power(kind), standard.requires_power(kind), "{kind}");
        assert_eq!(loaded.wonder_class(kind), standard.wonder_class(kind), "{kind}");
    }
}

#[test]
fn bundled_map_loads() {
    let map = load_map(&data_path("map.ron")).unwrap();

    assert_eq!(map.len(), 160);
    assert_eq!(map.count_kind(BuildingKind::House), 8);
    assert_eq!(map.count_kind(BuildingKind::CoalPowerPlant), 2);

    let wonders = map
        .iter()
        .filter_map(|(_, t)| t.building_kind())
        .filter(|&k| Catalog::standard().wonder_class(k).is_some())
        .count();
    assert_eq!(wonders, 2);
    assert_eq!(
        Catalog::standard().wonder_class(BuildingKind::MountFuji),
        Some(WonderClass::Natural)
    );

    let bounds = map.observed_bounds().unwrap();
    assert_eq!((bounds.width(), bounds.height()), (16, 10));
    assert!(!map.tile(tilecity_core::Point::new(0, 9)).unwrap().explored);
}

#[test]
fn bundled_editor_config_loads() {
    let config = load_config(&data_path("editor.toml")).unwrap();
    assert_eq!(config.max_clear_passes, 2);
    assert_eq!(EditorConfig { max_clear_passes: 1, ..config }, EditorConfig::default());
}
