use tilecity_core::{BuildingKind, Point, TileKey};

use crate::editor::{NO_TILES_MESSAGE, RegionEditor};

/// Outcome of an extractor placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorReport {
    pub kind: BuildingKind,
    pub requested: usize,
    pub placed: usize,
    /// Empty deposit tiles that were eligible before placement started.
    pub candidates: usize,
    pub message: Option<String>,
}

impl ExtractorReport {
    fn none(kind: BuildingKind, requested: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            requested,
            placed: 0,
            candidates: 0,
            message: Some(message.into()),
        }
    }
}

impl RegionEditor<'_> {
    /// Place up to `quantity` extractors of `kind` on empty tiles carrying a
    /// deposit it extracts, nearest to the bottom-right corner of the map
    /// first.
    pub fn place_extractors(
        &mut self,
        kind: BuildingKind,
        desired_level: u16,
        quantity: usize,
    ) -> ExtractorReport {
        let Some(bounds) = self.map.observed_bounds() else {
            return ExtractorReport::none(kind, quantity, NO_TILES_MESSAGE);
        };
        let Some(def) = self.catalog.definition(kind) else {
            tracing::warn!(%kind, "no definition for extractor");
            return ExtractorReport::none(kind, quantity, format!("unknown building '{kind}'"));
        };
        if def.deposits.is_empty() {
            return ExtractorReport::none(
                kind,
                quantity,
                format!("'{kind}' does not extract any deposit"),
            );
        }

        let corner = bounds.bottom_right();
        let require_explored = self.options.require_explored;
        let mut candidates: Vec<(u32, TileKey, Point)> = self
            .map
            .iter()
            .filter(|(_, tile)| {
                tile.building.is_none()
                    && (!require_explored || tile.explored)
                    && def.deposits.iter().any(|&d| tile.has_deposit(d))
            })
            .filter_map(|(point, _)| {
                let key = self.map.codec().encode(point)?;
                Some((point.manhattan_distance(&corner), key, point))
            })
            .collect();
        candidates.sort_unstable_by_key(|&(distance, key, _)| (distance, key));

        let mut report = ExtractorReport {
            kind,
            requested: quantity,
            placed: 0,
            candidates: candidates.len(),
            message: None,
        };
        for (_, _, point) in candidates {
            if report.placed >= quantity {
                break;
            }
            // place_at re-checks that the tile is still empty.
            if self.place_at(point, kind, desired_level) {
                report.placed += 1;
            }
        }

        if report.placed > 0 {
            self.hub.grid_changed();
        }
        tracing::debug!(
            %kind,
            placed = report.placed,
            requested = quantity,
            candidates = report.candidates,
            "placed extractors"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorOptions;
    use tilecity_core::test_utils::*;
    use tilecity_core::{CityMap, DepositKind, RefreshHub, Tile};

    #[test]
    fn nearest_to_bottom_right_first() {
        let mut map = layout(&["s...", "..s.", "...s"]);
        let catalog = catalog();
        let mut hub = RefreshHub::new();

        let report = RegionEditor::new(&mut map, &catalog, &mut hub).place_extractors(
            BuildingKind::StoneQuarry,
            2,
            2,
        );

        assert_eq!(report.placed, 2);
        assert_eq!(report.candidates, 3);
        assert!(map.building_at(p(3, 2)).is_some());
        assert!(map.building_at(p(2, 1)).is_some());
        assert!(map.building_at(p(0, 0)).is_none());
        let quarry = map.building_at(p(3, 2)).unwrap();
        assert_eq!(quarry.level, 0);
        assert_eq!(quarry.desired_level, 2);
    }

    #[test]
    fn occupied_and_wrong_deposit_tiles_are_skipped() {
        let mut map = layout(&["sQi", "iXs"]);
        let catalog = catalog();
        let mut hub = RefreshHub::new();
        let before = kinds(&map);

        let report = RegionEditor::new(&mut map, &catalog, &mut hub).place_extractors(
            BuildingKind::IronMiningCamp,
            1,
            10,
        );

        assert_eq!(report.candidates, 2);
        assert_eq!(report.placed, 2);
        assert_eq!(map.building_at(p(2, 0)).map(|b| b.kind), Some(BuildingKind::IronMiningCamp));
        assert_eq!(map.building_at(p(0, 1)).map(|b| b.kind), Some(BuildingKind::IronMiningCamp));
        assert_eq!(map.building_at(p(1, 1)).map(|b| b.kind), Some(BuildingKind::StoneQuarry));
        for ((_, old), (_, new)) in before.iter().zip(kinds(&map).iter()) {
            if old.is_some() {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn ties_break_by_tile_key() {
        // (1,0) and (0,1) are both distance 1 from (1,1).
        let mut map = layout(&[".s", "s."]);
        let catalog = catalog();
        let mut hub = RefreshHub::new();

        RegionEditor::new(&mut map, &catalog, &mut hub).place_extractors(
            BuildingKind::StoneQuarry,
            1,
            1,
        );

        // Keys pack x in the high bits, so (0, 1) sorts before (1, 0).
        assert!(map.building_at(p(0, 1)).is_some());
        assert!(map.building_at(p(1, 0)).is_none());
    }

    #[test]
    fn non_extractor_reports_message() {
        let mut map = layout(&["ss"]);
        let catalog = catalog();
        let mut hub = RefreshHub::new();

        let report =
            RegionEditor::new(&mut map, &catalog, &mut hub).place_extractors(BuildingKind::House, 1, 2);

        assert_eq!(report.placed, 0);
        assert!(report.message.unwrap().contains("does not extract"));
        assert_eq!(map.building_count(), 0);
        assert_eq!(hub.stats().changes, 0);
    }

    #[test]
    fn empty_map_reports_no_tiles() {
        let mut map = CityMap::new(8);
        let catalog = catalog();
        let mut hub = RefreshHub::new();

        let report = RegionEditor::new(&mut map, &catalog, &mut hub).place_extractors(
            BuildingKind::CoalMine,
            1,
            3,
        );

        assert_eq!(report.message.as_deref(), Some(NO_TILES_MESSAGE));
        assert_eq!(report.requested, 3);
    }

    #[test]
    fn require_explored_filters_candidates() {
        let mut map = CityMap::new(8);
        map.insert_tile(p(0, 0), Tile::new().with_deposit(DepositKind::Coal).explored())
            .unwrap();
        map.insert_tile(p(1, 0), Tile::new().with_deposit(DepositKind::Coal))
            .unwrap();
        let catalog = catalog();
        let mut hub = RefreshHub::new();
        let options = EditorOptions {
            require_explored: true,
            ..EditorOptions::default()
        };

        let report = RegionEditor::new(&mut map, &catalog, &mut hub)
            .with_options(options)
            .place_extractors(BuildingKind::CoalMine, 1, 2);

        assert_eq!(report.candidates, 1);
        assert_eq!(report.placed, 1);
        assert!(map.building_at(p(0, 0)).is_some());
    }

    #[test]
    fn placement_refreshes_once() {
        let mut map = layout(&["sss"]);
        let catalog = catalog();
        let observer = RecordingObserver::new();
        let mut hub = RefreshHub::new();
        hub.subscribe(Box::new(observer.clone()));

        RegionEditor::new(&mut map, &catalog, &mut hub).place_extractors(
            BuildingKind::StoneQuarry,
            1,
            3,
        );

        assert_eq!(observer.invalidations(), 1);
    }
}
