//! Criterion benchmarks for region operations.
//!
//! - `fill`: tier-ordered fill of a 64x64 map with a mixed spec list
//! - `clear`: clearing a fully built 64x64 map with scattered wonders
//! - `extractors`: nearest-corner extractor placement over a deposit field

use criterion::{Criterion, criterion_group, criterion_main};
use tilecity_core::test_utils::*;
use tilecity_core::{BuildingKind, CityMap, DepositKind, RefreshHub};
use tilecity_region::{PlacementSpec, Region, RegionEditor};

const SIZE: u32 = 64;

fn full_region() -> Region {
    Region::new(0, SIZE as i32 - 1, 0, SIZE as i32 - 1)
}

fn specs() -> Vec<PlacementSpec> {
    vec![
        PlacementSpec::new(BuildingKind::RobotFactory, 200),
        PlacementSpec::new(BuildingKind::House, 1500),
        PlacementSpec::new(BuildingKind::SteelMill, 500),
        PlacementSpec::new(BuildingKind::Hut, 1000),
    ]
}

/// Every tile built, with a wonder on every 97th tile.
fn built_map() -> CityMap {
    let mut map = empty_map(SIZE, SIZE);
    for (i, point) in full_region().points().enumerate() {
        let kind = if i % 97 == 0 {
            BuildingKind::Colosseum
        } else {
            BuildingKind::WheatFarm
        };
        put(&mut map, point, kind);
    }
    map
}

/// Coal on every third tile.
fn deposit_map() -> CityMap {
    let mut map = empty_map(SIZE, SIZE);
    for (i, point) in full_region().points().enumerate() {
        if i % 3 == 0 {
            deposit(&mut map, point, DepositKind::Coal);
        }
    }
    map
}

fn bench_fill(c: &mut Criterion) {
    let catalog = catalog();
    let specs = specs();
    c.bench_function("fill_64x64_mixed", |b| {
        b.iter_batched(
            || (empty_map(SIZE, SIZE), RefreshHub::new()),
            |(mut map, mut hub)| {
                RegionEditor::new(&mut map, &catalog, &mut hub).place_in_region(full_region(), &specs)
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_clear(c: &mut Criterion) {
    let catalog = catalog();
    c.bench_function("clear_64x64_built", |b| {
        b.iter_batched(
            || (built_map(), RefreshHub::new()),
            |(mut map, mut hub)| {
                RegionEditor::new(&mut map, &catalog, &mut hub).clear_region(full_region())
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_extractors(c: &mut Criterion) {
    let catalog = catalog();
    c.bench_function("extractors_64x64_coal", |b| {
        b.iter_batched(
            || (deposit_map(), RefreshHub::new()),
            |(mut map, mut hub)| {
                RegionEditor::new(&mut map, &catalog, &mut hub).place_extractors(
                    BuildingKind::CoalMine,
                    1,
                    100,
                )
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_fill, bench_clear, bench_extractors);
criterion_main!(benches);
