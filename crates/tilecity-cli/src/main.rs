//! `tilecity` -- run region edits and plans against map files.

mod args;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tilecity_core::{Catalog, CityMap, LevelStepper, RefreshHub};
use tilecity_data::{EditorConfig, load_catalog, load_config, load_map, save_map};
use tilecity_plans::{PlanLibrary, PlanRunner};
use tilecity_region::{Pacing, Region, RegionEditor, Strip};

use crate::args::{AreaArg, Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let map_path = match &cli.command {
        Command::Plans { library, tag } => return list_plans(library, tag.as_deref()),
        Command::Run { map, .. }
        | Command::Clear { map, .. }
        | Command::Fill { map, .. }
        | Command::Mines { map, .. } => map.clone(),
    };

    let catalog = match &cli.catalog {
        Some(path) => load_catalog(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::standard(),
    };
    let config = match &cli.config {
        Some(path) => {
            load_config(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => EditorConfig::default(),
    };
    let mut map =
        load_map(&map_path).with_context(|| format!("loading map {}", map_path.display()))?;
    let mut hub = RefreshHub::new();

    let line = execute(&cli.command, &mut map, &catalog, &mut hub, config).await?;
    println!("{line}");

    match &cli.out {
        Some(out) => {
            save_map(out, &map).with_context(|| format!("saving map {}", out.display()))?;
            info!(file = %out.display(), "map written");
        }
        None => info!("dry run; pass --out to keep the result"),
    }
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn execute(
    command: &Command,
    map: &mut CityMap,
    catalog: &Catalog,
    hub: &mut RefreshHub,
    config: EditorConfig,
) -> Result<String> {
    let options = config.editor_options();
    let line = match command {
        Command::Run { library, plan, .. } => {
            let library = PlanLibrary::open(library)
                .with_context(|| format!("opening plan library {}", library.display()))?;
            let plan = library.load(plan)?;
            let mut driver = LevelStepper::default();
            let report = PlanRunner::new(map, catalog, hub, &mut driver)
                .with_config(config)
                .run(&plan)
                .await;
            report.summary
        }
        Command::Clear { area, .. } => {
            let mut editor = RegionEditor::new(map, catalog, hub).with_options(options);
            let report = match resolve(*area, editor.map()) {
                Target::Region(region) => editor.clear_region(region),
                Target::Strip(strip) => editor.clear_strip(strip),
            };
            match report.message {
                Some(message) => message,
                None => format!(
                    "cleared {} buildings ({} wonders and {} extractors kept, {} passes)",
                    report.cleared, report.preserved_wonders, report.preserved_mines, report.passes
                ),
            }
        }
        Command::Fill {
            area,
            specs,
            interval_ms,
            ..
        } => {
            let pacing = match interval_ms {
                Some(0) => None,
                Some(ms) => Some(Pacing::from_millis(*ms)),
                None => config.pacing(),
            };
            let mut editor = RegionEditor::new(map, catalog, hub).with_options(options);
            let target = resolve(*area, editor.map());
            let paced = pacing.and_then(|p| Some((target.region(editor.map())?, p)));
            let report = match (paced, target) {
                (Some((region, pacing)), _) => {
                    editor.place_in_region_paced(region, specs, &pacing).await
                }
                (None, Target::Region(region)) => editor.place_in_region(region, specs),
                (None, Target::Strip(strip)) => editor.place_in_strip(strip, specs),
            };
            let mut line = format!(
                "placed {} of {} buildings",
                report.total_placed(),
                report.total_requested()
            );
            if let Some(point) = report.power_plant {
                line.push_str(&format!(", power plant at {point}"));
            }
            if let Some(message) = report.message {
                line.push_str(&format!(" ({message})"));
            }
            line
        }
        Command::Mines {
            building,
            quantity,
            level,
            ..
        } => {
            let report = RegionEditor::new(map, catalog, hub)
                .with_options(options)
                .place_extractors(*building, *level, *quantity);
            match report.message {
                Some(message) => message,
                None => format!(
                    "placed {} of {} {} ({} candidate tiles)",
                    report.placed, report.requested, report.kind, report.candidates
                ),
            }
        }
        Command::Plans { .. } => anyhow::bail!("listing plans does not edit a map"),
    };
    Ok(line)
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Region(Region),
    Strip(Strip),
}

impl Target {
    /// The rectangle this target covers on `map`, if any of it lies there.
    fn region(self, map: &CityMap) -> Option<Region> {
        match self {
            Target::Region(region) => (!region.is_empty()).then_some(region),
            Target::Strip(strip) => strip.resolve(map.observed_bounds()?),
        }
    }
}

fn resolve(area: AreaArg, map: &CityMap) -> Target {
    match area {
        AreaArg::Region(region) => Target::Region(region),
        AreaArg::Strip(strip) => Target::Strip(strip),
        AreaArg::Map => Target::Region(match map.observed_bounds() {
            Some(b) => Region::new(b.min_x, b.max_x, b.min_y, b.max_y),
            None => Region::new(0, -1, 0, -1),
        }),
    }
}

fn list_plans(dir: &Path, tag: Option<&str>) -> Result<()> {
    let library = PlanLibrary::open(dir)
        .with_context(|| format!("opening plan library {}", dir.display()))?;
    println!("{}", library.title());
    if !library.description().is_empty() {
        println!("{}", library.description());
    }
    let entries = match tag {
        Some(tag) => library.tagged(tag),
        None => library.entries().iter().collect(),
    };
    for entry in entries {
        println!("  {:<24} {}", entry.id, entry.title);
        if !entry.summary.is_empty() {
            println!("  {:<24} {}", "", entry.summary);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use tilecity_core::BuildingKind;
    use tilecity_core::test_utils::*;
    use tilecity_region::{PlacementSpec, Side};
    use tokio::time::Instant;

    fn fill(area: AreaArg, count: usize, interval_ms: Option<u64>) -> Command {
        Command::Fill {
            map: PathBuf::from("unused.ron"),
            area,
            specs: vec![PlacementSpec::new(BuildingKind::Hut, count)],
            interval_ms,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn strip_fill_honors_interval() {
        let mut map = empty_map(3, 3);
        let catalog = catalog();
        let mut hub = RefreshHub::new();
        let strip = AreaArg::Strip(Strip::new(Side::Left, 1, 0));

        let start = Instant::now();
        let command = fill(strip, 3, Some(100));
        let line = execute(&command, &mut map, &catalog, &mut hub, EditorConfig::default())
            .await
            .unwrap();

        assert_eq!(line, "placed 3 of 3 buildings");
        assert!(start.elapsed() >= Duration::from_millis(200));
        assert_eq!(map.count_kind(BuildingKind::Hut), 3);
        assert!((0..3).all(|y| map.building_at(p(0, y)).is_some()));
    }

    #[tokio::test(start_paused = true)]
    async fn configured_pacing_used_when_no_interval_given() {
        let mut map = empty_map(2, 1);
        let catalog = catalog();
        let mut hub = RefreshHub::new();
        let config = EditorConfig {
            pacing_interval_ms: 50,
            ..EditorConfig::default()
        };

        let start = Instant::now();
        execute(&fill(AreaArg::Map, 2, None), &mut map, &catalog, &mut hub, config)
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn strip_outside_map_keeps_message() {
        let mut map = empty_map(2, 2);
        let catalog = catalog();
        let mut hub = RefreshHub::new();
        let strip = AreaArg::Strip(Strip::new(Side::Right, 1, 10));

        let command = fill(strip, 1, Some(100));
        let line = execute(&command, &mut map, &catalog, &mut hub, EditorConfig::default())
            .await
            .unwrap();

        assert!(line.contains("outside the map"), "{line}");
    }
}
