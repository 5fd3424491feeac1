//! Command line arguments and the small value parsers behind them.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tilecity_core::BuildingKind;
use tilecity_region::{PlacementSpec, Region, Side, Strip};

#[derive(Debug, Parser)]
#[command(name = "tilecity", version, about = "Region clear, fill and extractor tools for tilecity maps")]
pub struct Cli {
    /// Building catalog file. The built-in catalog is used when omitted.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Editor configuration file (.toml, .ron or .json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write the edited map here. Without it the edit is a dry run.
    #[arg(long, global = true)]
    pub out: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a plan from a plan library against a map
    Run {
        #[arg(long)]
        map: PathBuf,
        /// Plan directory holding a manifest
        #[arg(long, default_value = "plans")]
        library: PathBuf,
        /// Plan id from the manifest
        #[arg(long)]
        plan: String,
    },
    /// Remove unprotected buildings from an area
    Clear {
        #[arg(long)]
        map: PathBuf,
        /// `map`, `rect:MIN_X,MAX_X,MIN_Y,MAX_Y` or `left|right:WIDTH[:START_ROW]`
        #[arg(long, default_value = "map", value_parser = parse_area)]
        area: AreaArg,
    },
    /// Place buildings into the empty tiles of an area
    Fill {
        #[arg(long)]
        map: PathBuf,
        #[arg(long, default_value = "map", value_parser = parse_area)]
        area: AreaArg,
        /// `Kind=COUNT` or `Kind=COUNT@LEVEL`; repeatable
        #[arg(long = "spec", required = true, value_parser = parse_spec)]
        specs: Vec<PlacementSpec>,
        /// Milliseconds between placements
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Place extractors on matching deposits nearest the bottom-right corner
    Mines {
        #[arg(long)]
        map: PathBuf,
        #[arg(long, value_parser = parse_kind)]
        building: BuildingKind,
        #[arg(long, default_value_t = 1)]
        quantity: usize,
        #[arg(long, default_value_t = 1)]
        level: u16,
    },
    /// List the plans of a plan library
    Plans {
        #[arg(long, default_value = "plans")]
        library: PathBuf,
        /// Only plans carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },
}

/// Where a clear or fill applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaArg {
    Map,
    Region(Region),
    Strip(Strip),
}

pub fn parse_kind(s: &str) -> Result<BuildingKind, String> {
    s.parse::<BuildingKind>().map_err(|e| e.to_string())
}

fn parse_number<T: std::str::FromStr>(s: &str, what: &str) -> Result<T, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("invalid {what} '{s}'"))
}

pub fn parse_area(s: &str) -> Result<AreaArg, String> {
    if s == "map" {
        return Ok(AreaArg::Map);
    }
    let (head, rest) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid area '{s}'"))?;
    match head {
        "rect" => {
            let parts: Vec<i32> = rest
                .split(',')
                .map(|v| parse_number(v, "coordinate"))
                .collect::<Result<_, _>>()?;
            let [min_x, max_x, min_y, max_y] = parts[..] else {
                return Err(format!("rect needs four coordinates, got '{rest}'"));
            };
            Ok(AreaArg::Region(Region::new(min_x, max_x, min_y, max_y)))
        }
        "left" | "right" => {
            let side = if head == "left" { Side::Left } else { Side::Right };
            let (width, start_row) = match rest.split_once(':') {
                Some((w, row)) => (parse_number(w, "width")?, parse_number(row, "row")?),
                None => (parse_number(rest, "width")?, 0),
            };
            Ok(AreaArg::Strip(Strip::new(side, width, start_row)))
        }
        other => Err(format!("unknown area kind '{other}'")),
    }
}

pub fn parse_spec(s: &str) -> Result<PlacementSpec, String> {
    let (name, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected Kind=COUNT, got '{s}'"))?;
    let kind = parse_kind(name.trim())?;
    match amount.split_once('@') {
        Some((count, level)) => Ok(PlacementSpec::new(kind, parse_number(count, "count")?)
            .at_level(parse_number(level, "level")?)),
        None => Ok(PlacementSpec::new(kind, parse_number(amount, "count")?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn areas() {
        assert_eq!(parse_area("map"), Ok(AreaArg::Map));
        assert_eq!(
            parse_area("rect:0,5,1,3"),
            Ok(AreaArg::Region(Region::new(0, 5, 1, 3)))
        );
        assert_eq!(
            parse_area("right:4"),
            Ok(AreaArg::Strip(Strip::new(Side::Right, 4, 0)))
        );
        assert_eq!(
            parse_area("left:2:10"),
            Ok(AreaArg::Strip(Strip::new(Side::Left, 2, 10)))
        );
        assert!(parse_area("rect:0,5").is_err());
        assert!(parse_area("top:3").is_err());
        assert!(parse_area("left:wide").is_err());
    }

    #[test]
    fn specs() {
        assert_eq!(
            parse_spec("House=6"),
            Ok(PlacementSpec::new(BuildingKind::House, 6))
        );
        assert_eq!(
            parse_spec("WheatFarm=2@3"),
            Ok(PlacementSpec::new(BuildingKind::WheatFarm, 2).at_level(3))
        );
        assert!(parse_spec("Castle=1").unwrap_err().contains("Castle"));
        assert!(parse_spec("House").is_err());
    }

    #[test]
    fn parse_fill_command() {
        let cli = Cli::try_parse_from([
            "tilecity",
            "fill",
            "--map",
            "data/map.ron",
            "--spec",
            "House=3",
            "--spec",
            "Hut=1",
            "--out",
            "edited.ron",
        ])
        .unwrap();
        assert_eq!(cli.out, Some(PathBuf::from("edited.ron")));
        match cli.command {
            Command::Fill { specs, area, .. } => {
                assert_eq!(specs.len(), 2);
                assert_eq!(area, AreaArg::Map);
            }
            other => panic!("expected fill, got {other:?}"),
        }
    }
}
