//! Closed enums for building and deposit kinds.
//!
//! Kinds are parsed from text exactly once, at the data boundary. Everything
//! past that point works with the enum, so a misspelled building name can
//! never reach a region operation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! closed_kind {
    (
        $(#[$meta:meta])*
        $name:ident, $error:ident, $label:literal { $($variant:ident),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// The canonical name used in data files.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        #[doc = concat!("Returned when text does not name a known ", $label, ".")]
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $error(pub String);

        impl fmt::Display for $error {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "unknown {} '{}'", $label, self.0)
            }
        }

        impl std::error::Error for $error {}

        impl FromStr for $name {
            type Err = $error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|k| k.name() == s)
                    .ok_or_else(|| $error(s.to_string()))
            }
        }
    };
}

closed_kind! {
    /// Every building the editor knows how to place or clear.
    BuildingKind, UnknownBuildingKind, "building kind" {
        // Housing
        Hut,
        House,
        Apartment,
        Condo,
        // Food and basic goods
        WheatFarm,
        CattleRanch,
        PoultryFarm,
        Bakery,
        Brewery,
        FlourMill,
        // Extractors
        Aqueduct,
        LoggingCamp,
        StoneQuarry,
        CopperMiningCamp,
        IronMiningCamp,
        CoalMine,
        OilWell,
        NaturalGasWell,
        UraniumMine,
        AluminumSmelter,
        // Processing
        Sawmill,
        Brickworks,
        IronForge,
        SteelMill,
        PaperMaker,
        PrintingHouse,
        Library,
        School,
        University,
        CoalPowerPlant,
        OilRefinery,
        CableFactory,
        LightBulbFactory,
        RadioFactory,
        SemiconductorFab,
        ComputerFactory,
        RobotFactory,
        NuclearPowerPlant,
        // Logistics
        Warehouse,
        Caravansary,
        Market,
        // World wonders
        Colosseum,
        GreatWall,
        EiffelTower,
        OxfordUniversity,
        Atomium,
        LargeHadronCollider,
        // Natural wonders
        MountFuji,
        GrandCanyon,
        GreatBarrierReef,
    }
}

closed_kind! {
    /// A natural resource deposit a tile can carry.
    DepositKind, UnknownDepositKind, "deposit kind" {
        Water,
        Wood,
        Stone,
        Copper,
        Iron,
        Coal,
        Oil,
        NaturalGas,
        Uranium,
        Aluminum,
    }
}
