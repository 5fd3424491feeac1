use crate::kind::{BuildingKind, DepositKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Which kind of wonder a building is. Wonders are never removed by region
/// operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WonderClass {
    World,
    Natural,
}

/// Static metadata for one building kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingDef {
    pub kind: BuildingKind,
    /// Placement ordering; lower tiers are placed first.
    pub tier: u32,
    /// Requires electrification (a power plant in the same region).
    pub power: bool,
    /// Deposits this building extracts. Non-empty means "extractor".
    pub deposits: Vec<DepositKind>,
    pub wonder: Option<WonderClass>,
}

impl BuildingDef {
    pub fn new(kind: BuildingKind, tier: u32) -> Self {
        Self {
            kind,
            tier,
            power: false,
            deposits: Vec::new(),
            wonder: None,
        }
    }

    pub fn powered(mut self) -> Self {
        self.power = true;
        self
    }

    pub fn extracts(mut self, deposit: DepositKind) -> Self {
        self.deposits.push(deposit);
        self
    }

    pub fn wonder(mut self, class: WonderClass) -> Self {
        self.wonder = Some(class);
        self
    }

    pub fn is_extractor(&self) -> bool {
        !self.deposits.is_empty()
    }
}

/// Errors raised while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("building '{0}' is defined twice")]
    DuplicateDefinition(BuildingKind),
    #[error("deposit '{deposit}' is extracted by both '{first}' and '{second}'")]
    DuplicateExtractor {
        deposit: DepositKind,
        first: BuildingKind,
        second: BuildingKind,
    },
    #[error("power plant '{0}' has no definition")]
    MissingPowerPlant(BuildingKind),
}

/// Builder for an immutable [`Catalog`].
/// Two-phase lifecycle: registration -> finalization.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    defs: Vec<BuildingDef>,
    power_plant: Option<BuildingKind>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase 1: register a building definition.
    pub fn register(&mut self, def: BuildingDef) -> &mut Self {
        self.defs.push(def);
        self
    }

    /// Phase 1: designate the building placed to satisfy power requirements.
    pub fn power_plant(&mut self, kind: BuildingKind) -> &mut Self {
        self.power_plant = Some(kind);
        self
    }

    /// Phase 2: validate and freeze.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut seen = BTreeSet::new();
        let mut extractors: BTreeMap<DepositKind, BuildingKind> = BTreeMap::new();

        for def in &self.defs {
            if !seen.insert(def.kind) {
                return Err(CatalogError::DuplicateDefinition(def.kind));
            }
            for &deposit in &def.deposits {
                if let Some(&first) = extractors.get(&deposit) {
                    return Err(CatalogError::DuplicateExtractor {
                        deposit,
                        first,
                        second: def.kind,
                    });
                }
                extractors.insert(deposit, def.kind);
            }
        }

        if let Some(plant) = self.power_plant {
            if !seen.contains(&plant) {
                return Err(CatalogError::MissingPowerPlant(plant));
            }
        }

        Ok(self.freeze())
    }

    /// Freeze without validation. Later definitions replace earlier ones.
    fn freeze(self) -> Catalog {
        let mut defs = BTreeMap::new();
        let mut extractors = BTreeMap::new();
        for def in self.defs {
            for &deposit in &def.deposits {
                extractors.insert(deposit, def.kind);
            }
            defs.insert(def.kind, def);
        }
        Catalog {
            defs,
            extractors,
            power_plant: self.power_plant,
        }
    }
}

/// Immutable building catalog. Frozen after [`CatalogBuilder::build`].
#[derive(Debug, Clone)]
pub struct Catalog {
    defs: BTreeMap<BuildingKind, BuildingDef>,
    extractors: BTreeMap<DepositKind, BuildingKind>,
    power_plant: Option<BuildingKind>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    pub fn definition(&self, kind: BuildingKind) -> Option<&BuildingDef> {
        self.defs.get(&kind)
    }

    pub fn tier(&self, kind: BuildingKind) -> Option<u32> {
        self.defs.get(&kind).map(|d| d.tier)
    }

    /// Unknown kinds do not require power.
    pub fn requires_power(&self, kind: BuildingKind) -> bool {
        self.defs.get(&kind).is_some_and(|d| d.power)
    }

    pub fn wonder_class(&self, kind: BuildingKind) -> Option<WonderClass> {
        self.defs.get(&kind).and_then(|d| d.wonder)
    }

    pub fn is_wonder(&self, kind: BuildingKind) -> bool {
        self.wonder_class(kind).is_some()
    }

    /// The extractor building that harvests `deposit`, if any.
    pub fn extractor_for(&self, deposit: DepositKind) -> Option<BuildingKind> {
        self.extractors.get(&deposit).copied()
    }

    /// The designated power-prerequisite building.
    pub fn power_plant(&self) -> Option<BuildingKind> {
        self.power_plant
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildingDef> {
        self.defs.values()
    }

    /// The built-in catalog covering every [`BuildingKind`].
    pub fn standard() -> Self {
        use BuildingKind::*;
        use DepositKind as D;

        let mut b = CatalogBuilder::new();
        let plain: &[(BuildingKind, u32)] = &[
            (Hut, 1),
            (WheatFarm, 1),
            (CattleRanch, 1),
            (PoultryFarm, 1),
            (House, 2),
            (Bakery, 2),
            (FlourMill, 2),
            (Brewery, 2),
            (Sawmill, 2),
            (Brickworks, 2),
            (IronForge, 2),
            (Apartment, 3),
            (SteelMill, 3),
            (PaperMaker, 3),
            (Library, 3),
            (Caravansary, 1),
            (Warehouse, 2),
            (Market, 2),
            (PrintingHouse, 4),
            (School, 4),
            (University, 5),
            (CoalPowerPlant, 5),
            (OilRefinery, 6),
        ];
        for &(kind, tier) in plain {
            b.register(BuildingDef::new(kind, tier));
        }

        let powered: &[(BuildingKind, u32)] = &[
            (Condo, 6),
            (CableFactory, 6),
            (LightBulbFactory, 6),
            (RadioFactory, 7),
            (SemiconductorFab, 8),
            (ComputerFactory, 8),
            (RobotFactory, 9),
        ];
        for &(kind, tier) in powered {
            b.register(BuildingDef::new(kind, tier).powered());
        }

        let extractors: &[(BuildingKind, u32, DepositKind)] = &[
            (Aqueduct, 1, D::Water),
            (LoggingCamp, 1, D::Wood),
            (StoneQuarry, 1, D::Stone),
            (CopperMiningCamp, 1, D::Copper),
            (IronMiningCamp, 1, D::Iron),
            (CoalMine, 4, D::Coal),
            (OilWell, 6, D::Oil),
            (NaturalGasWell, 7, D::NaturalGas),
            (UraniumMine, 8, D::Uranium),
            (AluminumSmelter, 7, D::Aluminum),
        ];
        for &(kind, tier, deposit) in extractors {
            b.register(BuildingDef::new(kind, tier).extracts(deposit));
        }
        b.register(BuildingDef::new(NuclearPowerPlant, 9).powered());

        for &(kind, tier) in &[
            (Colosseum, 2),
            (GreatWall, 2),
            (OxfordUniversity, 5),
            (EiffelTower, 6),
            (Atomium, 8),
            (LargeHadronCollider, 10),
        ] {
            b.register(BuildingDef::new(kind, tier).wonder(WonderClass::World));
        }
        for &kind in &[MountFuji, GrandCanyon, GreatBarrierReef] {
            b.register(BuildingDef::new(kind, 0).wonder(WonderClass::Natural));
        }

        b.power_plant(CoalPowerPlant);
        b.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_passes_validation() {
        let mut b = Catalog::builder();
        for def in Catalog::standard().iter() {
            b.register(def.clone());
        }
        b.power_plant(BuildingKind::CoalPowerPlant);
        assert!(b.build().is_ok());
    }

    #[test]
    fn standard_catalog_covers_every_kind() {
        let catalog = Catalog::standard();
        for &kind in BuildingKind::ALL {
            assert!(catalog.definition(kind).is_some(), "{kind} missing");
        }
        assert_eq!(catalog.len(), BuildingKind::ALL.len());
    }

    #[test]
    fn standard_catalog_maps_every_deposit() {
        let catalog = Catalog::standard();
        for &deposit in DepositKind::ALL {
            let extractor = catalog.extractor_for(deposit).unwrap();
            assert!(catalog.definition(extractor).unwrap().is_extractor());
        }
        assert_eq!(
            catalog.extractor_for(DepositKind::Stone),
            Some(BuildingKind::StoneQuarry)
        );
    }

    #[test]
    fn wonder_classification() {
        let catalog = Catalog::standard();
        assert_eq!(
            catalog.wonder_class(BuildingKind::Atomium),
            Some(WonderClass::World)
        );
        assert_eq!(
            catalog.wonder_class(BuildingKind::MountFuji),
            Some(WonderClass::Natural)
        );
        assert!(!catalog.is_wonder(BuildingKind::House));
    }

    #[test]
    fn power_plant_is_designated_and_unpowered() {
        let catalog = Catalog::standard();
        let plant = catalog.power_plant().unwrap();
        assert_eq!(plant, BuildingKind::CoalPowerPlant);
        assert!(!catalog.requires_power(plant));
        assert!(catalog.requires_power(BuildingKind::CableFactory));
    }

    #[test]
    fn unknown_kind_lookups_are_none() {
        let mut b = CatalogBuilder::new();
        b.register(BuildingDef::new(BuildingKind::House, 1));
        let catalog = b.build().unwrap();

        assert!(catalog.definition(BuildingKind::WheatFarm).is_none());
        assert_eq!(catalog.tier(BuildingKind::WheatFarm), None);
        assert!(!catalog.requires_power(BuildingKind::WheatFarm));
        assert!(!catalog.is_wonder(BuildingKind::WheatFarm));
        assert_eq!(catalog.power_plant(), None);
    }

    #[test]
    fn duplicate_definition_rejected() {
        let mut b = CatalogBuilder::new();
        b.register(BuildingDef::new(BuildingKind::House, 1));
        b.register(BuildingDef::new(BuildingKind::House, 2));
        assert_eq!(
            b.build().unwrap_err(),
            CatalogError::DuplicateDefinition(BuildingKind::House)
        );
    }

    #[test]
    fn duplicate_extractor_rejected() {
        let mut b = CatalogBuilder::new();
        b.register(BuildingDef::new(BuildingKind::StoneQuarry, 1).extracts(DepositKind::Stone));
        b.register(BuildingDef::new(BuildingKind::Brickworks, 1).extracts(DepositKind::Stone));
        assert!(matches!(
            b.build(),
            Err(CatalogError::DuplicateExtractor {
                deposit: DepositKind::Stone,
                first: BuildingKind::StoneQuarry,
                second: BuildingKind::Brickworks,
            })
        ));
    }

    #[test]
    fn missing_power_plant_rejected() {
        let mut b = CatalogBuilder::new();
        b.register(BuildingDef::new(BuildingKind::House, 1));
        b.power_plant(BuildingKind::CoalPowerPlant);
        assert_eq!(
            b.build().unwrap_err(),
            CatalogError::MissingPowerPlant(BuildingKind::CoalPowerPlant)
        );
    }
}
