use std::path::{Path, PathBuf};

use tilecity_data::deserialize_file;

use crate::error::PlanError;
use crate::manifest::{PlanEntry, PlanManifest, load_manifest};
use crate::schema::PlanData;

/// Read a single plan file.
pub fn load_plan(path: &Path) -> Result<PlanData, PlanError> {
    Ok(deserialize_file(path)?)
}

/// The plans of one plan directory, indexed by its manifest.
#[derive(Debug, Clone)]
pub struct PlanLibrary {
    plans_dir: PathBuf,
    manifest: PlanManifest,
}

impl PlanLibrary {
    /// Open a plan directory by loading its manifest.
    pub fn open(plans_dir: &Path) -> Result<Self, PlanError> {
        let manifest = load_manifest(plans_dir)?;
        tracing::debug!(dir = %plans_dir.display(), plans = manifest.plans.len(), "opened plan library");
        Ok(Self {
            plans_dir: plans_dir.to_path_buf(),
            manifest,
        })
    }

    pub fn title(&self) -> &str {
        &self.manifest.title
    }

    pub fn description(&self) -> &str {
        &self.manifest.description
    }

    /// All plan entries from the manifest.
    pub fn entries(&self) -> &[PlanEntry] {
        &self.manifest.plans
    }

    /// Entries carrying a tag.
    pub fn tagged(&self, tag: &str) -> Vec<&PlanEntry> {
        self.manifest
            .plans
            .iter()
            .filter(|e| e.tags.iter().any(|t| t == tag))
            .collect()
    }

    pub fn entry(&self, id: &str) -> Result<&PlanEntry, PlanError> {
        self.manifest
            .plans
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| PlanError::PlanNotFound { id: id.to_string() })
    }

    /// Load a plan by its manifest id.
    pub fn load(&self, id: &str) -> Result<PlanData, PlanError> {
        let entry = self.entry(id)?;
        load_plan(&self.plans_dir.join(&entry.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tilecity_data::DataLoadError;

    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "tilecity_plans_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    const MANIFEST: &str = r#"(
        title: "Test Plans",
        plans: [
            (id: "houses", title: "Houses", path: "houses.ron", tags: ["early"]),
            (id: "broken", title: "Broken", path: "broken.ron"),
            (id: "absent", title: "Absent", path: "absent.ron"),
        ],
    )"#;

    fn write_library(dir: &Path) {
        fs::write(dir.join("manifest.ron"), MANIFEST).unwrap();
        fs::write(
            dir.join("houses.ron"),
            r#"(name: "houses", steps: [Fill(area: Map, specs: [(building: "House", count: 4)])])"#,
        )
        .unwrap();
        fs::write(dir.join("broken.ron"), "(name: \"broken\", steps: [Teleport])").unwrap();
    }

    #[test]
    fn load_plan_by_id() {
        let dir = make_test_dir("load");
        write_library(&dir);

        let library = PlanLibrary::open(&dir).unwrap();
        assert_eq!(library.title(), "Test Plans");
        assert_eq!(library.entries().len(), 3);
        assert_eq!(library.tagged("early").len(), 1);

        let plan = library.load("houses").unwrap();
        assert_eq!(plan.name, "houses");
        assert_eq!(plan.steps.len(), 1);

        cleanup(&dir);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let dir = make_test_dir("not_found");
        write_library(&dir);

        let library = PlanLibrary::open(&dir).unwrap();
        assert!(matches!(
            library.load("lhc"),
            Err(PlanError::PlanNotFound { ref id }) if id == "lhc"
        ));

        cleanup(&dir);
    }

    #[test]
    fn malformed_plan_is_parse_error() {
        let dir = make_test_dir("malformed");
        write_library(&dir);

        let library = PlanLibrary::open(&dir).unwrap();
        let err = library.load("broken").unwrap_err();
        assert!(matches!(err, PlanError::Data(DataLoadError::Parse { .. })));
        assert!(err.to_string().contains("broken.ron"));

        assert!(matches!(
            library.load("absent"),
            Err(PlanError::Data(DataLoadError::Io(_)))
        ));

        cleanup(&dir);
    }

    #[test]
    fn missing_manifest_is_reported() {
        let dir = make_test_dir("no_manifest");

        assert!(matches!(
            PlanLibrary::open(&dir),
            Err(PlanError::Data(DataLoadError::MissingRequired { .. }))
        ));

        cleanup(&dir);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let dir = make_test_dir("dup");
        fs::write(
            dir.join("manifest.ron"),
            r#"(title: "Dup", plans: [(id: "a", title: "A", path: "a.ron"), (id: "a", title: "B", path: "b.ron")])"#,
        )
        .unwrap();

        assert!(matches!(
            PlanLibrary::open(&dir),
            Err(PlanError::DuplicatePlan { ref id }) if id == "a"
        ));

        cleanup(&dir);
    }
}
