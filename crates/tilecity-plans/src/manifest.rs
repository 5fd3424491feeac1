use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use tilecity_data::deserialize_file;
use tilecity_data::loader::require_data_file;

use crate::error::PlanError;

/// Top-level manifest listing the plans in a plan directory.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanManifest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub plans: Vec<PlanEntry>,
}

/// An entry in the manifest pointing to a plan file.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Relative path from the plan directory to the plan file.
    pub path: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Load the manifest (`manifest.ron`, `.toml` or `.json`) from a plan
/// directory.
pub fn load_manifest(plans_dir: &Path) -> Result<PlanManifest, PlanError> {
    let path = require_data_file(plans_dir, "manifest")?;
    let manifest: PlanManifest = deserialize_file(&path)?;

    let mut seen = HashSet::new();
    for entry in &manifest.plans {
        if !seen.insert(entry.id.as_str()) {
            return Err(PlanError::DuplicatePlan {
                id: entry.id.clone(),
            });
        }
    }
    Ok(manifest)
}
