//! Editor configuration file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use tilecity_core::PlacementStyle;
use tilecity_region::{EditorOptions, ExtractorProtection, MAX_CLEAR_PASSES, Pacing};

use crate::loader::{DataLoadError, deserialize_file};

/// Tunables for region operations and plan runs. Every field is optional in
/// the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub max_clear_passes: u32,
    pub protection: ExtractorProtection,
    pub default_target_level: u16,
    pub power_plant_level: u16,
    pub placement_style: PlacementStyle,
    pub require_explored: bool,
    /// Delay between placements in paced fills. 0 disables pacing.
    pub pacing_interval_ms: u64,
    /// Upper bound on a plan's wait-for-construction step.
    pub wait_max_ms: u64,
    pub wait_poll_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_clear_passes: 1,
            protection: ExtractorProtection::default(),
            default_target_level: 1,
            power_plant_level: 1,
            placement_style: PlacementStyle::Default,
            require_explored: false,
            pacing_interval_ms: 0,
            wait_max_ms: 30_000,
            wait_poll_ms: 250,
        }
    }
}

impl EditorConfig {
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            max_clear_passes: self.max_clear_passes.clamp(1, MAX_CLEAR_PASSES),
            protection: self.protection,
            default_target_level: self.default_target_level,
            power_plant_level: self.power_plant_level,
            style: self.placement_style,
            require_explored: self.require_explored,
        }
    }

    pub fn pacing_interval(&self) -> Duration {
        Duration::from_millis(self.pacing_interval_ms)
    }

    /// Pacing for fills, or `None` when fills run unpaced.
    pub fn pacing(&self) -> Option<Pacing> {
        (self.pacing_interval_ms > 0).then(|| Pacing::new(self.pacing_interval()))
    }

    pub fn wait_max(&self) -> Duration {
        Duration::from_millis(self.wait_max_ms)
    }

    pub fn wait_poll(&self) -> Duration {
        Duration::from_millis(self.wait_poll_ms.max(1))
    }
}

/// Load an editor configuration file.
pub fn load_config(path: &Path) -> Result<EditorConfig, DataLoadError> {
    let config: EditorConfig = deserialize_file(path)?;
    if config.max_clear_passes > MAX_CLEAR_PASSES {
        tracing::warn!(
            requested = config.max_clear_passes,
            cap = MAX_CLEAR_PASSES,
            "max_clear_passes above cap; clamping"
        );
    }
    Ok(config)
}
