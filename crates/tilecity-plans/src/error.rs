use tilecity_data::DataLoadError;

/// Errors that can occur while loading plans.
///
/// Running a plan never fails; soft conditions end up in the step reports.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The requested plan was not found in the manifest.
    #[error("plan '{id}' not found in manifest")]
    PlanNotFound { id: String },

    /// Two manifest entries share an id.
    #[error("plan id '{id}' is listed twice in the manifest")]
    DuplicatePlan { id: String },

    /// A manifest or plan file could not be read or parsed.
    #[error(transparent)]
    Data(#[from] DataLoadError),
}
