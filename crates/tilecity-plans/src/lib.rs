//! Named milestone plans built from region operations.
//!
//! A plan is a data file listing clear, fill, extractor and
//! wait-for-construction steps. Plans are grouped by a manifest in a plan
//! directory and executed by an async [`PlanRunner`] that returns a
//! one-line summary suitable for a toast notification.
//!
//! # Usage
//!
//! ```rust,ignore
//! let library = PlanLibrary::open(Path::new("plans/"))?;
//! let plan = library.load("initial_mines")?;
//! let mut runner = PlanRunner::new(&mut map, &catalog, &mut hub, &mut driver);
//! let report = runner.run(&plan).await;
//! println!("{}", report.summary);
//! ```

pub mod error;
pub mod library;
pub mod manifest;
pub mod runner;
pub mod schema;

pub use error::PlanError;
pub use library::{PlanLibrary, load_plan};
pub use manifest::{PlanEntry, PlanManifest, load_manifest};
pub use runner::{PlanReport, PlanRunner, StepReport, WaitReport};
pub use schema::{AreaData, PlanData, SpecData, StepData};
