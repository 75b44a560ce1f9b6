pub mod config;
pub mod core;
pub mod domain;
pub mod narrative;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::plan::PlanConfig;

pub use core::engine::VoyageEngine;
pub use domain::model::{
    DepartureContext, DilationResult, NarrativeStyle, TravelParameters, VoyageReport,
};
pub use narrative::ChatNarrator;
pub use utils::error::{Result, VoyageError};
