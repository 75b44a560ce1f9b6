pub mod dilation;
pub mod engine;

pub use crate::domain::model::{
    DepartureContext, DilationResult, EarthElapsed, NarrativeStyle, TravelParameters, VoyageReport,
};
pub use crate::domain::ports::{Narrator, NarrativeConfig};
pub use crate::utils::error::Result;
