#[cfg(feature = "cli")]
pub mod cli;
pub mod plan;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
