pub mod client;

pub use client::ChatNarrator;
