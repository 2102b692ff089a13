//! Data module - launch records loading and querying

pub mod loader;
mod processor;

pub use loader::{LaunchDataset, LoaderError};
pub use processor::{LaunchProcessor, LaunchRow};
