// src/lib.rs

#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod csv;
pub mod data;
pub mod file;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod segment;
pub mod stats;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, ExtractError, FetchError, SegmentError};
pub use data::Row;
pub use segment::{Cohort, Completeness, Segmentation};
