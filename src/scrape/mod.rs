// src/scrape/mod.rs
mod collect;
mod extract;

pub use collect::{Collected, DayFailure, collect_matchdays, load_payload_files, lookback_days};
pub use extract::{Extraction, extract};
