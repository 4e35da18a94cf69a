// src/error.rs
use std::io;

use chrono::NaiveDate;
use thiserror::Error;

/// Rejections raised while flattening archive payloads into rows.
///
/// Every variant carries enough context (matchday, offending raw text) to
/// locate the bad record in the upstream payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The event description did not split into exactly two team names.
    #[error("matchday {matchday}: malformed event description {raw:?}")]
    MalformedEvent { matchday: u32, raw: String },

    /// `dataPrimoEvento` is missing or not a recognizable date/time.
    #[error("matchday {matchday}: invalid timestamp {raw}")]
    InvalidTimestamp { matchday: u32, raw: String },

    /// `giornata` is missing, non-integral, or below 1.
    #[error("invalid matchday number {raw} (first event at {first_event})")]
    InvalidMatchday { raw: String, first_event: String },

    /// An outcome result without a usable `risultato` label.
    #[error("matchday {matchday}, event {fixture:?}: invalid outcome label {raw}")]
    InvalidOutcome {
        matchday: u32,
        fixture: String,
        raw: String,
    },
}

impl ExtractError {
    /// Matchday the rejection belongs to, when it could be read.
    pub fn matchday(&self) -> Option<u32> {
        match self {
            ExtractError::MalformedEvent { matchday, .. }
            | ExtractError::InvalidTimestamp { matchday, .. }
            | ExtractError::InvalidOutcome { matchday, .. } => Some(*matchday),
            ExtractError::InvalidMatchday { .. } => None,
        }
    }
}

/// Structural problems with the row sequence handed to the segmenter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("rows are not sorted by timestamp (row {index} is earlier than row {})", .index - 1)]
    Unsorted { index: usize },

    #[error("row {index}: matchday {matchday} is below the first matchday {first}")]
    InvalidMatchday { index: usize, matchday: u32, first: u32 },

    #[error("cycle length must be at least 1")]
    InvalidCycleLength,
}

/// Failures of the fetch collaborator. These never reach the core:
/// the collector logs them and skips the day.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {day} failed: {source}")]
    Http {
        day: NaiveDate,
        #[source]
        source: reqwest::Error,
    },

    #[error("payload for {day} is not a matchday list: {source}")]
    Payload {
        day: NaiveDate,
        #[source]
        source: serde_json::Error,
    },

    #[error("no payload for {day}")]
    Missing { day: NaiveDate },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Crate-level error for the runner and export paths.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Segment(#[from] SegmentError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid option: {0}")]
    InvalidOption(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
