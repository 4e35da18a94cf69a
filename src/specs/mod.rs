//! # Payload “specs” module
//!
//! This module hosts the **endpoint-specific payload specifications**.
//! Each submodule focuses on a single endpoint and encodes *where the ground truth
//! lives in the JSON* and *how to read it defensively*.
//!
//! ## What lives here
//! - **Serde shapes** for remote payloads (the archive day: matchdays → provider
//!   map → betting models → events → outcome results).
//! - **Coercion helpers** for loosely typed scalars: matchday numbers that arrive
//!   as integers, floats or strings; timestamps in several ISO-ish layouts or as
//!   epoch milliseconds; odds scaled by 100.
//!
//! ## What does **not** live here
//! - **Row building and validation policy** – `scrape::extract` decides what is a
//!   rejection and what to do with it.
//! - **Networking and caching** – `core::net` and `store`.
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::collect_matchdays → ArchiveSource::fetch_day
//!                                    ↘  specs::archive::parse_payload
//!        → scrape::extract (coerces via specs::archive helpers)
//! ```
//!
//! ## Testing notes
//! - Payload shapes are testable **offline** against captured payloads.
pub mod archive;

pub use archive::{RawBettingModel, RawEvent, RawMatchday, RawOutcome, parse_payload};
