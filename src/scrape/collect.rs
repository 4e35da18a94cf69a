// src/scrape/collect.rs
use std::fs;
use std::path::Path;

use chrono::{Days, NaiveDate};

use crate::core::net::ArchiveSource;
use crate::error::FetchError;
use crate::progress::Progress;
use crate::specs::archive::{RawMatchday, parse_payload};

/// A day that could not be fetched or parsed; it contributed no matchdays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayFailure {
    pub day: NaiveDate,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct Collected {
    pub matchdays: Vec<RawMatchday>,
    pub failures: Vec<DayFailure>,
}

/// `today` and the `n - 1` days before it, newest first.
pub fn lookback_days(today: NaiveDate, n: usize) -> Vec<NaiveDate> {
    (0..n as u64)
        .filter_map(|i| today.checked_sub_days(Days::new(i)))
        .collect()
}

/// Fetch and parse each day in turn. A failing day is logged, reported and
/// skipped; it never aborts the collection.
pub fn collect_matchdays(
    source: &dyn ArchiveSource,
    days: &[NaiveDate],
    mut progress: Option<&mut dyn Progress>,
) -> Collected {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(days.len());
    }

    let mut out = Collected::default();

    for &day in days {
        let parsed = source.fetch_day(day).and_then(|text| {
            parse_payload(&text).map_err(|source| FetchError::Payload { day, source })
        });

        match parsed {
            Ok(mut mds) => {
                logd!(%day, matchdays = mds.len(), "archive day loaded");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(day, mds.len());
                }
                out.matchdays.append(&mut mds);
            }
            Err(e) => {
                let reason = e.to_string();
                logw!(%day, "archive day skipped: {reason}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(day, &reason);
                }
                out.failures.push(DayFailure { day, reason });
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!(
            "{} of {} archive days loaded, {} matchdays",
            days.len() - out.failures.len(),
            days.len(),
            out.matchdays.len()
        ));
        p.finish();
    }
    out
}

/// Read saved payload files (one archive day each) instead of fetching.
pub fn load_payload_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RawMatchday>, crate::Error> {
    let mut out = Vec::new();
    for path in paths {
        let text = fs::read_to_string(path.as_ref())?;
        let mut mds = parse_payload(&text)?;
        logd!(path = %path.as_ref().display(), matchdays = mds.len(), "payload file loaded");
        out.append(&mut mds);
    }
    Ok(out)
}
