// src/segment.rs
//
// Cohort segmenter. Matchday numbers climb through a championship and drop
// back to the first matchday when the next one starts. Scanning the
// time-ordered rows from the newest backwards:
//
//   1. CURRENT runs up to and including the newest run of first-matchday rows.
//   2. PREVIOUS continues from there until `cycle_length` distinct matchdays
//      have been seen, finishing the run of the matchday that completed the set.
//   3. Anything older stays UNASSIGNED.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::options::SegmentOptions;
use crate::data::Row;
use crate::error::SegmentError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Cohort {
    Current,
    Previous,
    Unassigned,
}

impl Cohort {
    pub fn label(&self) -> &'static str {
        match self {
            Cohort::Current => "current",
            Cohort::Previous => "previous",
            Cohort::Unassigned => "unassigned",
        }
    }
}

/// How much of the two championships the input could cover.
/// Degraded outcomes are not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Completeness {
    /// Boundary found and a full previous championship behind it.
    Complete,
    /// No first-matchday row at all: every row is CURRENT, PREVIOUS is empty.
    NoBoundary,
    /// Fewer than `cycle_length` distinct matchdays behind the boundary.
    /// `kept` tells whether those rows were tagged PREVIOUS or left unassigned.
    PartialPrevious { distinct: usize, kept: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segmentation {
    tags: Vec<Cohort>,
    boundary: Option<usize>,
    previous_matchdays: BTreeSet<u32>,
    completeness: Completeness,
}

impl Segmentation {
    /// One tag per input row, in input order.
    pub fn tags(&self) -> &[Cohort] { &self.tags }
    pub fn cohort(&self, ix: usize) -> Option<Cohort> { self.tags.get(ix).copied() }

    /// Index of the chronologically earliest row of the current championship.
    pub fn boundary(&self) -> Option<usize> { self.boundary }

    pub fn completeness(&self) -> Completeness { self.completeness }
    pub fn is_complete(&self) -> bool { self.completeness == Completeness::Complete }

    /// Distinct matchday numbers tagged PREVIOUS.
    pub fn previous_matchdays(&self) -> &BTreeSet<u32> { &self.previous_matchdays }

    pub fn count(&self, cohort: Cohort) -> usize {
        self.tags.iter().filter(|&&t| t == cohort).count()
    }

    pub fn indices(&self, cohort: Cohort) -> Vec<usize> {
        self.tags
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t == cohort)
            .map(|(i, _)| i)
            .collect()
    }

    /// Rows of one cohort. `rows` must be the slice that was segmented.
    pub fn rows<'a>(&'a self, rows: &'a [Row], cohort: Cohort) -> impl Iterator<Item = &'a Row> + 'a {
        debug_assert_eq!(rows.len(), self.tags.len());
        rows.iter()
            .zip(&self.tags)
            .filter(move |&(_, &t)| t == cohort)
            .map(|(r, _)| r)
    }

    /// Owned (current, previous) subsets.
    pub fn split(&self, rows: &[Row]) -> (Vec<Row>, Vec<Row>) {
        (
            self.rows(rows, Cohort::Current).cloned().collect(),
            self.rows(rows, Cohort::Previous).cloned().collect(),
        )
    }
}

/// Tag every row of a timestamp-ascending sequence.
///
/// Fails only on structurally invalid input: rows out of order, a matchday
/// below `first_matchday`, or a zero cycle length. Small or skewed inputs
/// degrade through [`Completeness`] instead.
pub fn segment(rows: &[Row], opts: &SegmentOptions) -> Result<Segmentation, SegmentError> {
    if opts.cycle_length == 0 {
        return Err(SegmentError::InvalidCycleLength);
    }
    validate(rows, opts.first_matchday)?;

    let first = opts.first_matchday;
    let n = rows.len();
    let mut tags = vec![Cohort::Unassigned; n];

    // Phase 1: newest run of first-matchday rows.
    let Some(newest_first) = (0..n).rev().find(|&i| rows[i].matchday == first) else {
        tags.fill(Cohort::Current);
        logf!(rows = n, "no championship boundary found; all rows are current");
        return Ok(Segmentation {
            tags,
            boundary: None,
            previous_matchdays: BTreeSet::new(),
            completeness: Completeness::NoBoundary,
        });
    };

    let mut start = newest_first;
    while start > 0 && rows[start - 1].matchday == first {
        start -= 1;
    }
    tags[start..].fill(Cohort::Current);

    // Phase 2: walk back until the set of distinct matchdays is full, then
    // finish the run of the matchday that filled it.
    let mut seen = BTreeSet::new();
    let mut i = start;
    while i > 0 {
        let md = rows[i - 1].matchday;
        if seen.len() == opts.cycle_length && md != rows[i].matchday {
            break;
        }
        seen.insert(md);
        i -= 1;
    }

    let complete = seen.len() == opts.cycle_length;
    let keep = complete || opts.keep_partial_previous;
    if keep {
        tags[i..start].fill(Cohort::Previous);
    }

    let completeness = if complete {
        Completeness::Complete
    } else {
        Completeness::PartialPrevious { distinct: seen.len(), kept: keep }
    };

    logd!(
        boundary = start,
        current = n - start,
        previous = start - i,
        distinct = seen.len(),
        ?completeness,
        "segmented rows"
    );

    Ok(Segmentation {
        tags,
        boundary: Some(start),
        previous_matchdays: if keep { seen } else { BTreeSet::new() },
        completeness,
    })
}

fn validate(rows: &[Row], first: u32) -> Result<(), SegmentError> {
    for (index, r) in rows.iter().enumerate() {
        if r.matchday < first {
            return Err(SegmentError::InvalidMatchday { index, matchday: r.matchday, first });
        }
        if index > 0 && r.timestamp < rows[index - 1].timestamp {
            return Err(SegmentError::Unsorted { index });
        }
    }
    Ok(())
}

/// Stable ascending sort by timestamp; rows with equal timestamps keep their
/// extraction order.
pub fn sort_rows(rows: &mut [Row]) {
    rows.sort_by_key(|r| r.timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    /// One row per matchday, one minute apart, in the given order.
    fn rows(mds: &[u32]) -> Vec<Row> {
        let t0 = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        mds.iter()
            .enumerate()
            .map(|(i, &md)| Row {
                matchday: md,
                timestamp: t0 + Duration::minutes(i as i64),
                home: "A".into(),
                away: "B".into(),
                outcome: "Goal".into(),
                market: None,
                odds: None,
                kickoff: None,
            })
            .collect()
    }

    fn short(cycle: usize) -> SegmentOptions {
        SegmentOptions { cycle_length: cycle, ..SegmentOptions::default() }
    }

    use super::Cohort::{Current as C, Previous as P, Unassigned as U};

    #[test]
    fn two_full_cycles_and_older_leftovers() {
        // cycle of 3: [..2 3] [1 2 3] [1 2]
        let rs = rows(&[2, 3, 1, 2, 3, 1, 2]);
        let seg = segment(&rs, &short(3)).unwrap();
        assert_eq!(seg.tags(), &[U, U, P, P, P, C, C]);
        assert_eq!(seg.boundary(), Some(5));
        assert!(seg.is_complete());
        assert_eq!(seg.previous_matchdays().iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn no_first_matchday_means_all_current() {
        let rs = rows(&[4, 5, 6]);
        let seg = segment(&rs, &short(3)).unwrap();
        assert_eq!(seg.tags(), &[C, C, C]);
        assert_eq!(seg.boundary(), None);
        assert_eq!(seg.completeness(), Completeness::NoBoundary);
        assert_eq!(seg.count(Cohort::Previous), 0);
    }

    #[test]
    fn empty_input_has_no_boundary() {
        let seg = segment(&[], &SegmentOptions::default()).unwrap();
        assert!(seg.tags().is_empty());
        assert_eq!(seg.completeness(), Completeness::NoBoundary);
    }

    #[test]
    fn first_matchday_run_stays_together() {
        // three rows for matchday 1 of the current cycle
        let mut rs = rows(&[2, 3, 1, 1, 1, 2]);
        rs[3].timestamp = rs[2].timestamp;
        rs[4].timestamp = rs[2].timestamp;
        let seg = segment(&rs, &short(2)).unwrap();
        assert_eq!(seg.tags(), &[P, P, C, C, C, C]);
        assert_eq!(seg.boundary(), Some(2));
    }

    #[test]
    fn completing_run_is_taken_whole() {
        // cycle of 2; previous cycle is [1 1 2]; the run of 1s completes it
        let rs = rows(&[2, 1, 1, 2, 1]);
        let seg = segment(&rs, &short(2)).unwrap();
        assert_eq!(seg.tags(), &[U, P, P, P, C]);
        assert!(seg.is_complete());
    }

    #[test]
    fn partial_previous_can_be_dropped() {
        let rs = rows(&[3, 2, 1]);
        let opts = SegmentOptions { keep_partial_previous: false, ..SegmentOptions::default() };
        let seg = segment(&rs, &opts).unwrap();
        assert_eq!(seg.tags(), &[U, U, C]);
        assert_eq!(seg.completeness(), Completeness::PartialPrevious { distinct: 2, kept: false });
        assert!(seg.previous_matchdays().is_empty());
    }

    #[test]
    fn unsorted_and_invalid_rows_fail() {
        let mut rs = rows(&[1, 2, 3]);
        rs.swap(0, 2);
        assert_eq!(segment(&rs, &short(3)), Err(SegmentError::Unsorted { index: 1 }));

        let rs = rows(&[1, 0]);
        assert_eq!(
            segment(&rs, &short(3)),
            Err(SegmentError::InvalidMatchday { index: 1, matchday: 0, first: 1 })
        );
        assert_eq!(segment(&rows(&[1]), &short(0)), Err(SegmentError::InvalidCycleLength));
    }

    #[test]
    fn sort_keeps_extraction_order_on_ties() {
        let mut rs = rows(&[5, 6, 7]);
        let t = rs[0].timestamp;
        rs[0].timestamp = t + Duration::minutes(10);
        rs[1].timestamp = t;
        rs[2].timestamp = t;
        sort_rows(&mut rs);
        assert_eq!(rs.iter().map(|r| r.matchday).collect::<Vec<_>>(), vec![6, 7, 5]);
    }
}
