// src/runner.rs
use chrono::NaiveDate;

use crate::{
    config::options::{AppOptions, CohortFilter},
    core::net::ArchiveSource,
    data::{Row, Selection, SelectionView},
    error::Result,
    progress::Progress,
    scrape::{self, DayFailure},
    segment::{self, Cohort, Segmentation},
    specs::RawMatchday,
    store::DataSet,
};

pub const EXPORT_HEADERS: [&str; 11] = [
    "Date", "Kickoff", "Matchday", "Cohort", "Match", "Home", "Away", "H2H", "Market", "Outcome",
    "Odds",
];

/// Everything one run produced.
#[derive(Debug)]
pub struct Report {
    /// Extracted rows, sorted ascending by timestamp.
    pub rows: Vec<Row>,
    pub segmentation: Segmentation,
    /// Records dropped by the extractor.
    pub rejected: Vec<crate::error::ExtractError>,
    /// Archive days that contributed nothing.
    pub failed_days: Vec<DayFailure>,
}

impl Report {
    pub fn current(&self) -> impl Iterator<Item = &Row> + '_ {
        self.segmentation.rows(&self.rows, Cohort::Current)
    }

    pub fn previous(&self) -> impl Iterator<Item = &Row> + '_ {
        self.segmentation.rows(&self.rows, Cohort::Previous)
    }

    /// Rows kept by the cohort filter and the team/market selection,
    /// as (cohort, row) pairs in timestamp order.
    pub fn select<'a>(
        &'a self,
        cohort: CohortFilter,
        sel: Selection<'_>,
    ) -> impl Iterator<Item = (Cohort, &'a Row)> + 'a {
        let view = SelectionView::from_rows(&self.rows, sel);
        view.row_ix
            .into_iter()
            .filter_map(move |ix| {
                let tag = self.segmentation.cohort(ix)?;
                let keep = match cohort {
                    CohortFilter::All => true,
                    CohortFilter::Current => tag == Cohort::Current,
                    CohortFilter::Previous => tag == Cohort::Previous,
                };
                keep.then(|| (tag, &self.rows[ix]))
            })
    }

    /// Export table for the selected rows, ordered by matchday start and
    /// then event kick-off.
    pub fn to_dataset(&self, cohort: CohortFilter, sel: Selection<'_>) -> DataSet {
        let mut picked: Vec<(Cohort, &Row)> = self.select(cohort, sel).collect();
        picked.sort_by(|(_, a), (_, b)| (a.timestamp, &a.kickoff).cmp(&(b.timestamp, &b.kickoff)));

        let rows = picked
            .into_iter()
            .map(|(tag, r)| {
                vec![
                    r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                    r.kickoff.clone().unwrap_or_default(),
                    r.matchday.to_string(),
                    tag.label().to_string(),
                    r.fixture(),
                    r.home.clone(),
                    r.away.clone(),
                    r.h2h_key(),
                    r.market.clone().unwrap_or_default(),
                    r.outcome.clone(),
                    r.odds.map(|q| format!("{q:.2}")).unwrap_or_default(),
                ]
            })
            .collect();

        DataSet {
            headers: Some(EXPORT_HEADERS.iter().map(|h| h.to_string()).collect()),
            rows,
        }
    }
}

/// Extract, order and segment already-collected matchdays.
pub fn process(matchdays: &[RawMatchday], opts: &AppOptions) -> Result<Report> {
    let extraction = scrape::extract(matchdays, &opts.extract)?;
    let mut rows = extraction.rows;
    segment::sort_rows(&mut rows);

    let segmentation = segment::segment(&rows, &opts.segment)?;
    logf!(
        rows = rows.len(),
        current = segmentation.count(Cohort::Current),
        previous = segmentation.count(Cohort::Previous),
        completeness = ?segmentation.completeness(),
        "archive processed"
    );

    Ok(Report {
        rows,
        segmentation,
        rejected: extraction.rejected,
        failed_days: Vec::new(),
    })
}

/// Top-level runner: fetch the lookback window ending at `today`, then process.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    opts: &AppOptions,
    source: &dyn ArchiveSource,
    today: NaiveDate,
    progress: Option<&mut dyn Progress>,
) -> Result<Report> {
    let days = scrape::lookback_days(today, opts.fetch.days);
    logf!(days = days.len(), %today, "collecting archive");

    let collected = scrape::collect_matchdays(source, &days, progress);
    let mut report = process(&collected.matchdays, opts)?;
    report.failed_days = collected.failures;
    Ok(report)
}
