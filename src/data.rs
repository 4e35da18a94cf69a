// src/data.rs
//
// Normalized rows and the read-only views built on top of them.
//
// - Row: one (event, outcome) pair of one matchday. Produced only by
//        `scrape::extract`.
// - SelectionView: derived (view) data produced from a row slice by
//                  applying the team / bet-description filter.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Row {
    pub matchday: u32,
    /// Start of the matchday (`dataPrimoEvento`).
    pub timestamp: NaiveDateTime,
    pub home: String,
    pub away: String,
    /// Outcome label (`risultato`), verbatim.
    pub outcome: String,
    /// Bet description (`descrizioneScommessa`), e.g. "Esito Finale 1X2".
    pub market: Option<String>,
    pub odds: Option<f64>,
    /// Event kick-off as sent upstream (`dataOra`).
    pub kickoff: Option<String>,
}

impl Row {
    pub fn fixture(&self) -> String {
        format!("{} - {}", self.home, self.away)
    }

    /// Order-independent key for a pairing: both names sorted, joined by `-`.
    pub fn h2h_key(&self) -> String {
        let (a, b) = if self.home <= self.away {
            (&self.home, &self.away)
        } else {
            (&self.away, &self.home)
        };
        format!("{a}-{b}")
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home == team || self.away == team
    }
}

/// Sorted distinct team names across `rows`.
pub fn teams<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Vec<String> {
    let mut set = BTreeSet::new();
    for r in rows {
        set.insert(r.home.as_str());
        set.insert(r.away.as_str());
    }
    set.into_iter().map(str::to_string).collect()
}

/// Sorted distinct bet descriptions across `rows`.
pub fn markets<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Vec<String> {
    rows.into_iter()
        .filter_map(|r| r.market.as_deref())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[derive(Clone, Copy, Debug)]
pub struct Selection<'a> {
    pub team: Option<&'a str>,
    /// Empty keeps every bet description.
    pub markets: &'a [String],
}

impl<'a> Selection<'a> {
    #[inline] pub fn is_all(&self) -> bool { self.team.is_none() && self.markets.is_empty() }
}

/// Zero-copy filtered view for display or export.
/// Holds row indexes into the borrowed slice.
#[derive(Clone, Debug)]
pub struct SelectionView<'a> {
    /// Positions of kept rows in the source slice
    pub row_ix: Vec<usize>,
    raw: &'a [Row],
}

impl<'a> SelectionView<'a> {
    pub fn from_rows(rows: &'a [Row], sel: Selection<'_>) -> Self {
        if sel.is_all() {
            return Self { row_ix: (0..rows.len()).collect(), raw: rows };
        }

        let wanted: HashSet<&str> = sel.markets.iter().map(String::as_str).collect();
        let row_ix = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| sel.team.is_none_or(|t| r.involves(t)))
            .filter(|(_, r)| {
                wanted.is_empty() || r.market.as_deref().is_some_and(|m| wanted.contains(m))
            })
            .map(|(i, _)| i)
            .collect();

        Self { row_ix, raw: rows }
    }

    /// Number of rows in the projection.
    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    /// Borrow a single row by projected index (no cloning).
    pub fn row(&self, i: usize) -> Option<&'a Row> {
        self.row_ix.get(i).and_then(|&ix| self.raw.get(ix))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Row> + '_ {
        self.row_ix.iter().filter_map(|&ix| self.raw.get(ix))
    }

    /// Materialize owned rows (for export boundaries).
    pub fn to_owned_rows(&self) -> Vec<Row> {
        self.iter().cloned().collect()
    }
}
