// src/stats.rs
use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::Row;

/// Count and mean odds of one (bet description, outcome) pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutcomeStat {
    pub market: String,
    pub outcome: String,
    pub count: usize,
    /// Mean over rows that carried odds; `None` when none did.
    pub mean_odds: Option<f64>,
}

/// Group rows by (market, outcome). Rows without a bet description are
/// grouped under an empty market. Sorted by market, then outcome.
pub fn summarize<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Vec<OutcomeStat> {
    #[derive(Default)]
    struct Acc { count: usize, odds_sum: f64, odds_n: usize }

    let mut groups: BTreeMap<(&str, &str), Acc> = BTreeMap::new();
    for r in rows {
        let acc = groups
            .entry((r.market.as_deref().unwrap_or(""), r.outcome.as_str()))
            .or_default();
        acc.count += 1;
        if let Some(q) = r.odds {
            acc.odds_sum += q;
            acc.odds_n += 1;
        }
    }

    groups
        .into_iter()
        .map(|((market, outcome), acc)| OutcomeStat {
            market: market.to_string(),
            outcome: outcome.to_string(),
            count: acc.count,
            mean_odds: (acc.odds_n > 0).then(|| acc.odds_sum / acc.odds_n as f64),
        })
        .collect()
}

/// Share of each outcome label within `rows`, as (outcome, count, fraction).
pub fn outcome_shares<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Vec<(String, usize, f64)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut total = 0usize;
    for r in rows {
        *counts.entry(r.outcome.as_str()).or_default() += 1;
        total += 1;
    }
    counts
        .into_iter()
        .map(|(o, c)| (o.to_string(), c, c as f64 / total as f64))
        .collect()
}
