// src/scrape/extract.rs
//
// Record extractor: matchdays → provider lists → betting models → events →
// outcome results, flattened to one `Row` per (event, outcome).

use chrono::NaiveDateTime;

use crate::config::consts::FIXTURE_SEP;
use crate::config::options::{ErrorPolicy, ExtractOptions, ProviderSelector};
use crate::core::sanitize::{normalize_ws, split_fixture};
use crate::data::Row;
use crate::error::ExtractError;
use crate::specs::archive::{self, RawBettingModel, RawEvent, RawMatchday};

/// Rows plus everything that was dropped under `ErrorPolicy::Skip`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    pub rows: Vec<Row>,
    pub rejected: Vec<ExtractError>,
}

/// Flatten `matchdays` into rows, in encounter order.
///
/// Matchday number and timestamp are checked for every matchday before any of
/// its rows are built. Under `ErrorPolicy::Abort` the first rejection is
/// returned; under `Skip` the offending matchday (bad number or timestamp) or
/// event (bad description or outcome) is dropped whole and the rejection is
/// kept in [`Extraction::rejected`].
pub fn extract(matchdays: &[RawMatchday], opts: &ExtractOptions) -> Result<Extraction, ExtractError> {
    let mut out = Extraction::default();

    for md in matchdays {
        let (matchday, timestamp) = match header(md) {
            Ok(h) => h,
            Err(e) => {
                reject(&mut out, e, opts.on_error)?;
                continue;
            }
        };

        for model in models(md, &opts.provider) {
            let label = archive::text(model.modello_scommessa.as_ref());
            if !opts.model.accepts(label.as_deref()) {
                continue;
            }
            for event in &model.eventi_scommessa_list {
                match event_rows(matchday, timestamp, event) {
                    Ok(mut rows) => out.rows.append(&mut rows),
                    Err(e) => reject(&mut out, e, opts.on_error)?,
                }
            }
        }
    }

    if !out.rejected.is_empty() {
        logw!(rejected = out.rejected.len(), rows = out.rows.len(), "extraction skipped bad records");
    }
    Ok(out)
}

fn reject(out: &mut Extraction, e: ExtractError, policy: ErrorPolicy) -> Result<(), ExtractError> {
    match policy {
        ErrorPolicy::Abort => Err(e),
        ErrorPolicy::Skip => {
            logw!("skipping: {e}");
            out.rejected.push(e);
            Ok(())
        }
    }
}

fn header(md: &RawMatchday) -> Result<(u32, NaiveDateTime), ExtractError> {
    let ts_raw = md.data_primo_evento.as_ref();

    let matchday = archive::matchday(md.giornata.as_ref()).ok_or_else(|| {
        ExtractError::InvalidMatchday {
            raw: archive::describe(md.giornata.as_ref()),
            first_event: archive::describe(ts_raw),
        }
    })?;

    let timestamp = archive::timestamp(ts_raw).ok_or_else(|| ExtractError::InvalidTimestamp {
        matchday,
        raw: archive::describe(ts_raw),
    })?;

    Ok((matchday, timestamp))
}

/// Betting-model lists selected by provider. A missing key yields nothing.
fn models<'a>(
    md: &'a RawMatchday,
    provider: &'a ProviderSelector,
) -> Box<dyn Iterator<Item = &'a RawBettingModel> + 'a> {
    match provider {
        ProviderSelector::All => Box::new(md.providers.values().flatten()),
        ProviderSelector::Key(key) => Box::new(md.providers.get(key).into_iter().flatten()),
    }
}

/// All rows of one event, or the reason the event is unusable.
/// Never returns a partial event.
fn event_rows(matchday: u32, timestamp: NaiveDateTime, event: &RawEvent) -> Result<Vec<Row>, ExtractError> {
    let raw_desc = event.descrizione_avventimento.as_ref();
    let desc = archive::text(raw_desc);

    let (home, away) = desc
        .as_deref()
        .and_then(|d| split_fixture(d, FIXTURE_SEP))
        .ok_or_else(|| ExtractError::MalformedEvent {
            matchday,
            raw: desc.clone().unwrap_or_else(|| archive::describe(raw_desc)),
        })?;

    let kickoff = archive::text(event.data_ora.as_ref());

    event
        .risultato_scommessa_ufficiale_list
        .iter()
        .map(|res| {
            let outcome = archive::text(res.risultato.as_ref()).ok_or_else(|| ExtractError::InvalidOutcome {
                matchday,
                fixture: format!("{home}{FIXTURE_SEP}{away}"),
                raw: archive::describe(res.risultato.as_ref()),
            })?;

            Ok(Row {
                matchday,
                timestamp,
                home: home.to_string(),
                away: away.to_string(),
                outcome,
                market: archive::text(res.descrizione_scommessa.as_ref()).map(|m| normalize_ws(&m)),
                odds: archive::odds(res.quote_comb.as_ref()),
                kickoff: kickoff.clone(),
            })
        })
        .collect()
}
