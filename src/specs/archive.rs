// src/specs/archive.rs
//
// Shape of one archive day: a JSON array of matchday objects.
// Scalars are kept as raw JSON values and coerced on read; the upstream is
// not consistent about numbers vs strings.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::consts::ODDS_SCALE;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMatchday {
    #[serde(default)]
    pub giornata: Option<Value>,
    #[serde(default)]
    pub data_primo_evento: Option<Value>,
    /// Provider key → betting models.
    #[serde(
        default,
        rename = "risultatoModelloScommessaCampionatoMap",
        deserialize_with = "null_as_default"
    )]
    pub providers: BTreeMap<String, Vec<RawBettingModel>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBettingModel {
    #[serde(default)]
    pub modello_scommessa: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub eventi_scommessa_list: Vec<RawEvent>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default)]
    pub descrizione_avventimento: Option<Value>,
    #[serde(default)]
    pub data_ora: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub risultato_scommessa_ufficiale_list: Vec<RawOutcome>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOutcome {
    #[serde(default)]
    pub risultato: Option<Value>,
    #[serde(default)]
    pub descrizione_scommessa: Option<Value>,
    #[serde(default)]
    pub quote_comb: Option<Value>,
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Parse one day's payload. `null` is an empty day.
pub fn parse_payload(text: &str) -> Result<Vec<RawMatchday>, serde_json::Error> {
    let days: Option<Vec<RawMatchday>> = serde_json::from_str(text)?;
    Ok(days.unwrap_or_default())
}

/* ---------------- coercion ---------------- */

/// Render a raw value for error messages; absent values read `<missing>`.
pub fn describe(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => "<missing>".to_string(),
        Some(v) => v.to_string(),
    }
}

/// Text of a label-like field. Numbers are accepted and stringified.
pub fn text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Matchday number: an integer, an integral float, or a numeric string; at least 1.
pub fn matchday(v: Option<&Value>) -> Option<u32> {
    let n = match v? {
        Value::Number(n) => match n.as_u64() {
            Some(u) => u,
            None => {
                let f = n.as_f64()?;
                if f.fract() != 0.0 || f < 0.0 || f > u32::MAX as f64 {
                    return None;
                }
                f as u64
            }
        },
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u32::try_from(n).ok().filter(|&n| n >= 1)
}

/// Matchday timestamp: ISO-like text (with or without offset, time optional)
/// or epoch milliseconds.
pub fn timestamp(v: Option<&Value>) -> Option<NaiveDateTime> {
    match v? {
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?).map(|dt| dt.naive_utc()),
        _ => None,
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(dt);
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `quoteComb` is odds × 100, as a number or numeric string.
pub fn odds(v: Option<&Value>) -> Option<f64> {
    let raw = match v? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok()?,
        _ => return None,
    };
    raw.is_finite().then_some(raw / ODDS_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matchday_coercion() {
        assert_eq!(matchday(Some(&json!(7))), Some(7));
        assert_eq!(matchday(Some(&json!(7.0))), Some(7));
        assert_eq!(matchday(Some(&json!(" 12 "))), Some(12));
        assert_eq!(matchday(Some(&json!(7.5))), None);
        assert_eq!(matchday(Some(&json!(0))), None);
        assert_eq!(matchday(Some(&json!(-3))), None);
        assert_eq!(matchday(Some(&json!("sette"))), None);
        assert_eq!(matchday(Some(&json!(null))), None);
        assert_eq!(matchday(None), None);
    }

    #[test]
    fn timestamp_formats() {
        let want = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(10, 4, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-01T10:04:00"), Some(want));
        assert_eq!(parse_timestamp("2024-05-01T10:04:00.000"), Some(want));
        assert_eq!(parse_timestamp("2024-05-01 10:04"), Some(want));
        assert_eq!(parse_timestamp("2024-05-01T12:04:00+02:00"), Some(want));
        assert_eq!(parse_timestamp("01-05-2024 10:04"), Some(want));
        assert_eq!(
            parse_timestamp("2024-05-01"),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_timestamp("ieri"), None);
        assert_eq!(parse_timestamp("  "), None);
    }

    #[test]
    fn timestamp_from_epoch_millis() {
        let ts = timestamp(Some(&json!(1_714_557_840_000i64))).unwrap();
        assert_eq!(ts.to_string(), "2024-05-01 10:04:00");
    }

    #[test]
    fn odds_are_scaled() {
        assert_eq!(odds(Some(&json!(185))), Some(1.85));
        assert_eq!(odds(Some(&json!("250"))), Some(2.5));
        assert_eq!(odds(Some(&json!(true))), None);
        assert_eq!(odds(None), None);
    }

    #[test]
    fn null_lists_read_as_empty() {
        let text = r#"[{"giornata": 3, "dataPrimoEvento": "2024-05-01T10:00:00",
                       "risultatoModelloScommessaCampionatoMap": null}]"#;
        let days = parse_payload(text).unwrap();
        assert_eq!(days.len(), 1);
        assert!(days[0].providers.is_empty());
        assert!(parse_payload("null").unwrap().is_empty());
    }

    #[test]
    fn labels_accept_numbers() {
        assert_eq!(text(Some(&json!("Goal"))).as_deref(), Some("Goal"));
        assert_eq!(text(Some(&json!(1))).as_deref(), Some("1"));
        assert_eq!(text(Some(&json!(["x"]))), None);
        assert_eq!(describe(None), "<missing>");
        assert_eq!(describe(Some(&json!("x"))), r#""x""#);
    }
}
