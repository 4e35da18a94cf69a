// src/csv.rs
use std::io::{self, Write};

use serde_json::{Map, Value};

use crate::store::DataSet;

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Create a full delimited export string.
/// - `include_headers`: whether to emit a header line (when headers exist)
/// - `sep`: character to be used as field/cell separator
pub fn to_export_string(ds: &DataSet, include_headers: bool, sep: char) -> String {
    // writes into a Vec<u8> cannot fail
    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        if let Some(h) = &ds.headers {
            let _ = write_row(&mut buf, h, sep);
        }
    }
    for r in &ds.rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

/// JSON array of objects keyed by header; rows without headers become arrays.
pub fn to_json_string(ds: &DataSet) -> serde_json::Result<String> {
    let items: Vec<Value> = match &ds.headers {
        Some(h) => ds
            .rows
            .iter()
            .map(|r| {
                let obj: Map<String, Value> = h
                    .iter()
                    .cloned()
                    .zip(r.iter().map(|c| Value::String(c.clone())))
                    .collect();
                Value::Object(obj)
            })
            .collect(),
        None => ds
            .rows
            .iter()
            .map(|r| Value::Array(r.iter().cloned().map(Value::String).collect()))
            .collect(),
    };
    serde_json::to_string_pretty(&items)
}
