// src/file.rs

use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::{Path, PathBuf},
};

use crate::config::options::{ExportOptions, ExportType};
use crate::core::sanitize::sanitize_team_filename;
use crate::csv::{to_export_string, to_json_string};
use crate::error::{Error, Result};
use crate::store::DataSet;

/// Write `ds` as `export` describes: one file, or one file per team.
/// Returns every path written.
pub fn export_dataset(export: &ExportOptions, ds: &DataSet) -> Result<Vec<PathBuf>> {
    match export.export_type {
        ExportType::SingleFile => write_export_single(export, ds).map(|p| vec![p]),
        ExportType::PerTeam => write_export_per_team(export, ds),
    }
}

/// Write a single export file based on ExportOptions (path, headers policy, format).
/// Returns the final path written to.
pub fn write_export_single(export: &ExportOptions, ds: &DataSet) -> Result<PathBuf> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    fs::write(&path, render(export, ds)?)?;
    logd!(path = %path.display(), rows = ds.len(), "export written");
    Ok(path)
}

/// Write one file per team into the directory implied by `export.out_path()`.
/// A row lands in the files of both its home and away team.
pub fn write_export_per_team(export: &ExportOptions, ds: &DataSet) -> Result<Vec<PathBuf>> {
    let (Some(home_col), Some(away_col)) = (ds.column("Home"), ds.column("Away")) else {
        return Err(Error::InvalidOption(
            "per-team export needs Home and Away columns".into(),
        ));
    };

    let outdir = export.out_path();
    ensure_directory(&outdir)?;

    // Sorted by team so file numbering is stable between runs
    let mut by_team: BTreeMap<&str, Vec<Vec<String>>> = BTreeMap::new();
    for r in &ds.rows {
        let home = r.get(home_col).map(String::as_str);
        let away = r.get(away_col).map(String::as_str);
        let away = if away == home { None } else { away };
        for team in [home, away].into_iter().flatten() {
            by_team.entry(team).or_default().push(r.clone());
        }
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut written = Vec::with_capacity(by_team.len());
    let ext = export.format.ext();

    for (n, (team_name, team_rows)) in by_team.into_iter().enumerate() {
        let base_stem = sanitize_team_filename(team_name, n);
        let path = resolve_team_filename(&outdir, &base_stem, &mut seen, ext);

        let team_ds = DataSet { headers: ds.headers.clone(), rows: team_rows };
        fs::write(&path, render(export, &team_ds)?)?;
        written.push(path);
    }

    logf!(files = written.len(), dir = %outdir.display(), "per-team export written");
    Ok(written)
}

/// Serialize `ds` in the export format, without touching the filesystem.
pub fn render(export: &ExportOptions, ds: &DataSet) -> Result<String> {
    match export.format.delim() {
        Some(sep) => Ok(to_export_string(ds, export.include_headers, sep)),
        None => Ok(to_json_string(ds)?),
    }
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        ))
        .into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Duplicate handling **only within this run**
pub fn resolve_team_filename(
    dir: &Path,
    stem: &str,                        // already sanitized, no extension
    seen_names: &mut HashMap<String, usize>,
    ext: &str,                         // "csv" | "tsv" | "json"
) -> PathBuf {
    let count = seen_names.entry(stem.to_string()).or_insert(0);

    // First occurrence: "<stem>.ext"
    // Subsequent:       "<stem> (N).ext" with N starting at 2
    let filename = if *count == 0 {
        format!("{stem}.{ext}")
    } else {
        format!("{stem} ({}).{ext}", *count + 1)
    };

    *count += 1;
    dir.join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_stems_get_numbered() {
        let mut seen = HashMap::new();
        let dir = Path::new("out");
        assert_eq!(resolve_team_filename(dir, "Roma", &mut seen, "csv"), dir.join("Roma.csv"));
        assert_eq!(resolve_team_filename(dir, "Roma", &mut seen, "csv"), dir.join("Roma (2).csv"));
        assert_eq!(resolve_team_filename(dir, "Roma", &mut seen, "csv"), dir.join("Roma (3).csv"));
    }

    #[test]
    fn ensure_directory_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        fs::write(&file, "x").unwrap();
        assert!(ensure_directory(&file).is_err());
        assert!(ensure_directory(&dir.path().join("a/b")).is_ok());
    }
}
