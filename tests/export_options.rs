// tests/export_options.rs
//
// Tests for ExportOptions path/extension logic.
//
use std::path::{Path, PathBuf};
use sisal_archive::config::options::{ExportFormat, ExportOptions, ExportType};

fn norm(p: &Path) -> PathBuf { p.components().collect() }

#[test]
fn default_path_ext_follows_format() {
    let mut opts = ExportOptions::default();
    assert_eq!(norm(&opts.out_path()), norm(Path::new("out/results/archive.csv")));

    opts.format = ExportFormat::Tsv;
    assert!(opts.out_path().to_string_lossy().ends_with("archive.tsv"));
}

#[test]
fn format_change_keeps_user_extension() {
    let mut export = ExportOptions::default();
    export.set_path("out/custom/run.data");

    export.format = ExportFormat::Json;
    assert_eq!(norm(&export.out_path()), norm(Path::new("out/custom/run.data")));
}

#[test]
fn path_without_extension_tracks_format() {
    let mut export = ExportOptions::default();
    export.set_path("exports/today");
    export.format = ExportFormat::Tsv;
    assert_eq!(norm(&export.out_path()), norm(Path::new("exports/today.tsv")));
}

#[test]
fn per_team_path_is_a_directory() {
    let mut export = ExportOptions::default();
    export.export_type = ExportType::PerTeam;
    export.set_path("  out/teams  ");
    assert_eq!(norm(&export.out_path()), norm(Path::new("out/teams")));
}
