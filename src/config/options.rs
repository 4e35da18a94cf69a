// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub extract: ExtractOptions,
    pub segment: SegmentOptions,
    pub view: ViewOptions,
    pub export: ExportOptions,
}

/* ---------------- Fetch ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    /// Archive endpoint; the day (`dd-mm-yyyy`) is appended.
    pub base_url: String,
    /// How many days back from today to fetch (today included).
    pub days: usize,
    pub timeout: Duration,
    pub user_agent: String,
    /// `None` disables the on-disk payload cache.
    pub cache_ttl: Option<Duration>,
    pub store_dir: PathBuf,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: ARCHIVE_URL.to_string(),
            days: LOOKBACK_DAYS,
            timeout: Duration::from_secs(TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            cache_ttl: Some(Duration::from_secs(CACHE_TTL_SECS)),
            store_dir: PathBuf::from(STORE_DIR).join(ARCHIVE_SUBDIR),
        }
    }
}

/* ---------------- Extract ---------------- */

/// Which provider lists of the matchday map to read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderSelector {
    /// Every provider key, in sorted key order.
    All,
    /// Exactly this key; a matchday without it contributes nothing.
    Key(String),
}

/// Which betting models to keep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelSelector {
    All,
    /// Exact, case-sensitive match on `modelloScommessa`.
    Label(String),
}

impl ModelSelector {
    pub fn accepts(&self, label: Option<&str>) -> bool {
        match self {
            ModelSelector::All => true,
            ModelSelector::Label(want) => label == Some(want.as_str()),
        }
    }
}

/// What the extractor does with a bad record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Fail the whole extraction on the first bad record.
    Abort,
    /// Drop the bad unit (matchday or event), record the error, keep going.
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    pub provider: ProviderSelector,
    pub model: ModelSelector,
    pub on_error: ErrorPolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            provider: ProviderSelector::All,
            model: ModelSelector::All,
            on_error: ErrorPolicy::Skip,
        }
    }
}

/* ---------------- Segment ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Distinct matchdays in one championship.
    pub cycle_length: usize,
    /// Matchday number a new championship starts at.
    pub first_matchday: u32,
    /// Keep an incomplete previous championship instead of leaving it unassigned.
    pub keep_partial_previous: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            cycle_length: CYCLE_LENGTH,
            first_matchday: FIRST_MATCHDAY,
            keep_partial_previous: true,
        }
    }
}

/* ---------------- View ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CohortFilter {
    #[default]
    All,
    Current,
    Previous,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub cohort: CohortFilter,
    /// Rows where this team plays home or away.
    pub team: Option<String>,
    /// Bet descriptions to keep; empty keeps all.
    pub markets: Vec<String>,
    pub stats: bool,
}

/* ---------------- Export ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportType {
    SingleFile,
    PerTeam,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator for delimited formats.
    pub fn delim(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub export_type: ExportType,
    out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            export_type: ExportType::SingleFile,
            out_path: OutputPath::default(),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// File path for single-file exports, directory for per-team exports.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();

        match self.export_type {
            ExportType::SingleFile => {
                let stem = self.out_path.file_stem.to_string_lossy();
                let ext = match &self.out_path.user_ext {
                    Some(ext) => ext.to_string_lossy().into_owned(),
                    None => self.format.ext().to_string(),
                };
                path.push(format!("{stem}.{ext}"));
            }
            ExportType::PerTeam => { /* directory only */ }
        }
        path
    }

    /// Parse user text into dir + stem (+ extension when one was typed).
    /// Without an explicit extension the format decides it.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();

        match self.export_type {
            ExportType::SingleFile => {
                let p = Path::new(s);
                if let Some(parent) = p.parent() {
                    self.out_path.dir = parent.to_path_buf();
                }
                if let Some(stem) = p.file_stem() {
                    self.out_path.file_stem = stem.to_os_string();
                }
                self.out_path.user_ext = p.extension().map(|e| e.to_os_string());
            }
            ExportType::PerTeam => {
                self.out_path.dir = PathBuf::from(s);
                self.out_path.user_ext = None;
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
    user_ext: Option<OsString>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_RESULTS_SUBDIR),
            file_stem: OsString::from(DEFAULT_FILE),
            user_ext: None,
        }
    }
}
