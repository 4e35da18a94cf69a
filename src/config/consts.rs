// src/config/consts.rs

// Net config
pub const ARCHIVE_URL: &str =
    "https://betting.sisal.it/api/vrol-api/vrol/archivio/getArchivioGareCampionato/1/3/6/";
pub const USER_AGENT: &str = "Mozilla/5.0";
pub const TIMEOUT_SECS: u64 = 10;
pub const DAY_FORMAT: &str = "%d-%m-%Y";
pub const LOOKBACK_DAYS: usize = 14;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const ARCHIVE_SUBDIR: &str = "archive";
pub const CACHE_TTL_SECS: u64 = 3600;

// Payload shape
pub const FIXTURE_SEP: &str = " - ";
pub const ODDS_SCALE: f64 = 100.0;

// Championship cycle
pub const CYCLE_LENGTH: usize = 22;
pub const FIRST_MATCHDAY: u32 = 1;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_RESULTS_SUBDIR: &str = "results";
pub const DEFAULT_FILE: &str = "archive";
