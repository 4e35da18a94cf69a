// src/store.rs
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use chrono::NaiveDate;

use crate::config::consts::DAY_FORMAT;
use crate::core::net::ArchiveSource;
use crate::error::FetchError;
use crate::specs::parse_payload;

/// Headers + string rows, the shape every export path consumes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.as_ref()?.iter().position(|h| h == name)
    }
}

/// Time-boxed on-disk memo of raw archive payloads, one file per day.
/// Serves a cached day while it is younger than `ttl`; otherwise asks the
/// inner source and rewrites the file. Only bodies that parse as a matchday
/// list are ever written or served.
pub struct CachedSource<S> {
    inner: S,
    dir: PathBuf,
    ttl: Duration,
}

impl<S: ArchiveSource> CachedSource<S> {
    pub fn new(inner: S, dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self { inner, dir: dir.into(), ttl }
    }

    pub fn path_for(&self, day: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.json", day.format(DAY_FORMAT)))
    }

    fn fresh(&self, path: &Path) -> Option<String> {
        let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
        let age = SystemTime::now().duration_since(modified).unwrap_or_default();
        if age > self.ttl {
            return None;
        }
        fs::read_to_string(path).ok().filter(|text| parse_payload(text).is_ok())
    }

    fn save(&self, path: &Path, text: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(path, text)
    }
}

impl<S: ArchiveSource> ArchiveSource for CachedSource<S> {
    fn fetch_day(&self, day: NaiveDate) -> Result<String, FetchError> {
        let path = self.path_for(day);
        if let Some(text) = self.fresh(&path) {
            logd!(%day, "archive day served from cache");
            return Ok(text);
        }

        let text = self.inner.fetch_day(day)?;
        if parse_payload(&text).is_err() {
            logd!(%day, "payload not cached: not a matchday list");
            return Ok(text);
        }
        // best-effort: a cache write failure must not lose the payload
        if let Err(e) = self.save(&path, &text) {
            logw!(path = %path.display(), "cache write failed: {e}");
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Counting { calls: Cell<usize> }

    impl ArchiveSource for Counting {
        fn fetch_day(&self, _day: NaiveDate) -> Result<String, FetchError> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!(r#"[{{"giornata": {}}}]"#, self.calls.get()))
        }
    }

    fn day() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 5, 1).unwrap() }

    #[test]
    fn second_read_hits_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let src = CachedSource::new(Counting { calls: Cell::new(0) }, dir.path(), Duration::from_secs(3600));

        let a = src.fetch_day(day()).unwrap();
        let b = src.fetch_day(day()).unwrap();
        assert_eq!(a, b);
        assert_eq!(src.inner.calls.get(), 1);
        assert!(src.path_for(day()).ends_with("01-05-2024.json"));
    }

    #[test]
    fn zero_ttl_refetches() {
        let dir = tempfile::tempdir().unwrap();
        let src = CachedSource::new(Counting { calls: Cell::new(0) }, dir.path(), Duration::ZERO);
        std::thread::sleep(Duration::from_millis(20));
        src.fetch_day(day()).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        src.fetch_day(day()).unwrap();
        assert_eq!(src.inner.calls.get(), 2);
    }

    #[test]
    fn dataset_column_lookup() {
        let ds = DataSet { headers: Some(vec!["Date".into(), "Home".into()]), rows: vec![] };
        assert_eq!(ds.column("Home"), Some(1));
        assert_eq!(ds.column("Away"), None);
        assert!(ds.is_empty());
    }

    /// Serves `replies` in turn, then repeats the last one.
    struct Scripted { replies: Vec<&'static str>, calls: Cell<usize> }

    impl ArchiveSource for Scripted {
        fn fetch_day(&self, _day: NaiveDate) -> Result<String, FetchError> {
            let n = self.calls.get();
            self.calls.set(n + 1);
            Ok(self.replies[n.min(self.replies.len() - 1)].to_string())
        }
    }

    #[test]
    fn maintenance_page_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let inner = Scripted { replies: vec!["<html>maintenance</html>", "[]"], calls: Cell::new(0) };
        let src = CachedSource::new(inner, dir.path(), Duration::from_secs(3600));

        assert_eq!(src.fetch_day(day()).unwrap(), "<html>maintenance</html>");
        assert!(!src.path_for(day()).exists());

        assert_eq!(src.fetch_day(day()).unwrap(), "[]");
        assert_eq!(src.fetch_day(day()).unwrap(), "[]");
        assert_eq!(src.inner.calls.get(), 2);
    }

    #[test]
    fn corrupt_cache_file_is_refetched() {
        let dir = tempfile::tempdir().unwrap();
        let src = CachedSource::new(Counting { calls: Cell::new(0) }, dir.path(), Duration::from_secs(3600));
        fs::write(src.path_for(day()), "[{\"giornata\": 1").unwrap();

        assert_eq!(src.fetch_day(day()).unwrap(), r#"[{"giornata": 1}]"#);
        assert_eq!(src.inner.calls.get(), 1);
    }
}
