// src/core/net.rs
//
// Blocking HTTP GET of one archive day. This is the only place the crate
// touches the network.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::config::consts::DAY_FORMAT;
use crate::config::options::FetchOptions;
use crate::error::FetchError;

/// Anything that can hand back the raw archive payload for one day.
pub trait ArchiveSource {
    fn fetch_day(&self, day: NaiveDate) -> Result<String, FetchError>;
}

impl<S: ArchiveSource + ?Sized> ArchiveSource for &S {
    fn fetch_day(&self, day: NaiveDate) -> Result<String, FetchError> {
        (**self).fetch_day(day)
    }
}

/// Live endpoint: `<base_url><dd-mm-yyyy>`.
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(opts: &FetchOptions) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(opts.user_agent.clone())
            .default_headers(headers)
            .timeout(opts.timeout)
            .build()?;

        Ok(Self { client, base_url: opts.base_url.clone() })
    }

    pub fn day_url(&self, day: NaiveDate) -> String {
        day_url(&self.base_url, day)
    }
}

impl ArchiveSource for HttpSource {
    fn fetch_day(&self, day: NaiveDate) -> Result<String, FetchError> {
        let url = self.day_url(day);
        logd!(%url, "GET archive day");

        self.client
            .get(&url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|source| FetchError::Http { day, source })
    }
}

pub fn day_url(base_url: &str, day: NaiveDate) -> String {
    format!("{}{}", base_url, day.format(DAY_FORMAT))
}
