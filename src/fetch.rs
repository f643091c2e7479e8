//! Retrieves one day of ceilometer samples from the remote archive.

use std::{str::Utf8Error, time::Duration};

use chrono::NaiveDate;
use indicatif::ProgressBar;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    calendar::date_label,
    download::download_text,
    reading::{parse_feed, DailyRecord, FeedError},
};

pub const DEFAULT_BASE_URL: &str = "https://skywatch.colorado.edu/data/";
pub const DEFAULT_DATASET: &str = "ceil_";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(StatusCode),
    #[error("feed is not valid UTF-8: {0}")]
    Encoding(Utf8Error),
    #[error("malformed feed: {0}")]
    Feed(#[from] FeedError),
}

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    base_url: String,
    dataset: String,
}

impl Fetcher {
    pub fn new(base_url: &str, dataset: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Fetcher {
            client: builder.build()?,
            base_url,
            dataset: dataset.to_string(),
        })
    }

    /// Feed location for `date`: base, dataset tag, then `YY_MM_DD.dat`.
    pub fn url_for(&self, date: NaiveDate) -> String {
        let label = date_label(date);
        let suffix = label.get(2..).unwrap_or(&label);

        format!("{}{}{}.dat", self.base_url, self.dataset, suffix)
    }

    /// Downloads and parses the feed for `date`.
    pub async fn fetch(&self, date: NaiveDate, progress_bar: &ProgressBar) -> Result<DailyRecord, FetchError> {
        let url = self.url_for(date);
        debug!("Reading: {}", url);

        let text = download_text(&self.client, &url, progress_bar).await?;
        Ok(parse_feed(&text, date)?)
    }

    /// Like [`Fetcher::fetch`] but falls back to an empty record for `date`,
    /// handing back the reason alongside.
    pub async fn fetch_or_empty(
        &self,
        date: NaiveDate,
        progress_bar: &ProgressBar,
    ) -> (DailyRecord, Option<FetchError>) {
        match self.fetch(date, progress_bar).await {
            Ok(record) => (record, None),
            Err(e) => {
                warn!("Feed not read for {}: {}", date_label(date), e);
                (DailyRecord::empty(date), Some(e))
            }
        }
    }
}

// -- Tests -------------------------------------------------------------------
