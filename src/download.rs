//! Downloads a text feed over HTTP.

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::fetch::FetchError;

/// Downloads `url` as UTF-8 text, reporting bytes received on `progress_bar`.
pub async fn download_text(
    client: &Client,
    url: &str,
    progress_bar: &ProgressBar,
) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    // Switch the spinner to a byte counter when the size is known
    let total_size = response.content_length().unwrap_or(0);
    if total_size > 0 {
        progress_bar.set_length(total_size);
        if let Ok(style) = ProgressStyle::with_template(
            "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {eta}",
        ) {
            progress_bar.set_style(style.progress_chars("=> "));
        }
    }

    // Content-Length is untrusted and only feeds the progress bar
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        body.extend_from_slice(&chunk);
        progress_bar.set_position(body.len() as u64);
    }

    String::from_utf8(body).map_err(|e| FetchError::Encoding(e.utf8_error()))
}

// -- Tests -------------------------------------------------------------------
