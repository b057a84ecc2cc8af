//! HTTP fetcher for vendor price pages.
//!
//! One GET per URL, no retry. After every successful request the fetcher
//! pauses for a jittered delay before returning so consecutive requests to
//! the same host stay spaced out.

use std::time::Duration;

use chardetng::EncodingDetector;
use metalprice_core::AppConfig;
use rand::Rng;
use reqwest::Client;

use crate::error::ScraperError;

pub struct Fetcher {
    client: Client,
    delay_min_ms: u64,
    delay_max_ms: u64,
}

impl Fetcher {
    /// Creates a `Fetcher` with a fixed request timeout, `User-Agent` and
    /// post-request delay bounds in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::ClientBuild`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        delay_min_ms: u64,
        delay_max_ms: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(ScraperError::ClientBuild)?;
        Ok(Self {
            client,
            delay_min_ms,
            delay_max_ms: delay_max_ms.max(delay_min_ms),
        })
    }

    /// # Errors
    ///
    /// See [`Fetcher::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.request_delay_min_ms,
            config.request_delay_max_ms,
        )
    }

    /// Fetches `url` and returns the decoded HTML body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx status.
    /// - [`ScraperError::Http`]: connection failure, timeout or body read error.
    pub async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        tracing::debug!(url, "fetching price page");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .header(reqwest::header::ACCEPT_LANGUAGE, "ja,en;q=0.8")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let bytes = response.bytes().await?;
        let body = decode_body(&bytes);

        self.pause().await;
        Ok(body)
    }

    async fn pause(&self) {
        if self.delay_max_ms == 0 {
            return;
        }
        let delay_ms = rand::rng().random_range(self.delay_min_ms..=self.delay_max_ms);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

/// Decodes a response body without trusting the declared charset.
///
/// Valid UTF-8 is taken as is; anything else is decoded with the encoding
/// guessed from the bytes (Shift_JIS and EUC-JP are common on vendor pages).
pub(crate) fn decode_body(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_owned();
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "body decoded with replacement characters");
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_body_passes_utf8_through() {
        assert_eq!(decode_body("ピカ線 1,600円".as_bytes()), "ピカ線 1,600円");
    }

    #[test]
    fn decode_body_detects_shift_jis() {
        let (bytes, _, _) = encoding_rs::SHIFT_JIS
            .encode(concat!(
                "<html><head><title>本日の金属スクラップ買取価格表</title></head><body>",
                "<p>銅・真鍮・アルミなどの非鉄金属を高価買取いたします。</p>",
                "<table><tr><td>ピカ線</td><td>1,600円</td></tr>",
                "<tr><td>込銅</td><td>1,450円</td></tr></table></body></html>",
            ));
        let decoded = decode_body(&bytes);
        assert!(decoded.contains("ピカ線"), "decoded: {decoded}");
        assert!(decoded.contains("1,600円"));
    }

    #[test]
    fn inverted_delay_bounds_are_clamped() {
        let fetcher = Fetcher::new(5, "test-agent", 500, 100).unwrap();
        assert_eq!(fetcher.delay_max_ms, 500);
    }
}
