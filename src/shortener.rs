use crate::{Error, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::warn;

const TINYURL_ENDPOINT: &str = "https://tinyurl.com/api-create.php";

/// Shortens links for text outputs where length matters.
pub trait UrlShortener {
    fn shorten(&self, url: &str) -> Result<String>;
}

pub struct TinyUrlShortener {
    client: Client,
    endpoint: String,
}

impl TinyUrlShortener {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Shorten {
                url: TINYURL_ENDPOINT.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: TINYURL_ENDPOINT.to_string(),
        })
    }
}

impl UrlShortener for TinyUrlShortener {
    fn shorten(&self, url: &str) -> Result<String> {
        let to_error = |e: reqwest::Error| Error::Shorten {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let short = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url)])
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(to_error)?;

        let short = short.trim();
        if short.is_empty() {
            return Err(Error::Shorten {
                url: url.to_string(),
                reason: "empty response".to_string(),
            });
        }
        Ok(short.to_string())
    }
}

/// Hands links back unchanged. Stands in when no shortening service is available.
pub struct Passthrough;

impl UrlShortener for Passthrough {
    fn shorten(&self, url: &str) -> Result<String> {
        Ok(url.to_string())
    }
}

/// Shortens `url`, falling back to the original link when the shortener fails.
///
/// Empty links are returned as-is without calling the shortener.
pub fn shorten_or_original(shortener: &dyn UrlShortener, url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    match shortener.shorten(url) {
        Ok(short) => short,
        Err(e) => {
            warn!(kind = e.kind(), url, "using unshortened link: {}", e);
            url.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Failing;

    impl UrlShortener for Failing {
        fn shorten(&self, url: &str) -> Result<String> {
            Err(Error::Shorten {
                url: url.to_string(),
                reason: "service unavailable".to_string(),
            })
        }
    }

    struct Counting(Cell<usize>);

    impl UrlShortener for Counting {
        fn shorten(&self, _url: &str) -> Result<String> {
            self.0.set(self.0.get() + 1);
            Ok("https://tinyurl.com/abc".to_string())
        }
    }

    #[test]
    fn failure_falls_back_to_original() {
        assert_eq!(
            shorten_or_original(&Failing, "https://x.com/job/1"),
            "https://x.com/job/1"
        );
    }

    #[test]
    fn success_uses_short_link() {
        let shortener = Counting(Cell::new(0));
        assert_eq!(
            shorten_or_original(&shortener, "https://x.com/job/1"),
            "https://tinyurl.com/abc"
        );
        assert_eq!(shortener.0.get(), 1);
    }

    #[test]
    fn passthrough_keeps_link() {
        assert_eq!(
            shorten_or_original(&Passthrough, "https://x.com/job/1"),
            "https://x.com/job/1"
        );
    }

    #[test]
    fn empty_link_is_not_shortened() {
        let shortener = Counting(Cell::new(0));
        assert_eq!(shorten_or_original(&shortener, ""), "");
        assert_eq!(shortener.0.get(), 0);
    }
}
