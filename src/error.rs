use crate::models::Site;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the scraping pipeline.
///
/// None of these abort a run. Each is caught where the failing unit (a site
/// batch, a sink, a link) is handled, logged with [`Error::kind`], and the unit
/// contributes nothing.
#[derive(Debug, Error)]
pub enum Error {
    /// No document could be retrieved for a site.
    #[error("no data retrieved for '{site}' from {url}: {reason}")]
    Fetch {
        site: Site,
        url: String,
        reason: String,
    },

    /// An extractor was handed an empty document.
    #[error("missing HTML data for '{site}'")]
    MissingHtmlData { site: Site },

    /// A sink could not create its directory or write its file.
    #[error("failed writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The messaging collaborator rejected a send.
    #[error("failed sending message to {destination}: {reason}")]
    Transport { destination: String, reason: String },

    /// The URL shortening collaborator failed.
    #[error("failed shortening {url}: {reason}")]
    Shorten { url: String, reason: String },

    /// A site descriptor carries a selector that does not parse.
    #[error("invalid selector `{selector}` for '{site}': {reason}")]
    InvalidSelector {
        site: Site,
        selector: &'static str,
        reason: String,
    },

    /// The site table has no search URL template for a site.
    #[error("no URL template configured for '{site}'")]
    MissingTemplate { site: Site },
}

impl Error {
    /// Label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "FetchFailure",
            Self::MissingHtmlData { .. } => "MissingHtmlData",
            Self::Write { .. } => "WriteFailure",
            Self::Transport { .. } => "TransportFailure",
            Self::Shorten { .. } => "ShortenFailure",
            Self::InvalidSelector { .. } => "InvalidSelector",
            Self::MissingTemplate { .. } => "MissingTemplate",
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<std::io::Error>) -> Self {
        Self::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}
