use super::{create_output, log_generated, ExportSink, JSON_FILE};
use crate::models::{AggregatedResult, Job};
use crate::shortener::{shorten_or_original, UrlShortener};
use crate::{Error, Result};
use serde::{Serialize, Serializer};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

pub struct JsonSink {
    dir: PathBuf,
    shortener: Arc<dyn UrlShortener>,
}

#[derive(Debug, Serialize)]
struct Candidate<'a> {
    #[serde(rename = "Website")]
    website: &'a str,
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Link")]
    link: String,
    #[serde(rename = "Company")]
    company: &'a str,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "Date Published")]
    date_published: &'a str,
}

/// `{"Candidate #0": {...}, "Candidate #1": {...}}` in aggregation order.
struct Candidates<'a>(Vec<Candidate<'a>>);

impl Serialize for Candidates<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .enumerate()
                .map(|(index, candidate)| (format!("Candidate #{}", index), candidate)),
        )
    }
}

impl JsonSink {
    pub fn new(dir: impl Into<PathBuf>, shortener: Arc<dyn UrlShortener>) -> Self {
        Self {
            dir: dir.into(),
            shortener,
        }
    }

    fn candidate<'a>(&self, job: &'a Job) -> Candidate<'a> {
        Candidate {
            website: job.site().as_str(),
            title: &job.title,
            link: shorten_or_original(self.shortener.as_ref(), &job.link),
            company: &job.company,
            location: &job.location,
            date_published: &job.date,
        }
    }
}

impl ExportSink for JsonSink {
    fn name(&self) -> &'static str {
        "json"
    }

    fn export(&self, result: &AggregatedResult) -> Result<()> {
        let candidates = Candidates(result.iter().map(|job| self.candidate(job)).collect());

        let (file, path) = create_output(&self.dir, JSON_FILE)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &candidates).map_err(|e| Error::write(&path, e))?;
        writer.flush().map_err(|e| Error::write(&path, e))?;

        log_generated(&self.dir, result.len());
        Ok(())
    }
}
