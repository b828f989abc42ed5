use super::{create_output, log_generated, ExportSink, CSV_FILE};
use crate::models::AggregatedResult;
use crate::{Error, Result};
use csv::{Terminator, WriterBuilder};
use std::path::PathBuf;

/// Spreadsheet-friendly rows; the link column is a `HYPERLINK` formula.
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

pub(crate) fn hyperlink(url: &str) -> String {
    format!("=HYPERLINK(\"{}\",\"Application Link\")", url)
}

impl ExportSink for CsvSink {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn export(&self, result: &AggregatedResult) -> Result<()> {
        let (file, path) = create_output(&self.dir, CSV_FILE)?;
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);

        for job in result {
            writer
                .write_record([
                    job.site().as_str(),
                    job.title.as_str(),
                    hyperlink(&job.link).as_str(),
                    job.company.as_str(),
                    job.location.as_str(),
                    job.date.as_str(),
                ])
                .map_err(|e| Error::write(&path, e))?;
        }

        writer.flush().map_err(|e| Error::write(&path, e))?;
        log_generated(&self.dir, result.len());
        Ok(())
    }
}
