//! Export sinks. Each consumes the whole aggregated result on its own.

mod csv;
mod json;
mod sms;
mod txt;

pub use self::csv::CsvSink;
pub use self::json::JsonSink;
pub use self::sms::SmsSink;
pub use self::txt::TxtSink;

use crate::models::{AggregatedResult, Job};
use crate::{Error, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

pub const CSV_FILE: &str = "Job_List.csv";
pub const TXT_FILE: &str = "Job_List.txt";
pub const JSON_FILE: &str = "Job_List.json";

pub trait ExportSink {
    fn name(&self) -> &'static str;

    fn export(&self, result: &AggregatedResult) -> Result<()>;
}

/// Creates (or truncates) `file_name` inside `dir`, creating `dir` if needed.
pub(crate) fn create_output(dir: &Path, file_name: &str) -> Result<(File, PathBuf)> {
    if !dir.exists() {
        info!("no output folder at '{}', creating one ...", dir.display());
        fs::create_dir_all(dir).map_err(|e| Error::write(dir, e))?;
    }

    let path = dir.join(file_name);
    info!("writing data to '{}' ...", file_name);
    let file = File::create(&path).map_err(|e| Error::write(&path, e))?;
    Ok((file, path))
}

pub(crate) fn log_generated(dir: &Path, count: usize) {
    info!(
        "file generated successfully at '{}' ({} candidate(s))",
        dir.display(),
        count
    );
}

/// The multi-line block shared by the text and SMS outputs.
pub(crate) fn text_block(job: &Job, link: &str) -> String {
    format!(
        "Website: {}\nTitle: {}\nLink: {}\nCompany: {}\nLocation: {}\nDate Published: {}\n\n",
        job.site(),
        job.title,
        link,
        job.company,
        job.location,
        job.date
    )
}
