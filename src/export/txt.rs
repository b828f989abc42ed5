use super::{create_output, log_generated, text_block, ExportSink, TXT_FILE};
use crate::models::AggregatedResult;
use crate::shortener::{shorten_or_original, UrlShortener};
use crate::{Error, Result};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

pub struct TxtSink {
    dir: PathBuf,
    shortener: Arc<dyn UrlShortener>,
}

impl TxtSink {
    pub fn new(dir: impl Into<PathBuf>, shortener: Arc<dyn UrlShortener>) -> Self {
        Self {
            dir: dir.into(),
            shortener,
        }
    }
}

impl ExportSink for TxtSink {
    fn name(&self) -> &'static str {
        "txt"
    }

    fn export(&self, result: &AggregatedResult) -> Result<()> {
        let (file, path) = create_output(&self.dir, TXT_FILE)?;
        let mut writer = BufWriter::new(file);

        for job in result {
            let link = shorten_or_original(self.shortener.as_ref(), &job.link);
            writer
                .write_all(text_block(job, &link).as_bytes())
                .map_err(|e| Error::write(&path, e))?;
        }

        writer.flush().map_err(|e| Error::write(&path, e))?;
        log_generated(&self.dir, result.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, Site};
    use pretty_assertions::assert_eq;

    struct Prefixing;

    impl UrlShortener for Prefixing {
        fn shorten(&self, url: &str) -> Result<String> {
            Ok(format!("short:{}", url))
        }
    }

    #[test]
    fn writes_blocks_separated_by_blank_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let mut first = Job::new(Site::Indeed);
        first.title = "A".to_string();
        first.link = "indeed.com/1".to_string();
        let second = Job::new(Site::ZipRecruiter);

        TxtSink::new(tmp.path(), Arc::new(Prefixing))
            .export(&AggregatedResult::new(vec![first, second]))
            .unwrap();

        let contents = std::fs::read_to_string(tmp.path().join(TXT_FILE)).unwrap();
        assert_eq!(
            contents,
            "Website: Indeed\nTitle: A\nLink: short:indeed.com/1\nCompany: \nLocation: \nDate Published: \n\n\
             Website: ZipRecruiter\nTitle: \nLink: \nCompany: \nLocation: \nDate Published: \n\n"
        );
    }
}
