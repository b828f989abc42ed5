use crate::models::{AggregatedResult, JobBatch};
use crate::Result;
use tracing::warn;

/// Concatenates batches in the order given, keeping each batch's own order.
///
/// A failed batch contributes nothing; it is logged and the rest still count.
pub fn aggregate<I>(batches: I) -> AggregatedResult
where
    I: IntoIterator<Item = Result<JobBatch>>,
{
    let mut jobs = Vec::new();
    for batch in batches {
        match batch {
            Ok(batch) => jobs.extend(batch.jobs),
            Err(e) => warn!(kind = e.kind(), "skipping batch: {}", e),
        }
    }
    AggregatedResult::new(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, Site};
    use crate::Error;
    use pretty_assertions::assert_eq;

    fn batch(site: Site, titles: &[&str]) -> JobBatch {
        let jobs = titles
            .iter()
            .map(|title| {
                let mut job = Job::new(site);
                job.title = title.to_string();
                job
            })
            .collect();
        JobBatch::new(site, jobs)
    }

    #[test]
    fn preserves_site_then_document_order() {
        let result = aggregate([
            Ok(batch(Site::Indeed, &["i1", "i2"])),
            Ok(batch(Site::LinkedIn, &["l1", "l2", "l3"])),
        ]);

        let seen: Vec<_> = result
            .iter()
            .map(|job| (job.site(), job.title.as_str()))
            .collect();
        assert_eq!(
            seen,
            vec![
                (Site::Indeed, "i1"),
                (Site::Indeed, "i2"),
                (Site::LinkedIn, "l1"),
                (Site::LinkedIn, "l2"),
                (Site::LinkedIn, "l3"),
            ]
        );
    }

    #[test]
    fn failed_batch_contributes_nothing() {
        let result = aggregate([
            Ok(batch(Site::Indeed, &["i1", "i2"])),
            Err(Error::MissingHtmlData {
                site: Site::LinkedIn,
            }),
            Ok(batch(Site::ZipRecruiter, &[])),
        ]);

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|job| job.site() == Site::Indeed));
    }

    #[test]
    fn no_batches_is_empty() {
        assert!(aggregate(Vec::new()).is_empty());
    }
}
