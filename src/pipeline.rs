//! Drives a run: fetch each requested site, extract, normalize, aggregate, export.

use crate::aggregator::aggregate;
use crate::config::{SearchQuery, SiteTable};
use crate::export::ExportSink;
use crate::fetcher::HtmlFetcher;
use crate::models::{AggregatedResult, JobBatch, Site};
use crate::normalizer::normalize;
use crate::{sites, Result};
use tracing::{error, info};

pub struct ScrapePipeline<'a> {
    sites: &'a SiteTable,
    fetcher: &'a dyn HtmlFetcher,
}

#[must_use = "pipeline results are only written out by .export()"]
pub struct PipelineWithJobs {
    result: AggregatedResult,
    /// Whether any requested site produced a batch, even an empty one.
    parsed: bool,
}

impl<'a> ScrapePipeline<'a> {
    pub fn new(sites: &'a SiteTable, fetcher: &'a dyn HtmlFetcher) -> Self {
        Self { sites, fetcher }
    }

    /// Scrapes one site, or every site in [`Site::ALL`] order when `site` is `None`.
    ///
    /// A site that fails contributes nothing; the others still run. Failures
    /// are logged once, by [`aggregate`].
    pub fn collect(&self, site: Option<Site>, query: &SearchQuery) -> PipelineWithJobs {
        let targets = match site {
            Some(site) => vec![site],
            None => Site::ALL.to_vec(),
        };

        let mut parsed = false;
        let batches = targets.into_iter().map(|site| {
            info!(%site, "beginning scraping pass for '{}' ...", site);
            self.scrape_site(site, query).inspect(|_| parsed = true)
        });
        let result = aggregate(batches);

        PipelineWithJobs { result, parsed }
    }

    fn scrape_site(&self, site: Site, query: &SearchQuery) -> Result<JobBatch> {
        let url = self.sites.search_url(site, query)?;
        let html = self.fetcher.fetch(&url, site)?;

        info!(%site, "beginning html parsing ...");
        let jobs: Vec<_> = sites::extractor(site)?
            .extract(&html)?
            .into_iter()
            .map(normalize)
            .collect();
        info!(%site, "{} candidate(s) found", jobs.len());

        Ok(JobBatch::new(site, jobs))
    }
}

impl PipelineWithJobs {
    pub fn result(&self) -> &AggregatedResult {
        &self.result
    }

    /// Hands the result to `sink`, even when it holds no records, so each run
    /// replaces the previous run's output. Only a run where every site failed
    /// leaves the sinks untouched.
    ///
    /// A failing sink is logged and does not affect any other sink.
    pub fn export(self, sink: &dyn ExportSink) -> Self {
        if !self.parsed {
            info!(sink = sink.name(), "no page was parsed, nothing to export");
            return self;
        }
        if self.result.is_empty() {
            info!(sink = sink.name(), "exporting an empty result");
        }
        if let Err(e) = sink.export(&self.result) {
            error!(kind = e.kind(), sink = sink.name(), "{}", e);
        }
        self
    }

    pub fn export_all(self, sinks: &[Box<dyn ExportSink>]) -> AggregatedResult {
        sinks
            .iter()
            .fold(self, |pipeline, sink| pipeline.export(sink.as_ref()))
            .result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::Level;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Serves canned pages and records which sites were asked for.
    struct CannedFetcher {
        pages: HashMap<Site, String>,
        requested: RefCell<Vec<Site>>,
    }

    impl CannedFetcher {
        fn new(pages: &[(Site, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(site, html)| (*site, html.to_string()))
                    .collect(),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl HtmlFetcher for CannedFetcher {
        fn fetch(&self, url: &str, site: Site) -> Result<String> {
            self.requested.borrow_mut().push(site);
            self.pages.get(&site).cloned().ok_or_else(|| Error::Fetch {
                site,
                url: url.to_string(),
                reason: "timed out".to_string(),
            })
        }
    }

    const INDEED_PAGE: &str = r#"
        <div class="job_seen_beacon"><h2 class="jobTitle"><span title=" First "></span></h2></div>
        <div class="job_seen_beacon"><h2 class="jobTitle"><span title="Second"></span></h2></div>
    "#;

    #[test]
    fn all_sites_visits_in_declaration_order() {
        let fetcher = CannedFetcher::new(&[]);
        let table = SiteTable::default();
        let result = ScrapePipeline::new(&table, &fetcher).collect(None, &SearchQuery::default());

        assert!(result.result().is_empty());
        assert_eq!(*fetcher.requested.borrow(), Site::ALL.to_vec());
    }

    #[test]
    fn failure_keeps_earlier_sites() {
        let fetcher = CannedFetcher::new(&[(Site::Indeed, INDEED_PAGE)]);
        let table = SiteTable::default();
        let pipeline = ScrapePipeline::new(&table, &fetcher).collect(None, &SearchQuery::default());

        let titles: Vec<_> = pipeline.result().iter().map(|job| job.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn single_site_fetches_only_that_site() {
        let fetcher = CannedFetcher::new(&[(Site::Indeed, INDEED_PAGE)]);
        let table = SiteTable::default();
        let pipeline = ScrapePipeline::new(&table, &fetcher)
            .collect(Some(Site::LinkedIn), &SearchQuery::default());

        assert!(pipeline.result().is_empty());
        assert_eq!(*fetcher.requested.borrow(), vec![Site::LinkedIn]);
    }

    #[test]
    fn empty_page_is_a_failed_batch() {
        let fetcher = CannedFetcher::new(&[(Site::Indeed, ""), (Site::LinkedIn, "")]);
        let table = SiteTable::default();
        let pipeline = ScrapePipeline::new(&table, &fetcher).collect(None, &SearchQuery::default());
        assert!(pipeline.result().is_empty());
    }

    #[test]
    fn missing_template_skips_site_without_fetching() {
        let fetcher = CannedFetcher::new(&[(Site::Indeed, INDEED_PAGE)]);
        let table = SiteTable::new(HashMap::new());
        let pipeline = ScrapePipeline::new(&table, &fetcher).collect(None, &SearchQuery::default());

        assert!(pipeline.result().is_empty());
        assert!(fetcher.requested.borrow().is_empty());
    }

    struct Counting(RefCell<usize>);

    impl ExportSink for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn export(&self, result: &AggregatedResult) -> Result<()> {
            *self.0.borrow_mut() += result.len();
            Ok(())
        }
    }

    struct Broken;

    impl ExportSink for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn export(&self, _result: &AggregatedResult) -> Result<()> {
            Err(Error::write("Files/Job_List.txt", std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn failing_sink_does_not_stop_others() {
        let fetcher = CannedFetcher::new(&[(Site::Indeed, INDEED_PAGE)]);
        let table = SiteTable::default();
        let counting = Counting(RefCell::new(0));

        let result = ScrapePipeline::new(&table, &fetcher)
            .collect(Some(Site::Indeed), &SearchQuery::default())
            .export(&Broken)
            .export(&counting);

        assert_eq!(*counting.0.borrow(), 2);
        assert_eq!(result.result().len(), 2);
    }

    struct Calls(RefCell<usize>);

    impl ExportSink for Calls {
        fn name(&self) -> &'static str {
            "calls"
        }

        fn export(&self, _result: &AggregatedResult) -> Result<()> {
            *self.0.borrow_mut() += 1;
            Ok(())
        }
    }

    #[test]
    fn page_without_cards_still_reaches_sinks() {
        let fetcher = CannedFetcher::new(&[(Site::Indeed, "<html><body></body></html>")]);
        let table = SiteTable::default();
        let calls = Calls(RefCell::new(0));

        let pipeline = ScrapePipeline::new(&table, &fetcher)
            .collect(Some(Site::Indeed), &SearchQuery::default())
            .export(&calls);

        assert!(pipeline.result().is_empty());
        assert_eq!(*calls.0.borrow(), 1);
    }

    #[test]
    fn every_site_failing_skips_sinks() {
        let fetcher = CannedFetcher::new(&[]);
        let table = SiteTable::default();
        let calls = Calls(RefCell::new(0));

        let _ = ScrapePipeline::new(&table, &fetcher)
            .collect(None, &SearchQuery::default())
            .export(&calls);

        assert_eq!(*calls.0.borrow(), 0);
    }

    /// Counts events at warn level or above.
    struct Alarms(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for Alarms {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let level = *event.metadata().level();
            if level == Level::WARN || level == Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn failed_site_is_logged_once() {
        let alarms = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(Alarms(Arc::clone(&alarms)));
        let fetcher = CannedFetcher::new(&[(Site::Indeed, INDEED_PAGE)]);
        let table = SiteTable::default();

        tracing::subscriber::with_default(subscriber, || {
            let _ = ScrapePipeline::new(&table, &fetcher).collect(None, &SearchQuery::default());
        });

        // LinkedIn, ZipRecruiter and CareerBuilder have no canned page
        assert_eq!(alarms.load(Ordering::SeqCst), 3);
    }
}
