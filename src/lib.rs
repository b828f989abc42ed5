pub mod aggregator;
pub mod config;
pub mod error;
pub mod export;
pub mod extractor;
pub mod fetcher;
pub mod messaging;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod shortener;
pub mod sites;

pub use aggregator::aggregate;
pub use config::{FetchConfig, SearchQuery, SiteTable, SiteTemplate};
pub use error::Error;
pub use export::{CsvSink, ExportSink, JsonSink, SmsSink, TxtSink};
pub use extractor::{SiteDescriptor, SiteExtractor};
pub use fetcher::{ChromeFetcher, HtmlFetcher};
pub use messaging::{Carrier, Messenger, SenderCredentials, SmtpMessenger};
pub use models::{AggregatedResult, Job, JobBatch, Site};
pub use normalizer::normalize;
pub use pipeline::{PipelineWithJobs, ScrapePipeline};
pub use shortener::{Passthrough, TinyUrlShortener, UrlShortener};

pub type Result<T> = std::result::Result<T, Error>;
