use clap::Parser;
use job_scraper::{
    Carrier, ChromeFetcher, CsvSink, ExportSink, FetchConfig, JsonSink, Passthrough,
    ScrapePipeline, SearchQuery, SenderCredentials, Site, SiteTable, SmsSink, SmtpMessenger, TinyUrlShortener,
    TxtSink, UrlShortener,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Scrapes job search results and exports them.
#[derive(Debug, Parser)]
#[command(name = "job-scraper", version)]
struct Args {
    /// Site to scrape; every supported site when omitted
    #[arg(long)]
    site: Option<Site>,

    /// Job title keywords
    #[arg(long)]
    search: String,

    #[arg(long, default_value = "")]
    location: String,

    /// Days since posted
    #[arg(long, default_value = "")]
    days: String,

    /// Posting description keywords
    #[arg(long, num_args = 1..)]
    desc: Vec<String>,

    /// Write Job_List.csv
    #[arg(long)]
    csv: bool,

    /// Write Job_List.txt
    #[arg(long)]
    txt: bool,

    /// Write Job_List.json
    #[arg(long)]
    json: bool,

    /// Text the results to --phone
    #[arg(long)]
    sms: bool,

    #[arg(long, required_if_eq("sms", "true"))]
    phone: Option<String>,

    /// Carrier of --phone, e.g. verizon, tmobile, at&t
    #[arg(long, required_if_eq("sms", "true"))]
    carrier: Option<Carrier>,

    /// Sending email account
    #[arg(long, required_if_eq("sms", "true"))]
    email: Option<String>,

    /// Password or app password of --email
    #[arg(long, required_if_eq("sms", "true"))]
    app_password: Option<String>,

    #[arg(long, default_value = "smtp.gmail.com")]
    smtp_relay: String,

    /// Where output files go; defaults to a Files folder next to the executable
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Page load timeout in seconds
    #[arg(long, default_value_t = 100)]
    timeout_secs: u64,
}

impl Args {
    fn query(&self) -> SearchQuery {
        SearchQuery {
            terms: self.search.clone(),
            location: self.location.clone(),
            days: self.days.clone(),
            keywords: self.desc.clone(),
        }
    }

    fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
                .unwrap_or_default()
                .join("Files")
        })
    }

    /// TinyURL when it can be set up; otherwise links are written unshortened.
    fn shortener(&self) -> Arc<dyn UrlShortener> {
        if !(self.txt || self.json || self.sms) {
            return Arc::new(Passthrough);
        }
        match TinyUrlShortener::new(Duration::from_secs(10)) {
            Ok(shortener) => Arc::new(shortener),
            Err(e) => {
                warn!(kind = e.kind(), "links will not be shortened: {}", e);
                Arc::new(Passthrough)
            }
        }
    }

    fn sinks(&self, shortener: Arc<dyn UrlShortener>) -> Vec<Box<dyn ExportSink>> {
        let dir = self.output_dir();
        let mut sinks: Vec<Box<dyn ExportSink>> = Vec::new();

        if self.csv {
            sinks.push(Box::new(CsvSink::new(&dir)));
        }
        if self.txt {
            sinks.push(Box::new(TxtSink::new(&dir, Arc::clone(&shortener))));
        }
        if self.json {
            sinks.push(Box::new(JsonSink::new(&dir, Arc::clone(&shortener))));
        }
        if self.sms {
            if let (Some(phone), Some(carrier), Some(email), Some(password)) =
                (&self.phone, self.carrier, &self.email, &self.app_password)
            {
                let sender = SenderCredentials {
                    username: email.clone(),
                    password: password.clone(),
                };
                let messenger = SmtpMessenger::new(&self.smtp_relay, Duration::from_secs(30));
                sinks.push(Box::new(SmsSink::new(
                    phone.clone(),
                    carrier,
                    sender,
                    Box::new(messenger),
                    shortener,
                )));
            }
        }
        sinks
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let args = Args::parse();
    let started = Instant::now();

    let query = args.query();
    if !query.keywords.is_empty() {
        debug!(keywords = ?query.keywords, "description keywords are not applied to results");
    }

    let sites = SiteTable::default();
    let fetch_config = FetchConfig {
        page_timeout: Duration::from_secs(args.timeout_secs),
        ..Default::default()
    };
    let fetcher = ChromeFetcher::new(sites.clone(), fetch_config);

    let sinks = args.sinks(args.shortener());

    let result = ScrapePipeline::new(&sites, &fetcher)
        .collect(args.site, &query)
        .export_all(&sinks);

    info!(
        "script run successfully ({} candidate(s), {:.2} sec(s))",
        result.len(),
        started.elapsed().as_secs_f64()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(sinks: &[Box<dyn ExportSink>]) -> Vec<&'static str> {
        sinks.iter().map(|sink| sink.name()).collect()
    }

    #[test]
    fn unshortened_links_keep_every_requested_sink() {
        let args = Args::try_parse_from([
            "job-scraper",
            "--search",
            "rust",
            "--csv",
            "--txt",
            "--json",
            "--sms",
            "--phone",
            "5551234567",
            "--carrier",
            "verizon",
            "--email",
            "me@example.com",
            "--app-password",
            "secret",
            "--output-dir",
            "out",
        ])
        .unwrap();

        let sinks = args.sinks(Arc::new(Passthrough));
        assert_eq!(names(&sinks), vec!["csv", "txt", "json", "sms"]);
    }

    #[test]
    fn sms_requires_its_parameters() {
        let parsed = Args::try_parse_from(["job-scraper", "--search", "rust", "--sms"]);
        assert!(parsed.is_err());
    }
}
