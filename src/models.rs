use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The recruiting sites a search can run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Site {
    Indeed,
    LinkedIn,
    ZipRecruiter,
    CareerBuilder,
}

impl Site {
    /// Every site, in the order an all-sites run visits them.
    pub const ALL: [Site; 4] = [
        Site::Indeed,
        Site::LinkedIn,
        Site::ZipRecruiter,
        Site::CareerBuilder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indeed => "Indeed",
            Self::LinkedIn => "LinkedIn",
            Self::ZipRecruiter => "ZipRecruiter",
            Self::CareerBuilder => "CareerBuilder",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Site {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Site::ALL
            .into_iter()
            .find(|site| site.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown site '{}' (expected one of: Indeed, LinkedIn, ZipRecruiter, CareerBuilder)",
                    s
                )
            })
    }
}

/// Text fields of a [`Job`] that extraction rules can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Link,
    Company,
    Location,
    Date,
}

/// One job posting scraped from a results page.
///
/// Every field is always present; anything the page did not provide is the
/// empty string. `site` is fixed when the record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    site: Site,
    pub title: String,
    pub link: String,
    pub company: String,
    pub location: String,
    pub date: String,
}

impl Job {
    pub fn new(site: Site) -> Self {
        Self {
            site,
            title: String::new(),
            link: String::new(),
            company: String::new(),
            location: String::new(),
            date: String::new(),
        }
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Company => &mut self.company,
            Field::Location => &mut self.location,
            Field::Date => &mut self.date,
        }
    }
}

/// The records one extractor pass produced for one site, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobBatch {
    pub site: Site,
    pub jobs: Vec<Job>,
}

impl JobBatch {
    pub fn new(site: Site, jobs: Vec<Job>) -> Self {
        Self { site, jobs }
    }
}

/// All batches of a run concatenated in request order. This is what sinks read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedResult {
    jobs: Vec<Job>,
}

impl AggregatedResult {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }
}

impl<'a> IntoIterator for &'a AggregatedResult {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}
