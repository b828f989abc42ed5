use crate::models::Site;
use crate::{Error, Result};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Upper bound on how long a results page may take to load
    pub page_timeout: Duration,
    pub headless: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_timeout: Duration::from_secs(100),
            headless: true,
        }
    }
}

/// What to search for. Shared by every site in a run.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub terms: String,
    pub location: String,
    /// Days since posted. Only some sites take it.
    pub days: String,
    /// Description keywords. Carried along but not used to filter results.
    pub keywords: Vec<String>,
}

/// URL templates for one site.
///
/// `search` may contain `{terms}`, `{location}` and `{days}` placeholders.
/// `domain` is the prefix a rendered page must still be on to count as loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteTemplate {
    pub search: String,
    pub domain: String,
}

impl SiteTemplate {
    pub fn new(search: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            domain: domain.into(),
        }
    }

    pub fn expand(&self, query: &SearchQuery) -> String {
        self.search
            .replace("{terms}", &query.terms.replace(' ', "+"))
            .replace("{location}", &query.location.replace(' ', "+"))
            .replace("{days}", &query.days)
    }
}

/// Site → URL template lookup, built once at startup and passed to whoever needs it.
#[derive(Debug, Clone)]
pub struct SiteTable {
    templates: HashMap<Site, SiteTemplate>,
}

impl SiteTable {
    pub fn new(templates: HashMap<Site, SiteTemplate>) -> Self {
        Self { templates }
    }

    pub fn template(&self, site: Site) -> Result<&SiteTemplate> {
        self.templates
            .get(&site)
            .ok_or(Error::MissingTemplate { site })
    }

    pub fn search_url(&self, site: Site, query: &SearchQuery) -> Result<String> {
        self.template(site).map(|template| template.expand(query))
    }
}

impl Default for SiteTable {
    fn default() -> Self {
        let templates = HashMap::from([
            (
                Site::Indeed,
                SiteTemplate::new(
                    "https://www.indeed.com/jobs?q={terms}&l={location}&fromage={days}&",
                    "https://www.indeed.com/",
                ),
            ),
            (
                Site::LinkedIn,
                // f_TPR=r2592000 limits results to the last 30 days
                SiteTemplate::new(
                    "https://www.linkedin.com/jobs/search/?keywords={terms}&location={location}&f_TPR=r2592000",
                    "https://www.linkedin.com/",
                ),
            ),
            (
                Site::ZipRecruiter,
                SiteTemplate::new(
                    "https://www.ziprecruiter.com/candidate/search?form=jobs-landing&search={terms}&location={location}",
                    "https://www.ziprecruiter.com/",
                ),
            ),
            (
                Site::CareerBuilder,
                SiteTemplate::new(
                    "https://www.careerbuilder.com/jobs?keywords={terms}&location={location}&posted={days}",
                    "https://www.careerbuilder.com/",
                ),
            ),
        ]);
        Self::new(templates)
    }
}
