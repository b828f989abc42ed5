use crate::config::{FetchConfig, SiteTable};
use crate::models::Site;
use crate::{Error, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use tracing::{debug, info};

/// Retrieves the rendered HTML of a search results page.
///
/// Implementations either return the document or an [`Error::Fetch`]; they
/// never hand back content from somewhere other than the requested site.
pub trait HtmlFetcher {
    fn fetch(&self, url: &str, site: Site) -> Result<String>;
}

/// Renders pages in a headless Chrome, one fresh browser per fetch.
pub struct ChromeFetcher {
    sites: SiteTable,
    config: FetchConfig,
}

impl ChromeFetcher {
    pub fn new(sites: SiteTable, config: FetchConfig) -> Self {
        Self { sites, config }
    }

    fn create_browser(&self, site: Site, url: &str) -> Result<Browser> {
        Browser::new(LaunchOptions {
            headless: self.config.headless,
            idle_browser_timeout: self.config.page_timeout,
            ..Default::default()
        })
        .map_err(|e| self.fetch_error(site, url, e))
    }

    fn wait_for_page_load(&self, tab: &Arc<Tab>, site: Site) -> Result<()> {
        let domain = &self.sites.template(site)?.domain;
        tab.wait_until_navigated()
            .map_err(|e| self.fetch_error(site, tab.get_url(), e))?;

        let landed = tab.get_url();
        if !landed.contains(domain.as_str()) {
            return Err(Error::Fetch {
                site,
                url: landed,
                reason: format!("navigation left {}", domain),
            });
        }
        Ok(())
    }

    fn fetch_error(&self, site: Site, url: impl Into<String>, reason: impl std::fmt::Display) -> Error {
        Error::Fetch {
            site,
            url: url.into(),
            reason: format!("{:#}", reason),
        }
    }
}

impl HtmlFetcher for ChromeFetcher {
    fn fetch(&self, url: &str, site: Site) -> Result<String> {
        info!(%site, "waiting for response from '{}' ...", url);

        let browser = self.create_browser(site, url)?;
        let tab = browser.new_tab().map_err(|e| self.fetch_error(site, url, e))?;
        tab.set_default_timeout(self.config.page_timeout);
        tab.navigate_to(url)
            .map_err(|e| self.fetch_error(site, url, e))?;

        self.wait_for_page_load(&tab, site)?;

        let html = tab.get_content().map_err(|e| self.fetch_error(site, url, e))?;
        debug!(%site, bytes = html.len(), "page content retrieved");
        Ok(html)
    }
}
