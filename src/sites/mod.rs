//! Extraction descriptors for each supported recruiting site.

pub mod careerbuilder;
pub mod indeed;
pub mod linkedin;
pub mod ziprecruiter;

use crate::extractor::{SiteDescriptor, SiteExtractor};
use crate::models::Site;
use crate::Result;

pub fn descriptor(site: Site) -> &'static SiteDescriptor {
    match site {
        Site::Indeed => &indeed::DESCRIPTOR,
        Site::LinkedIn => &linkedin::DESCRIPTOR,
        Site::ZipRecruiter => &ziprecruiter::DESCRIPTOR,
        Site::CareerBuilder => &careerbuilder::DESCRIPTOR,
    }
}

pub fn extractor(site: Site) -> Result<SiteExtractor> {
    SiteExtractor::new(descriptor(site))
}
