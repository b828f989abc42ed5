use crate::extractor::{FieldRule, SiteDescriptor};
use crate::models::{Field, Site};

// title and location live on the card element's own data attributes
pub static DESCRIPTOR: SiteDescriptor = SiteDescriptor {
    site: Site::ZipRecruiter,
    card: "article.job_result",
    rules: &[
        FieldRule::card_attr("data-job-title", Field::Title),
        FieldRule::card_attr("data-location", Field::Location),
        FieldRule::attr("div.job_title_and_org a.job_link", "href", Field::Link),
        FieldRule::text("div.job_title_and_org a.t_org_link", Field::Company),
    ],
};
