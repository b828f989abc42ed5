use crate::extractor::{FieldRule, SiteDescriptor};
use crate::models::{Field, Site};

pub static DESCRIPTOR: SiteDescriptor = SiteDescriptor {
    site: Site::CareerBuilder,
    card: "div.data-results li.data-results-content-parent",
    rules: &[
        FieldRule::text("div.data-results-publish-time", Field::Date),
        FieldRule::text("div.data-results-title", Field::Title),
        FieldRule::details("div.data-details"),
        FieldRule::attr("a.data-results-content", "href", Field::Link)
            .with_prefix("https://www.careerbuilder.com/"),
    ],
};
