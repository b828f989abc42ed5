use crate::extractor::{FieldRule, SiteDescriptor};
use crate::models::{Field, Site};

pub static DESCRIPTOR: SiteDescriptor = SiteDescriptor {
    site: Site::LinkedIn,
    card: "div.base-card",
    rules: &[
        FieldRule::attr("a.base-card__full-link", "href", Field::Link),
        FieldRule::text(
            "div.base-search-card__info h3.base-search-card__title",
            Field::Title,
        ),
        FieldRule::text(
            "div.base-search-card__info h4.base-search-card__subtitle a.hidden-nested-link",
            Field::Company,
        ),
        FieldRule::text(
            "div.base-search-card__metadata span.job-search-card__location",
            Field::Location,
        ),
        FieldRule::attr(
            "div.base-search-card__metadata time.job-search-card__listdate",
            "datetime",
            Field::Date,
        ),
    ],
};
