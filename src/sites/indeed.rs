use crate::extractor::{FieldRule, SiteDescriptor};
use crate::models::{Field, Site};

pub static DESCRIPTOR: SiteDescriptor = SiteDescriptor {
    site: Site::Indeed,
    card: ".job_seen_beacon",
    rules: &[
        FieldRule::attr("h2.jobTitle span", "title", Field::Title),
        FieldRule::attr("h2.jobTitle a.jcs-JobTitle", "href", Field::Link).with_prefix("indeed.com"),
        FieldRule::text(
            r#"div.company_location a[data-tn-element="companyName"]"#,
            Field::Company,
        ),
        FieldRule::text("div.company_location div.companyLocation", Field::Location),
        // the card markup repeats the "Posted" label
        FieldRule::text("table.jobCardShelfContainer span.date", Field::Date)
            .with_replacements(&[("PostedPosted", "Posted")]),
    ],
};
