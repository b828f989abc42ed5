//! Declarative card extraction shared by every site.
//!
//! A site is described by a [`SiteDescriptor`]: the selector of a job card and
//! an ordered list of [`FieldRule`]s. [`SiteExtractor`] compiles the selectors
//! once and walks every card in document order, applying each rule in turn.
//! Repairing a broken site means editing its descriptor, never this module.

use crate::models::{Field, Job, Site};
use crate::{Error, Result};
use scraper::{ElementRef, Html, Selector};

/// Where a rule reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Concatenated text of the element and its descendants.
    Text,
    /// A named attribute on the element.
    Attr(&'static str),
}

/// Where a rule writes its value to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Field(Field),
    /// A newline separated block holding company and location; see [`split_details`].
    Details,
}

/// One field-extraction rule inside a card.
///
/// When `scope` matches several elements the last match carrying a value wins.
/// `scope: None` reads from the card element itself.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub scope: Option<&'static str>,
    pub source: Source,
    pub target: Target,
    pub prefix: &'static str,
    pub replacements: &'static [(&'static str, &'static str)],
}

impl FieldRule {
    pub const fn text(scope: &'static str, field: Field) -> Self {
        Self::new(Some(scope), Source::Text, Target::Field(field))
    }

    pub const fn attr(scope: &'static str, name: &'static str, field: Field) -> Self {
        Self::new(Some(scope), Source::Attr(name), Target::Field(field))
    }

    pub const fn card_attr(name: &'static str, field: Field) -> Self {
        Self::new(None, Source::Attr(name), Target::Field(field))
    }

    pub const fn details(scope: &'static str) -> Self {
        Self::new(Some(scope), Source::Text, Target::Details)
    }

    pub const fn with_prefix(self, prefix: &'static str) -> Self {
        Self { prefix, ..self }
    }

    pub const fn with_replacements(self, replacements: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            replacements,
            ..self
        }
    }

    const fn new(scope: Option<&'static str>, source: Source, target: Target) -> Self {
        Self {
            scope,
            source,
            target,
            prefix: "",
            replacements: &[],
        }
    }
}

/// The structural signature of one site's results page.
#[derive(Debug)]
pub struct SiteDescriptor {
    pub site: Site,
    pub card: &'static str,
    pub rules: &'static [FieldRule],
}

struct CompiledRule {
    scope: Option<Selector>,
    rule: FieldRule,
}

pub struct SiteExtractor {
    site: Site,
    card: Selector,
    rules: Vec<CompiledRule>,
}

impl SiteExtractor {
    pub fn new(descriptor: &SiteDescriptor) -> Result<Self> {
        let site = descriptor.site;
        let card = parse_selector(site, descriptor.card)?;
        let rules = descriptor
            .rules
            .iter()
            .map(|rule| -> Result<CompiledRule> {
                let scope = rule
                    .scope
                    .map(|scope| parse_selector(site, scope))
                    .transpose()?;
                Ok(CompiledRule { scope, rule: *rule })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { site, card, rules })
    }

    pub fn site(&self) -> Site {
        self.site
    }

    /// Extracts every job card in `html`, in document order.
    ///
    /// An empty document is [`Error::MissingHtmlData`]. A document with no
    /// matching cards is an empty `Vec`.
    pub fn extract(&self, html: &str) -> Result<Vec<Job>> {
        if html.trim().is_empty() {
            return Err(Error::MissingHtmlData { site: self.site });
        }

        let document = Html::parse_document(html);
        let jobs = document
            .select(&self.card)
            .map(|card| self.extract_card(card))
            .collect();

        Ok(jobs)
    }

    fn extract_card(&self, card: ElementRef<'_>) -> Job {
        let mut job = Job::new(self.site);
        for compiled in &self.rules {
            if let Some(value) = compiled.read(card) {
                compiled.apply(&mut job, value);
            }
        }
        job
    }
}

impl CompiledRule {
    fn read(&self, card: ElementRef<'_>) -> Option<String> {
        match &self.scope {
            None => read_source(self.rule.source, card),
            Some(selector) => card
                .select(selector)
                .filter_map(|element| read_source(self.rule.source, element))
                .last(),
        }
    }

    fn apply(&self, job: &mut Job, raw: String) {
        let value = self
            .rule
            .replacements
            .iter()
            .fold(raw, |value, &(from, to)| value.replace(from, to));

        match self.rule.target {
            Target::Field(field) => *job.field_mut(field) = format!("{}{}", self.rule.prefix, value),
            Target::Details => split_details(job, &value),
        }
    }
}

fn read_source(source: Source, element: ElementRef<'_>) -> Option<String> {
    match source {
        Source::Text => Some(element.text().collect()),
        Source::Attr(name) => element.value().attr(name).map(str::to_string),
    }
}

fn parse_selector(site: Site, selector: &'static str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::InvalidSelector {
        site,
        selector,
        reason: format!("{e:?}"),
    })
}

/// Splits a details block into company and location.
///
/// Empty lines are dropped, then the final line, which is always decoration.
/// Two or more remaining lines are company then location; a single line is
/// the location alone and clears the company.
pub fn split_details(job: &mut Job, text: &str) {
    let mut lines: Vec<&str> = text.split('\n').filter(|line| !line.is_empty()).collect();
    lines.pop();

    match lines.as_slice() {
        [] => {}
        [location] => {
            job.company.clear();
            job.location = location.to_string();
        }
        [company, location, ..] => {
            job.company = company.to_string();
            job.location = location.to_string();
        }
    }
}
