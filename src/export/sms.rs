use super::{text_block, ExportSink};
use crate::messaging::{Carrier, Messenger, SenderCredentials};
use crate::models::AggregatedResult;
use crate::shortener::{shorten_or_original, UrlShortener};
use crate::Result;
use std::sync::Arc;
use tracing::info;

const BANNER: &str = "Job Candidates:\n\n";

/// Texts the result set to a phone through its carrier's email gateway.
pub struct SmsSink {
    phone: String,
    carrier: Carrier,
    sender: SenderCredentials,
    messenger: Box<dyn Messenger>,
    shortener: Arc<dyn UrlShortener>,
}

impl SmsSink {
    pub fn new(
        phone: impl Into<String>,
        carrier: Carrier,
        sender: SenderCredentials,
        messenger: Box<dyn Messenger>,
        shortener: Arc<dyn UrlShortener>,
    ) -> Self {
        Self {
            phone: phone.into(),
            carrier,
            sender,
            messenger,
            shortener,
        }
    }

    pub fn message(&self, result: &AggregatedResult) -> String {
        let mut body = String::from(BANNER);
        for job in result {
            let link = shorten_or_original(self.shortener.as_ref(), &job.link);
            body.push_str(&text_block(job, &link));
        }
        body.trim_end_matches('\n').to_string()
    }
}

impl ExportSink for SmsSink {
    fn name(&self) -> &'static str {
        "sms"
    }

    fn export(&self, result: &AggregatedResult) -> Result<()> {
        info!("formatting data to send to '{}' ...", self.phone);
        let destination = self.carrier.gateway_address(&self.phone);
        let body = self.message(result);

        self.messenger.send(&destination, &self.sender, &body)?;
        info!(
            "message sent to '{}' ({} candidate(s))",
            destination,
            result.len()
        );
        Ok(())
    }
}
