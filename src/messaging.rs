use crate::{Error, Result};
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Mobile carriers with an email-to-SMS gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Carrier {
    Att,
    TMobile,
    Verizon,
    Sprint,
    Alltel,
    BoostMobile,
    CricketWireless,
    MetroPcs,
    RepublicWireless,
    UsCellular,
    VirginMobile,
}

impl Carrier {
    pub const ALL: [Carrier; 11] = [
        Carrier::Att,
        Carrier::TMobile,
        Carrier::Verizon,
        Carrier::Sprint,
        Carrier::Alltel,
        Carrier::BoostMobile,
        Carrier::CricketWireless,
        Carrier::MetroPcs,
        Carrier::RepublicWireless,
        Carrier::UsCellular,
        Carrier::VirginMobile,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Att => "at&t",
            Self::TMobile => "tmobile",
            Self::Verizon => "verizon",
            Self::Sprint => "sprint",
            Self::Alltel => "alltel",
            Self::BoostMobile => "boost mobile",
            Self::CricketWireless => "cricket wireless",
            Self::MetroPcs => "metropcs",
            Self::RepublicWireless => "republic wireless",
            Self::UsCellular => "us cellular",
            Self::VirginMobile => "virgin mobile",
        }
    }

    pub fn gateway_domain(&self) -> &'static str {
        match self {
            Self::Att => "mms.att.net",
            Self::TMobile => "tmomail.net",
            Self::Verizon => "vtext.net",
            Self::Sprint => "page.nextel.com",
            Self::Alltel => "sms.alltelwireless.com",
            Self::BoostMobile => "sms.myboostmobile.com",
            Self::CricketWireless => "mms.cricketwireless.net",
            Self::MetroPcs => "mymetropcs.com",
            Self::RepublicWireless => "text.republicwireless.com",
            Self::UsCellular => "email.uscc.net",
            Self::VirginMobile => "vmobl.com",
        }
    }

    /// The email address that delivers to `phone` as a text message.
    pub fn gateway_address(&self, phone: &str) -> String {
        let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
        format!("{}@{}", digits, self.gateway_domain())
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Carrier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Carrier::ALL
            .into_iter()
            .find(|carrier| {
                let name: String = carrier
                    .name()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect();
                name == wanted
            })
            .ok_or_else(|| format!("unknown carrier '{}'", s))
    }
}

/// The email account messages are sent from.
#[derive(Clone)]
pub struct SenderCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SenderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

pub trait Messenger {
    fn send(&self, destination: &str, sender: &SenderCredentials, body: &str) -> Result<()>;
}

/// Sends plain-text mail through an SMTP relay with STARTTLS.
pub struct SmtpMessenger {
    relay: String,
    timeout: Duration,
}

impl SmtpMessenger {
    pub fn new(relay: impl Into<String>, timeout: Duration) -> Self {
        Self {
            relay: relay.into(),
            timeout,
        }
    }
}

impl Messenger for SmtpMessenger {
    fn send(&self, destination: &str, sender: &SenderCredentials, body: &str) -> Result<()> {
        let fail = |reason: String| Error::Transport {
            destination: destination.to_string(),
            reason,
        };

        let from = sender
            .username
            .parse::<Mailbox>()
            .map_err(|e| fail(format!("invalid sender address: {}", e)))?;
        let to = destination
            .parse::<Mailbox>()
            .map_err(|e| fail(format!("invalid destination address: {}", e)))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .body(body.to_string())
            .map_err(|e| fail(e.to_string()))?;

        let mailer = SmtpTransport::starttls_relay(&self.relay)
            .map_err(|e| fail(e.to_string()))?
            .credentials(Credentials::new(
                sender.username.clone(),
                sender.password.clone(),
            ))
            .timeout(Some(self.timeout))
            .build();

        mailer.send(&message).map_err(|e| fail(e.to_string()))?;
        Ok(())
    }
}
