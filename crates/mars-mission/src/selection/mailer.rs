use std::fmt;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::MailConfig;

/// Plain-text message with one binary attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: MailAttachment,
}

#[derive(Clone, PartialEq, Eq)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub contents: Vec<u8>,
}

impl fmt::Debug for MailAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailAttachment")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("bytes", &self.contents.len())
            .finish()
    }
}

/// Outbound relay for application e-mails. Implementations block until the
/// relay accepts or refuses the message.
pub trait MailTransport: Send + Sync {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid mailbox '{address}': {reason}")]
    Address { address: String, reason: String },
    #[error("unable to assemble message: {0}")]
    Message(String),
    #[error("mail relay unavailable: {0}")]
    Transport(String),
}

/// SMTP submission over STARTTLS with username/password authentication.
pub struct SmtpMailer {
    transport: SmtpTransport,
    relay: String,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let transport = SmtpTransport::starttls_relay(&config.host)
            .map_err(|err| MailError::Transport(err.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            relay: format!("{}:{}", config.host, config.port),
        })
    }
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("relay", &self.relay)
            .finish_non_exhaustive()
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = build_message(mail)?;
        self.transport
            .send(&message)
            .map_err(|err| MailError::Transport(err.to_string()))?;
        tracing::debug!(relay = %self.relay, to = %mail.to, "relay accepted message");
        Ok(())
    }
}

fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse::<Mailbox>().map_err(|err| MailError::Address {
        address: address.to_string(),
        reason: err.to_string(),
    })
}

pub(crate) fn build_message(mail: &OutgoingMail) -> Result<Message, MailError> {
    let content_type = ContentType::parse(&mail.attachment.content_type)
        .map_err(|err| MailError::Message(err.to_string()))?;
    let attachment = Attachment::new(mail.attachment.filename.clone())
        .body(mail.attachment.contents.clone(), content_type);

    Message::builder()
        .from(mailbox(&mail.from)?)
        .to(mailbox(&mail.to)?)
        .subject(mail.subject.clone())
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(mail.body.clone()))
                .singlepart(attachment),
        )
        .map_err(|err| MailError::Message(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(to: &str) -> OutgoingMail {
        OutgoingMail {
            from: "mission@example.com".to_string(),
            to: to.to_string(),
            subject: "Mars mission application".to_string(),
            body: "Surname: Watney".to_string(),
            attachment: MailAttachment {
                filename: "watney.png".to_string(),
                content_type: "image/png".to_string(),
                contents: vec![0x89, b'P', b'N', b'G'],
            },
        }
    }

    #[test]
    fn builds_multipart_message_with_attachment() {
        let message = build_message(&mail("mark.watney@example.com")).expect("message builds");
        let raw = String::from_utf8(message.formatted()).expect("ascii headers");
        assert!(raw.contains("Subject: Mars mission application"));
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("filename=\"watney.png\""));
        assert!(raw.contains("image/png"));
    }

    #[test]
    fn rejects_unparseable_recipient() {
        let err = build_message(&mail("not-an-email")).expect_err("recipient invalid");
        assert!(matches!(err, MailError::Address { .. }));
    }
}
