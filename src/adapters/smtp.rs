use crate::config::credentials::SenderCredentials;
use crate::config::DeliveryConfig;
use crate::domain::model::Digest;
use crate::domain::ports::Mailer;
use crate::utils::error::{DigestError, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Sends digests over SMTP with implicit TLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &DeliveryConfig, credentials: &SenderCredentials) -> Result<Self> {
        let sender = parse_mailbox("sender", &credentials.address)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                credentials.address.clone(),
                credentials.secret().to_string(),
            ))
            .build();

        Ok(Self { transport, sender })
    }
}

fn parse_mailbox(role: &str, address: &str) -> Result<Mailbox> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| DigestError::MailComposeError {
            message: format!("invalid {} address '{}': {}", role, address, e),
        })
}

/// Builds the HTML message for one digest.
pub fn compose(sender: &Mailbox, recipient: &str, digest: &Digest) -> Result<Message> {
    Message::builder()
        .from(sender.clone())
        .to(parse_mailbox("recipient", recipient)?)
        .subject(digest.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(digest.html.clone())
        .map_err(|e| DigestError::MailComposeError {
            message: e.to_string(),
        })
}

#[async_trait::async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, recipient: &str, digest: &Digest) -> Result<()> {
        let message = compose(&self.sender, recipient, digest)?;
        let response = self.transport.send(message).await?;
        tracing::debug!("SMTP response code: {}", response.code());
        Ok(())
    }
}
