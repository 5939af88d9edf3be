use anyhow::Context;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

use crate::config::SmtpConfig;

/// Outbound email collaborator. Delivery is awaited to completion; a failure
/// is fatal to the calling request (no retries).
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an HTML email, returning the transport's message id.
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<String>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(cfg: &SmtpConfig) -> anyhow::Result<Self> {
        let creds = Credentials::new(cfg.username.clone(), cfg.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.host)
            .context("smtp relay configuration")?
            .credentials(creds)
            .build();
        let from: Mailbox = cfg.from.parse().context("parse smtp from address")?;
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<String> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse::<Mailbox>().context("parse recipient address")?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .context("build email")?;

        let response = self.transport.send(message).await.context("smtp send")?;
        let message_id = response.message().collect::<Vec<_>>().join(" ");
        debug!(to, "email sent");
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(from: &str) -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".into(),
            username: "noreply@example.com".into(),
            password: "secret".into(),
            from: from.into(),
        }
    }

    // The pooled transport expects a tokio runtime when dropped, so these
    // construct inside one.
    #[tokio::test]
    async fn builds_with_display_name_in_from_address() {
        let mailer = SmtpMailer::new(&cfg("Forum App <noreply@example.com>"));
        assert!(mailer.is_ok());
    }

    #[tokio::test]
    async fn rejects_malformed_from_address() {
        let err = SmtpMailer::new(&cfg("not-an-address"))
            .err()
            .expect("malformed from address must be rejected");
        assert!(err.to_string().contains("from address"));
    }
}
