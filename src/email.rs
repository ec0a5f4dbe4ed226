//! Email delivery over SMTP using lettre

use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};

use crate::config::EmailConfig;

/// Email service wrapping the SMTP transport
#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    from: Mailbox,
    skip_sending: bool,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );

            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                from = %config.from_email,
                "Email service initialized with authentication and TLS"
            );

            // SmtpTransport::relay() uses STARTTLS, appropriate for port 587
            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

            SmtpTransport::relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_email).parse()?;

        Ok(Self {
            mailer,
            from,
            skip_sending: false,
        })
    }

    /// Create a mock email service for tests, skipping actual SMTP
    pub fn mock() -> anyhow::Result<Self> {
        let config = EmailConfig::default();

        let mailer = SmtpTransport::builder_dangerous(&config.smtp_host)
            .port(config.smtp_port)
            .build();

        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_email).parse()?;

        tracing::info!(from = %from, "Mock email service initialized (SMTP calls skipped)");

        Ok(Self {
            mailer,
            from,
            skip_sending: true,
        })
    }

    /// Send a multipart (plain + HTML) email
    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        html: String,
        plain: String,
    ) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(plain, html))?;

        if self.skip_sending {
            tracing::info!(to, subject, "Mock email service: skipping SMTP send");
            return Ok(());
        }

        self.mailer.send(&message)?;

        Ok(())
    }
}
