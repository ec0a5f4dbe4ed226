//! Welcome email notifications, delivered off the request path
//!
//! The account service holds a [`Notifier`] and only queues notifications;
//! a single [`Dispatcher`] task owns the SMTP transport and drains the queue.
//! Notifications are ephemeral: a failed delivery is logged and dropped,
//! never retried, and never visible to the HTTP caller.

use askama::Template;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::email::EmailService;
use crate::repository::Account;

/// Welcome email HTML body
#[derive(Template)]
#[template(path = "emails/welcome.html")]
struct WelcomeHtmlTemplate<'a> {
    name: &'a str,
}

/// Welcome email plain text body
#[derive(Template)]
#[template(path = "emails/welcome.txt")]
struct WelcomeTextTemplate<'a> {
    name: &'a str,
}

/// Template selector for outbound emails, carrying its variables
#[derive(Debug, Clone)]
pub enum EmailTemplate {
    Welcome { name: String },
}

impl EmailTemplate {
    /// Render the (html, plain) body pair
    fn render(&self) -> askama::Result<(String, String)> {
        match self {
            EmailTemplate::Welcome { name } => Ok((
                WelcomeHtmlTemplate { name }.render()?,
                WelcomeTextTemplate { name }.render()?,
            )),
        }
    }
}

/// A single email to deliver
#[derive(Debug, Clone)]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub template: EmailTemplate,
}

impl Notification {
    pub fn welcome(account: &Account) -> Self {
        Self {
            recipient: account.email.clone(),
            subject: "User Registration".to_string(),
            template: EmailTemplate::Welcome {
                name: account.name.clone(),
            },
        }
    }
}

/// Sending half of the notification channel, handed to the account service
/// at construction
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    /// Queue a notification without waiting for delivery
    pub fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            tracing::warn!("Notification dispatcher is gone, dropping notification");
        }
    }
}

/// Create a notifier and the receiver end for a dispatcher
pub fn channel() -> (Notifier, mpsc::UnboundedReceiver<Notification>) {
    let (tx, rx) = mpsc::unbounded_channel();

    (Notifier { tx }, rx)
}

/// Background worker delivering queued notifications
pub struct Dispatcher {
    email: EmailService,
    notifications: mpsc::UnboundedReceiver<Notification>,
}

impl Dispatcher {
    pub fn new(email: EmailService, notifications: mpsc::UnboundedReceiver<Notification>) -> Self {
        Self {
            email,
            notifications,
        }
    }

    /// Run the dispatcher on a detached task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Drain notifications until every sender is dropped
    async fn run(mut self) {
        while let Some(notification) = self.notifications.recv().await {
            if let Err(e) = self.deliver(&notification).await {
                tracing::error!(
                    error = %e,
                    to = %notification.recipient,
                    "Failed to send notification email"
                );
            }
        }

        tracing::debug!("Notification channel closed, dispatcher stopping");
    }

    async fn deliver(&self, notification: &Notification) -> anyhow::Result<()> {
        let (html, plain) = notification.template.render()?;

        self.email
            .send(&notification.recipient, &notification.subject, html, plain)
            .await?;

        tracing::info!(to = %notification.recipient, "Notification email sent");

        Ok(())
    }
}
