//! Delivery of contact-form notifications.
//!
//! `MailRelayNotifier` posts the rendered mail to an HTTP mail relay (any
//! transactional mail API that accepts JSON with a bearer token).
//! `LogNotifier` is used when no relay is configured and only logs.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};

use crate::contact::email::OutgoingMail;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail relay rejected message (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("mail relay unavailable after {retries} attempts")]
    Unavailable { retries: u32 },
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), NotifyError>;
}

#[derive(Clone)]
pub struct MailRelayNotifier {
    client: Client,
    url: String,
    token: String,
}

impl MailRelayNotifier {
    pub fn new(url: String, token: String) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { client, url, token })
    }
}

#[async_trait]
impl Notifier for MailRelayNotifier {
    /// Retries 429 and 5xx responses with exponential backoff (1s, 2s).
    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), NotifyError> {
        let mut last_error: Option<NotifyError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Mail relay attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&self.url)
                .bearer_auth(&self.token)
                .json(mail)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(NotifyError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Mail relay returned {}: {}", status, body);
                last_error = Some(NotifyError::Rejected {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(NotifyError::Rejected {
                    status: status.as_u16(),
                    message,
                });
            }

            info!("Contact notification delivered to {}", mail.to);
            return Ok(());
        }

        Err(last_error.unwrap_or(NotifyError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }
}

pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), NotifyError> {
        info!(
            to = %mail.to,
            reply_to = %mail.reply_to,
            subject = %mail.subject,
            "Contact submission received (no mail relay configured)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail() -> OutgoingMail {
        OutgoingMail {
            from: "site@example.com".to_string(),
            to: "me@example.com".to_string(),
            reply_to: "visitor@example.com".to_string(),
            subject: "Portfolio Contact: Hello".to_string(),
            html: "<p>Hi</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        assert!(LogNotifier.deliver(&mail()).await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_http_error() {
        // Nothing listens on the discard port.
        let notifier =
            MailRelayNotifier::new("http://127.0.0.1:9/send".to_string(), "t".to_string()).unwrap();
        tokio::time::pause();
        let err = notifier.deliver(&mail()).await.unwrap_err();
        assert!(matches!(err, NotifyError::Http(_)));
    }
}
