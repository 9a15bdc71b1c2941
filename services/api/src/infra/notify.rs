use async_trait::async_trait;
use tracing::{info, warn};

use magang::config::NotificationConfig;
use magang::intake::{ApplicationNotice, NotificationPublisher, NotifyError};

/// Concrete notification sink chosen at startup: a webhook when one is
/// configured, the service log otherwise.
pub(crate) enum OutboundNotifier {
    Webhook(WebhookNotifier),
    Log(LogNotifier),
}

impl OutboundNotifier {
    pub(crate) fn from_config(config: &NotificationConfig) -> Self {
        match &config.webhook_url {
            Some(url) => OutboundNotifier::Webhook(WebhookNotifier::new(url.clone())),
            None => OutboundNotifier::Log(LogNotifier),
        }
    }
}

#[async_trait]
impl NotificationPublisher for OutboundNotifier {
    async fn publish(&self, notice: ApplicationNotice) -> Result<(), NotifyError> {
        match self {
            OutboundNotifier::Webhook(webhook) => webhook.publish(notice).await,
            OutboundNotifier::Log(log) => log.publish(notice).await,
        }
    }
}

/// Posts the notice as JSON to a configured endpoint. Delivery runs on a
/// detached task so the submission response never waits on the receiver;
/// failures are logged and dropped.
pub(crate) struct WebhookNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl WebhookNotifier {
    pub(crate) fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl NotificationPublisher for WebhookNotifier {
    async fn publish(&self, notice: ApplicationNotice) -> Result<(), NotifyError> {
        let request = self.client.post(&self.endpoint).json(&notice);
        tokio::spawn(async move {
            match request.send().await {
                Ok(response) if !response.status().is_success() => {
                    warn!(status = %response.status(), "application webhook rejected the notice");
                }
                Err(err) => {
                    warn!(error = %err, "application webhook unreachable");
                }
                Ok(_) => {}
            }
        });
        Ok(())
    }
}

/// Fallback sink writing the human-readable digest to the service log.
pub(crate) struct LogNotifier;

#[async_trait]
impl NotificationPublisher for LogNotifier {
    async fn publish(&self, notice: ApplicationNotice) -> Result<(), NotifyError> {
        info!(position = %notice.position, "{}", notice.digest());
        Ok(())
    }
}
