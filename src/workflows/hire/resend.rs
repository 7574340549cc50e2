//! Staff notifications delivered through the Resend e-mail API.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::notification::{
    DispatchError, EmailTemplate, NotificationContent, NotificationPayload, NotificationService,
    RenderError,
};
use crate::config::Secret;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug)]
pub struct ResendNotifier {
    client: reqwest::Client,
    api_key: Secret,
    sender: String,
    template: EmailTemplate,
}

#[derive(Debug, Serialize)]
pub(crate) struct OutboundEmail<'a> {
    pub(crate) from: &'a str,
    pub(crate) to: Vec<&'a str>,
    pub(crate) subject: &'a str,
    pub(crate) html: &'a str,
}

impl ResendNotifier {
    pub fn new(api_key: Secret, sender: impl Into<String>, template: EmailTemplate) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            sender: sender.into(),
            template,
        }
    }

    pub(crate) fn outbound<'a>(
        &'a self,
        content: &'a NotificationContent,
        recipient: &'a str,
        subject: &'a str,
    ) -> OutboundEmail<'a> {
        OutboundEmail {
            from: &self.sender,
            to: vec![recipient],
            subject,
            html: &content.html,
        }
    }
}

#[async_trait]
impl NotificationService for ResendNotifier {
    fn render(&self, payload: &NotificationPayload) -> Result<NotificationContent, RenderError> {
        self.template.render(payload)
    }

    async fn send(
        &self,
        content: &NotificationContent,
        recipient: &str,
        subject: &str,
    ) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(self.api_key.expose())
            .json(&self.outbound(content, recipient, subject))
            .send()
            .await
            .map_err(|err| DispatchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(recipient, "notification accepted by resend");
        Ok(())
    }
}
