use std::sync::Arc;

use tracing::{info, warn};

use crate::application::content::{ApiError, ContentApi};
use crate::application::notice::{AUTH_FAILED_MESSAGE, ActionOutcome};
use crate::domain::credential::BearerCredential;
use crate::domain::messages::NewsletterDraft;

pub const NEWSLETTER_FIELDS_MESSAGE: &str =
    "Please fill in all required fields including API key";

pub struct NewsletterService {
    api: Arc<dyn ContentApi>,
}

impl NewsletterService {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self { api }
    }

    pub async fn send(
        &self,
        subject: &str,
        message: &str,
        credential: Option<&BearerCredential>,
    ) -> ActionOutcome {
        let (Ok(draft), Some(credential)) = (NewsletterDraft::new(subject, message), credential)
        else {
            return ActionOutcome::failure(NEWSLETTER_FIELDS_MESSAGE);
        };

        match self.api.send_newsletter(&draft, credential).await {
            Ok(report) => {
                info!(
                    subject = draft.subject(),
                    delivered = report.success_count,
                    failed = report.error_count,
                    total = report.total_subscribers,
                    "newsletter sent"
                );
                ActionOutcome::success(report.message)
            }
            Err(err) => {
                warn!(error = %err, kind = err.kind(), "newsletter send failed");
                ActionOutcome::failure(failure_message(&err))
            }
        }
    }
}

fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized { .. } => AUTH_FAILED_MESSAGE.to_string(),
        ApiError::Transport(_) | ApiError::Decode(_) => {
            "Failed to send newsletter. Please try again.".to_string()
        }
        other => other
            .detail()
            .unwrap_or("Failed to send newsletter")
            .to_string(),
    }
}
