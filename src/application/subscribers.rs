//! Subscriber listing and add/remove relays, plus the public footer signup.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::content::{ApiError, ContentApi};
use crate::application::notice::{AUTH_FAILED_MESSAGE, ActionOutcome};
use crate::domain::credential::BearerCredential;
use crate::domain::subscribers::{EMAIL_INVALID_MESSAGE, EmailAddress, Subscriber};

pub const DELETE_NEEDS_KEY_MESSAGE: &str =
    "Please enter your API key in the main admin form to delete subscribers";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriberListing {
    Loaded(Vec<Subscriber>),
    Failed(String),
}

pub struct SubscriberService {
    api: Arc<dyn ContentApi>,
}

impl SubscriberService {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> SubscriberListing {
        match self.api.list_subscribers().await {
            Ok(subscribers) => SubscriberListing::Loaded(subscribers),
            Err(err) => {
                warn!(error = %err, kind = err.kind(), "failed to list subscribers");
                SubscriberListing::Failed(format!(
                    "Error loading subscribers: {}",
                    err.detail().unwrap_or("Failed to fetch subscribers")
                ))
            }
        }
    }

    /// Admin-side add.
    pub async fn add(&self, raw_email: &str) -> ActionOutcome {
        let email = match EmailAddress::parse(raw_email) {
            Ok(email) => email,
            Err(err) => return ActionOutcome::failure(err.message()),
        };

        match self.api.subscribe(&email).await {
            Ok(_) => {
                info!("subscriber added from admin");
                ActionOutcome::success("Subscriber added successfully!")
            }
            Err(err) => {
                warn!(error = %err, kind = err.kind(), "failed to add subscriber");
                ActionOutcome::failure(format!(
                    "Failed to add subscriber: {}",
                    err.detail().unwrap_or("Failed to add subscriber")
                ))
            }
        }
    }

    /// Public footer signup; the server's acknowledgement becomes the notice.
    pub async fn subscribe(&self, raw_email: &str) -> ActionOutcome {
        let Ok(email) = EmailAddress::parse(raw_email) else {
            return ActionOutcome::failure(EMAIL_INVALID_MESSAGE);
        };

        match self.api.subscribe(&email).await {
            Ok(message) => ActionOutcome::success(message),
            Err(err) => {
                warn!(error = %err, kind = err.kind(), "footer subscription failed");
                ActionOutcome::failure("Subscription failed")
            }
        }
    }

    pub async fn remove(&self, email: &str, credential: Option<&BearerCredential>) -> ActionOutcome {
        let Some(credential) = credential else {
            return ActionOutcome::failure(DELETE_NEEDS_KEY_MESSAGE);
        };
        let email = email.trim();
        if email.is_empty() {
            return ActionOutcome::failure("Please choose a subscriber to delete");
        }

        match self.api.remove_subscriber(email, credential).await {
            Ok(()) => {
                info!(secret_len = credential.secret_len(), "subscriber removed");
                ActionOutcome::success("Subscriber deleted successfully!")
            }
            Err(err) => {
                warn!(error = %err, kind = err.kind(), "failed to remove subscriber");
                ActionOutcome::failure(remove_failure_message(&err))
            }
        }
    }
}

fn remove_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized { .. } => AUTH_FAILED_MESSAGE.to_string(),
        other => format!(
            "Failed to delete subscriber: {}",
            other.detail().unwrap_or("Failed to delete subscriber")
        ),
    }
}
