use std::sync::Arc;

use tracing::{info, warn};

use crate::application::content::ContentApi;
use crate::application::notice::ActionOutcome;
use crate::domain::messages::ContactMessage;

const SENT_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";
const FAILED_MESSAGE: &str = "Failed to send message. Please try again later.";

pub struct ContactService {
    api: Arc<dyn ContentApi>,
}

impl ContactService {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self { api }
    }

    pub async fn submit(&self, name: &str, email: &str, message: &str) -> ActionOutcome {
        let contact = match ContactMessage::new(name, email, message) {
            Ok(contact) => contact,
            Err(err) => return ActionOutcome::failure(err.message()),
        };

        match self.api.send_contact(&contact).await {
            Ok(ack) => {
                info!("contact message relayed");
                ActionOutcome::success(ack.unwrap_or_else(|| SENT_MESSAGE.to_string()))
            }
            Err(err) => {
                warn!(error = %err, kind = err.kind(), "contact relay failed");
                ActionOutcome::failure(err.detail().unwrap_or(FAILED_MESSAGE))
            }
        }
    }
}
