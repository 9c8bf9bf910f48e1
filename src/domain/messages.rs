//! Outbound messages relayed to the content API: newsletters and contact
//! form submissions.

use signal_api_types::{ContactRequest, NewsletterRequest, NewsletterResponse};

use super::error::DomainError;
use super::posts::REQUIRED_FIELDS_MESSAGE;
use super::subscribers::EmailAddress;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterDraft {
    subject: String,
    message: String,
}

impl NewsletterDraft {
    pub fn new(subject: &str, message: &str) -> Result<Self, DomainError> {
        let subject = subject.trim();
        if subject.is_empty() || message.trim().is_empty() {
            return Err(DomainError::validation(REQUIRED_FIELDS_MESSAGE));
        }
        Ok(Self {
            subject: subject.to_string(),
            message: message.to_string(),
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl From<&NewsletterDraft> for NewsletterRequest {
    fn from(draft: &NewsletterDraft) -> Self {
        Self {
            subject: draft.subject.clone(),
            message: draft.message.clone(),
        }
    }
}

/// Delivery summary reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterReport {
    pub message: String,
    pub success_count: u64,
    pub error_count: u64,
    pub total_subscribers: u64,
}

impl From<NewsletterResponse> for NewsletterReport {
    fn from(value: NewsletterResponse) -> Self {
        Self {
            message: value.message,
            success_count: value.success_count,
            error_count: value.error_count,
            total_subscribers: value.total_subscribers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    name: String,
    email: EmailAddress,
    message: String,
}

impl ContactMessage {
    pub fn new(name: &str, email: &str, message: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() || email.trim().is_empty() || message.trim().is_empty() {
            return Err(DomainError::validation(REQUIRED_FIELDS_MESSAGE));
        }
        Ok(Self {
            name: name.to_string(),
            email: EmailAddress::parse(email)?,
            message: message.to_string(),
        })
    }
}

impl From<&ContactMessage> for ContactRequest {
    fn from(value: &ContactMessage) -> Self {
        Self {
            name: value.name.clone(),
            email: value.email.as_str().to_string(),
            message: value.message.clone(),
        }
    }
}
