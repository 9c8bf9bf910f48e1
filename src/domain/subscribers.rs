use signal_api_types::SubscriberResponse;
use time::PrimitiveDateTime;

use super::error::DomainError;
use super::types::parse_naive_timestamp;

pub const EMAIL_REQUIRED_MESSAGE: &str = "Please enter an email address";
pub const EMAIL_INVALID_MESSAGE: &str = "Please enter a valid email address";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    pub email: String,
    pub subscribed_at: PrimitiveDateTime,
}

impl TryFrom<SubscriberResponse> for Subscriber {
    type Error = DomainError;

    fn try_from(value: SubscriberResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            subscribed_at: parse_naive_timestamp(&value.subscribed_at)?,
            email: value.email,
        })
    }
}

/// An email address that passed the shape check done before submission.
/// Deliverability is the remote service's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(EMAIL_REQUIRED_MESSAGE));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(DomainError::validation(EMAIL_INVALID_MESSAGE));
        };

        let domain_ok = domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !domain.contains('@');
        if local.is_empty() || !domain_ok || trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::validation(EMAIL_INVALID_MESSAGE));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
