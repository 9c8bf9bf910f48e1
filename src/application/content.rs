//! The seam between the site and the remote content API.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::access::ServerConfig;
use crate::domain::credential::BearerCredential;
use crate::domain::messages::{ContactMessage, NewsletterDraft, NewsletterReport};
use crate::domain::posts::{NewPost, Post};
use crate::domain::subscribers::{EmailAddress, Subscriber};

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("credential rejected")]
    Unauthorized { detail: Option<String> },
    #[error("resource not found")]
    NotFound { detail: Option<String> },
    #[error("content api returned status {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success status code.
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        match status {
            401 => Self::Unauthorized { detail },
            404 => Self::NotFound { detail },
            _ => Self::Status { status, detail },
        }
    }

    /// Server-supplied detail text, when there is one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail }
            | ApiError::NotFound { detail }
            | ApiError::Status { detail, .. } => detail.as_deref(),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "transport",
            ApiError::Unauthorized { .. } => "unauthorized",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Status { .. } => "status",
            ApiError::Decode(_) => "decode",
        }
    }
}

/// Operations the site needs from the content API. Every call maps to one
/// remote endpoint except `find_post`, see below.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// `GET /config`
    async fn server_config(&self) -> Result<ServerConfig, ApiError>;

    /// `POST /verify-key`; `Ok` means the remote service accepted the key.
    async fn verify_key(&self, credential: &BearerCredential) -> Result<(), ApiError>;

    /// `GET /posts`, most recent first.
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError>;

    /// `GET /posts/search?q=`
    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, ApiError>;

    /// Look up a single post. The remote service has no per-post endpoint, so
    /// the default scans a fresh listing.
    async fn find_post(&self, id: &str) -> Result<Option<Post>, ApiError> {
        let posts = self.list_posts().await?;
        Ok(posts.into_iter().find(|post| post.id == id))
    }

    /// `POST /posts`; returns the canonical stored post.
    async fn create_post(
        &self,
        post: &NewPost,
        credential: &BearerCredential,
    ) -> Result<Post, ApiError>;

    /// `DELETE /posts/{id}`
    async fn delete_post(&self, id: &str, credential: &BearerCredential) -> Result<(), ApiError>;

    /// `GET /subscribers`
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, ApiError>;

    /// `POST /subscribe`; returns the server's acknowledgement text.
    async fn subscribe(&self, email: &EmailAddress) -> Result<String, ApiError>;

    /// `DELETE /subscribers/{email}`
    async fn remove_subscriber(
        &self,
        email: &str,
        credential: &BearerCredential,
    ) -> Result<(), ApiError>;

    /// `POST /newsletter/send`
    async fn send_newsletter(
        &self,
        draft: &NewsletterDraft,
        credential: &BearerCredential,
    ) -> Result<NewsletterReport, ApiError>;

    /// `POST /api/contact`; returns the server's acknowledgement, if any.
    async fn send_contact(&self, message: &ContactMessage) -> Result<Option<String>, ApiError>;
}
