use askama::Template;

use crate::application::subscribers::SubscriberListing;
use crate::domain::access::ServerConfig;
use crate::domain::posts::Post;
use crate::domain::types::human_date;
use crate::presentation::views::{LayoutContext, encode_component};

#[derive(Clone)]
pub struct DiagnosticsView {
    pub configured: bool,
    pub text: String,
}

impl DiagnosticsView {
    pub fn from_config(config: Option<ServerConfig>) -> Self {
        match config {
            Some(config) if config.api_key_available => Self {
                configured: true,
                text: format!(
                    "Server has API key configured (length: {})",
                    config.api_key_length
                ),
            },
            _ => Self {
                configured: false,
                text: "API key not configured on server. Check your environment variables."
                    .to_string(),
            },
        }
    }
}

/// Values shown in the new-post form. The credential field is never filled.
#[derive(Clone, Default)]
pub struct PostFormView {
    pub title: String,
    pub content: String,
    pub author: String,
    pub image_url: String,
}

impl PostFormView {
    /// After a successful publish only the author carries over.
    pub fn after_publish(self) -> Self {
        Self {
            author: self.author,
            ..Self::default()
        }
    }
}

#[derive(Clone, Default)]
pub struct NewsletterFormView {
    pub subject: String,
    pub message: String,
}

#[derive(Clone)]
pub struct AdminPostRow {
    pub id: String,
    pub title: String,
    pub author: String,
    pub published: String,
    pub delete_action: String,
}

#[derive(Clone)]
pub struct AdminSubscriberRow {
    pub email: String,
    pub subscribed: String,
}

#[derive(Clone)]
pub struct SubscriberPanelView {
    pub rows: Vec<AdminSubscriberRow>,
    pub error: Option<String>,
}

impl SubscriberPanelView {
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.rows.is_empty()
    }
}

impl From<SubscriberListing> for SubscriberPanelView {
    fn from(listing: SubscriberListing) -> Self {
        match listing {
            SubscriberListing::Loaded(subscribers) => Self {
                rows: subscribers
                    .into_iter()
                    .map(|subscriber| AdminSubscriberRow {
                        subscribed: human_date(subscriber.subscribed_at),
                        email: subscriber.email,
                    })
                    .collect(),
                error: None,
            },
            SubscriberListing::Failed(message) => Self {
                rows: Vec::new(),
                error: Some(message),
            },
        }
    }
}

pub struct AdminContext {
    /// `?key=...` suffix that keeps form posts behind the gate.
    pub key_query: String,
    pub diagnostics: DiagnosticsView,
    pub post_form: PostFormView,
    pub posts: Vec<AdminPostRow>,
    pub posts_error: bool,
    pub subscribers: SubscriberPanelView,
    pub newsletter_form: NewsletterFormView,
}

impl AdminContext {
    pub fn new(key: &str, diagnostics: DiagnosticsView, subscribers: SubscriberPanelView) -> Self {
        Self {
            key_query: format!("?key={}", encode_component(key.trim())),
            diagnostics,
            post_form: PostFormView::default(),
            posts: Vec::new(),
            posts_error: false,
            subscribers,
            newsletter_form: NewsletterFormView::default(),
        }
    }

    pub fn with_posts(mut self, posts: &[Post], is_error: bool) -> Self {
        self.posts = posts
            .iter()
            .map(|post| AdminPostRow {
                id: post.id.clone(),
                title: post.title.clone(),
                author: post.author.clone(),
                published: human_date(post.created_at),
                delete_action: format!(
                    "/admin/posts/{}/delete{}",
                    encode_component(&post.id),
                    self.key_query
                ),
            })
            .collect();
        self.posts_error = is_error;
        self
    }

    pub fn action(&self, path: &str) -> String {
        format!("{path}{}", self.key_query)
    }
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub view: LayoutContext<AdminContext>,
}
