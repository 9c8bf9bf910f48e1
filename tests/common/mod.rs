//! In-memory stand-in for the content API, shared by the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Semaphore};

use signal_site::application::content::{ApiError, ContentApi};
use signal_site::config::SiteSettings;
use signal_site::domain::access::ServerConfig;
use signal_site::domain::credential::BearerCredential;
use signal_site::domain::messages::{ContactMessage, NewsletterDraft, NewsletterReport};
use signal_site::domain::posts::{NewPost, Post, remove_by_id};
use signal_site::domain::subscribers::{EmailAddress, Subscriber};
use signal_site::domain::types::parse_naive_timestamp;
use signal_site::infra::http::HttpState;

pub const VALID_KEY: &str = "s3cret";

#[derive(Default)]
struct FakeState {
    posts: Vec<Post>,
    subscribers: Vec<Subscriber>,
    config: Option<ServerConfig>,
    fail_listing: bool,
    fail_search: bool,
    listing_gate: Option<Arc<Semaphore>>,
    calls: Vec<&'static str>,
    search_terms: Vec<String>,
    next_id: usize,
}

pub struct FakeContentApi {
    state: Mutex<FakeState>,
}

impl FakeContentApi {
    /// A healthy service holding `count` posts, newest first.
    pub fn with_posts(count: usize) -> Self {
        let posts = (1..=count).map(sample_post).collect();
        Self {
            state: Mutex::new(FakeState {
                posts,
                config: Some(ServerConfig {
                    api_key_available: true,
                    api_key_length: 6,
                }),
                next_id: count + 1,
                ..FakeState::default()
            }),
        }
    }

    pub async fn fail_listing(&self, fail: bool) {
        self.state.lock().await.fail_listing = fail;
    }

    /// Blocks `list_posts` until the returned semaphore gets a permit.
    pub async fn hold_listing(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.state.lock().await.listing_gate = Some(gate.clone());
        gate
    }

    pub async fn fail_search(&self, fail: bool) {
        self.state.lock().await.fail_search = fail;
    }

    pub async fn drop_config(&self) {
        self.state.lock().await.config = None;
    }

    pub async fn add_subscriber(&self, email: &str) {
        self.state.lock().await.subscribers.push(Subscriber {
            email: email.to_string(),
            subscribed_at: parse_naive_timestamp("2025-01-10T08:00:00").expect("timestamp"),
        });
    }

    /// How many times the named operation was invoked.
    pub async fn calls(&self, name: &str) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|call| **call == name)
            .count()
    }

    pub async fn search_terms(&self) -> Vec<String> {
        self.state.lock().await.search_terms.clone()
    }

    pub async fn post_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .posts
            .iter()
            .map(|post| post.id.clone())
            .collect()
    }

    pub async fn subscriber_emails(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .subscribers
            .iter()
            .map(|subscriber| subscriber.email.clone())
            .collect()
    }
}

pub fn sample_post(n: usize) -> Post {
    // Lower ids are more recent.
    let day = 28 - (n % 28);
    Post {
        id: format!("p{n}"),
        title: format!("Post {n}"),
        content: format!("<p>Body of post {n}</p>"),
        author: "Ann".to_string(),
        created_at: parse_naive_timestamp(&format!("2025-02-{day:02}T09:00:00"))
            .expect("timestamp"),
        image_url: None,
    }
}

pub fn state_with(api: Arc<FakeContentApi>, page_size: usize) -> HttpState {
    let size = std::num::NonZeroUsize::new(page_size).expect("non-zero page size");
    HttpState::new(api, size, SiteSettings::default())
}

fn check_key(credential: &BearerCredential) -> Result<(), ApiError> {
    if credential.header_value() == format!("Bearer {VALID_KEY}") {
        Ok(())
    } else {
        Err(ApiError::from_status(401, Some("Invalid API key.".into())))
    }
}

#[async_trait]
impl ContentApi for FakeContentApi {
    async fn server_config(&self) -> Result<ServerConfig, ApiError> {
        let mut state = self.state.lock().await;
        state.calls.push("server_config");
        state
            .config
            .ok_or_else(|| ApiError::Transport("connection refused".into()))
    }

    async fn verify_key(&self, credential: &BearerCredential) -> Result<(), ApiError> {
        self.state.lock().await.calls.push("verify_key");
        check_key(credential)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let gate = {
            let mut state = self.state.lock().await;
            state.calls.push("list_posts");
            state.listing_gate.clone()
        };
        if let Some(gate) = gate {
            let _permit = gate.acquire().await;
        }
        let state = self.state.lock().await;
        if state.fail_listing {
            return Err(ApiError::from_status(500, Some("database offline".into())));
        }
        Ok(state.posts.clone())
    }

    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, ApiError> {
        let mut state = self.state.lock().await;
        state.calls.push("search_posts");
        state.search_terms.push(term.to_string());
        if state.fail_search {
            return Err(ApiError::Transport("connection reset".into()));
        }
        let needle = term.to_lowercase();
        Ok(state
            .posts
            .iter()
            .filter(|post| {
                post.title.to_lowercase().contains(&needle)
                    || post.content.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn create_post(
        &self,
        post: &NewPost,
        credential: &BearerCredential,
    ) -> Result<Post, ApiError> {
        let mut state = self.state.lock().await;
        state.calls.push("create_post");
        check_key(credential)?;

        let id = format!("p{}", state.next_id);
        state.next_id += 1;
        let created = Post {
            id,
            title: post.title().to_string(),
            content: post.content().to_string(),
            author: post.author().to_string(),
            created_at: parse_naive_timestamp("2025-03-01T12:00:00").expect("timestamp"),
            image_url: post.image_url().map(str::to_string),
        };
        state.posts.insert(0, created.clone());
        Ok(created)
    }

    async fn delete_post(&self, id: &str, credential: &BearerCredential) -> Result<(), ApiError> {
        let mut state = self.state.lock().await;
        state.calls.push("delete_post");
        check_key(credential)?;
        if remove_by_id(&mut state.posts, id) {
            Ok(())
        } else {
            Err(ApiError::from_status(404, Some("Post not found".into())))
        }
    }

    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, ApiError> {
        let mut state = self.state.lock().await;
        state.calls.push("list_subscribers");
        Ok(state.subscribers.clone())
    }

    async fn subscribe(&self, email: &EmailAddress) -> Result<String, ApiError> {
        let mut state = self.state.lock().await;
        state.calls.push("subscribe");
        if state.subscribers.iter().any(|s| s.email == email.as_str()) {
            return Err(ApiError::from_status(400, Some("Email already subscribed".into())));
        }
        state.subscribers.push(Subscriber {
            email: email.as_str().to_string(),
            subscribed_at: parse_naive_timestamp("2025-03-01T12:00:00").expect("timestamp"),
        });
        Ok("Successfully subscribed to newsletter".to_string())
    }

    async fn remove_subscriber(
        &self,
        email: &str,
        credential: &BearerCredential,
    ) -> Result<(), ApiError> {
        let mut state = self.state.lock().await;
        state.calls.push("remove_subscriber");
        check_key(credential)?;
        let before = state.subscribers.len();
        state.subscribers.retain(|s| s.email != email);
        if state.subscribers.len() == before {
            return Err(ApiError::from_status(404, Some("Subscriber not found".into())));
        }
        Ok(())
    }

    async fn send_newsletter(
        &self,
        _draft: &NewsletterDraft,
        credential: &BearerCredential,
    ) -> Result<NewsletterReport, ApiError> {
        let mut state = self.state.lock().await;
        state.calls.push("send_newsletter");
        check_key(credential)?;
        let total = state.subscribers.len() as u64;
        Ok(NewsletterReport {
            message: format!("Newsletter sent to {total} subscribers"),
            success_count: total,
            error_count: 0,
            total_subscribers: total,
        })
    }

    async fn send_contact(&self, _message: &ContactMessage) -> Result<Option<String>, ApiError> {
        self.state.lock().await.calls.push("send_contact");
        Ok(Some("Thanks for reaching out".to_string()))
    }
}
