//! Process-scoped blog state: the fetched post list plus loading and error
//! flags, mutated only by this service when its own calls complete.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::application::content::{ApiError, ContentApi};
use crate::application::notice::{AUTH_FAILED_MESSAGE, ActionOutcome, Notice};
use crate::domain::credential::BearerCredential;
use crate::domain::posts::{NewPost, Post, remove_by_id};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load posts. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogSnapshot {
    pub posts: Vec<Post>,
    pub is_loading: bool,
    pub is_error: bool,
}

#[derive(Debug)]
struct BlogState {
    posts: Vec<Post>,
    is_loading: bool,
    is_error: bool,
    loaded_once: bool,
}

/// The list as it stood once any in-flight fetch settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogLoad {
    pub snapshot: BlogSnapshot,
    pub notice: Option<Notice>,
}

pub struct BlogService {
    api: Arc<dyn ContentApi>,
    state: RwLock<BlogState>,
    /// Held for the whole of a fetch so concurrent callers wait for it.
    refresh: Mutex<()>,
}

impl BlogService {
    /// Build the service in its loading state. Nothing is fetched until
    /// [`BlogService::init`] runs.
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self {
            api,
            state: RwLock::new(BlogState {
                posts: Vec::new(),
                is_loading: true,
                is_error: false,
                loaded_once: false,
            }),
            refresh: Mutex::new(()),
        }
    }

    /// Explicit initialization: perform the first fetch.
    pub async fn init(&self) -> BlogSnapshot {
        self.fetch_posts().await;
        self.snapshot().await
    }

    pub async fn snapshot(&self) -> BlogSnapshot {
        let state = self.state.read().await;
        BlogSnapshot {
            posts: state.posts.clone(),
            is_loading: state.is_loading,
            is_error: state.is_error,
        }
    }

    /// Replace the in-memory list with the server's current list. On failure
    /// the error flag is set and an error notice returned.
    pub async fn fetch_posts(&self) -> Option<Notice> {
        let _refresh = self.refresh.lock().await;
        self.fetch_locked().await
    }

    async fn fetch_locked(&self) -> Option<Notice> {
        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.is_error = false;
        }

        let result = self.api.list_posts().await;

        let mut state = self.state.write().await;
        state.is_loading = false;
        state.loaded_once = true;
        match result {
            Ok(posts) => {
                info!(count = posts.len(), "post list refreshed");
                state.posts = posts;
                None
            }
            Err(err) => {
                warn!(error = %err, kind = err.kind(), "failed to fetch posts");
                state.is_error = true;
                Some(Notice::error(LOAD_FAILED_MESSAGE))
            }
        }
    }

    /// Fetch again when the last attempt failed or nothing was fetched yet.
    /// A page request after a failure is the user's resubmission. A fetch
    /// already in flight is awaited rather than reported as loading.
    pub async fn ensure_loaded(&self) -> BlogLoad {
        let _refresh = self.refresh.lock().await;
        let needs_fetch = {
            let state = self.state.read().await;
            !state.loaded_once || state.is_error
        };
        let notice = if needs_fetch {
            self.fetch_locked().await
        } else {
            None
        };
        BlogLoad {
            snapshot: self.snapshot().await,
            notice,
        }
    }

    /// Submit a new post. On success the canonical post returned by the
    /// server is prepended to the in-memory list.
    pub async fn create_post(&self, post: NewPost, credential: &BearerCredential) -> ActionOutcome {
        info!(
            title = post.title(),
            secret_len = credential.secret_len(),
            "creating post"
        );

        match self.api.create_post(&post, credential).await {
            Ok(created) => {
                info!(post_id = %created.id, "post created");
                self.state.write().await.posts.insert(0, created);
                ActionOutcome::success("Post created successfully!")
            }
            Err(err) => {
                warn!(error = %err, kind = err.kind(), "failed to create post");
                ActionOutcome::failure(create_failure_message(&err))
            }
        }
    }

    /// Delete a post. On success exactly that entry leaves the in-memory list.
    pub async fn delete_post(&self, id: &str, credential: &BearerCredential) -> ActionOutcome {
        info!(
            post_id = id,
            secret_len = credential.secret_len(),
            "deleting post"
        );

        match self.api.delete_post(id, credential).await {
            Ok(()) => {
                let removed = remove_by_id(&mut self.state.write().await.posts, id);
                info!(post_id = id, removed, "post deleted");
                ActionOutcome::success("Post deleted successfully!")
            }
            Err(err) => {
                warn!(post_id = id, error = %err, kind = err.kind(), "failed to delete post");
                ActionOutcome::failure(delete_failure_message(&err))
            }
        }
    }
}

fn create_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized { .. } => AUTH_FAILED_MESSAGE.to_string(),
        ApiError::Transport(_) => {
            "Failed to create post. Please check your API key and try again.".to_string()
        }
        other => other
            .detail()
            .unwrap_or("Failed to create post")
            .to_string(),
    }
}

fn delete_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized { .. } => AUTH_FAILED_MESSAGE.to_string(),
        ApiError::NotFound { .. } => "Post not found".to_string(),
        ApiError::Transport(_) => {
            "Failed to delete post. Please check your API key and try again.".to_string()
        }
        other => other
            .detail()
            .unwrap_or("Failed to delete post")
            .to_string(),
    }
}
