//! Blog feed composition: cached list or search results, then a page window.

use std::{num::NonZeroUsize, sync::Arc};

use tracing::warn;

use crate::application::blog::{BlogLoad, BlogService};
use crate::application::content::ContentApi;
use crate::application::notice::Notice;
use crate::application::pagination::PageWindow;
use crate::domain::posts::Post;

pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again later.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedRequest {
    pub page: usize,
    pub query: Option<String>,
}

impl FeedRequest {
    /// The search term, if one was actually entered.
    pub fn search_term(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedContent {
    Loading,
    Error,
    Empty,
    Posts(PageWindow<Post>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPage {
    /// The trimmed search term in effect, if any.
    pub search: Option<String>,
    pub content: FeedContent,
    pub notice: Option<Notice>,
}

pub struct FeedService {
    blog: Arc<BlogService>,
    api: Arc<dyn ContentApi>,
    page_size: NonZeroUsize,
}

impl FeedService {
    pub fn new(blog: Arc<BlogService>, api: Arc<dyn ContentApi>, page_size: NonZeroUsize) -> Self {
        Self {
            blog,
            api,
            page_size,
        }
    }

    pub async fn page(&self, request: &FeedRequest) -> FeedPage {
        match request.search_term() {
            Some(term) => self.search_page(term, request.page).await,
            None => self.list_page(request.page).await,
        }
    }

    async fn list_page(&self, page: usize) -> FeedPage {
        let BlogLoad { snapshot, notice } = self.blog.ensure_loaded().await;

        let content = if snapshot.is_loading {
            FeedContent::Loading
        } else if snapshot.is_error {
            FeedContent::Error
        } else {
            self.window(&snapshot.posts, page)
        };

        FeedPage {
            search: None,
            content,
            notice,
        }
    }

    async fn search_page(&self, term: &str, page: usize) -> FeedPage {
        match self.api.search_posts(term).await {
            Ok(posts) => FeedPage {
                search: Some(term.to_string()),
                content: self.window(&posts, page),
                notice: None,
            },
            Err(err) => {
                warn!(error = %err, kind = err.kind(), term, "post search failed");
                FeedPage {
                    search: Some(term.to_string()),
                    content: FeedContent::Error,
                    notice: Some(Notice::error(SEARCH_FAILED_MESSAGE)),
                }
            }
        }
    }

    fn window(&self, posts: &[Post], page: usize) -> FeedContent {
        if posts.is_empty() {
            FeedContent::Empty
        } else {
            FeedContent::Posts(PageWindow::paginate(posts, page, self.page_size))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_queries_are_not_searches() {
        let blank = FeedRequest {
            page: 0,
            query: Some("   ".into()),
        };
        assert_eq!(blank.search_term(), None);

        let term = FeedRequest {
            page: 0,
            query: Some(" tariffs ".into()),
        };
        assert_eq!(term.search_term(), Some("tariffs"));
    }
}
