use std::{num::NonZeroUsize, sync::Arc};

use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::warn;

use crate::{
    application::{
        access::AccessGate,
        blog::BlogService,
        chrome::ChromeService,
        contact::ContactService,
        error::ErrorReport,
        content::ContentApi,
        feed::{FeedRequest, FeedService},
        newsletter::NewsletterService,
        notice::Notice,
        subscribers::SubscriberService,
    },
    config::SiteSettings,
    infra::assets,
    presentation::views::{
        ContactContext, ContactTemplate, IndexContext, IndexTemplate, LayoutContext, PostCard,
        PostDetailContext, PostTemplate, render_not_found_response, render_not_found_with_notice,
        render_template_response,
    },
};

use super::{
    admin,
    middleware::{log_responses, set_request_context},
};

pub const POST_LOAD_FAILED_MESSAGE: &str = "Failed to load the post. It may have been removed.";

#[derive(Clone)]
pub struct HttpState {
    pub content: Arc<dyn ContentApi>,
    pub blog: Arc<BlogService>,
    pub feed: Arc<FeedService>,
    pub access: Arc<AccessGate>,
    pub subscribers: Arc<SubscriberService>,
    pub newsletter: Arc<NewsletterService>,
    pub contact: Arc<ContactService>,
    pub chrome: Arc<ChromeService>,
}

impl HttpState {
    /// Wire every service around a single content API client.
    pub fn new(content: Arc<dyn ContentApi>, page_size: NonZeroUsize, site: SiteSettings) -> Self {
        let blog = Arc::new(BlogService::new(content.clone()));
        Self {
            feed: Arc::new(FeedService::new(blog.clone(), content.clone(), page_size)),
            access: Arc::new(AccessGate::new(content.clone())),
            subscribers: Arc::new(SubscriberService::new(content.clone())),
            newsletter: Arc::new(NewsletterService::new(content.clone())),
            contact: Arc::new(ContactService::new(content.clone())),
            chrome: Arc::new(ChromeService::new(site)),
            blog,
            content,
        }
    }
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/post/{id}", get(post_detail))
        .route("/contact", get(contact_page).post(contact_submit))
        .route("/subscribe", post(subscribe))
        .route("/_health", get(health))
        .route("/static/{*path}", get(assets::serve_site))
        .merge(admin::routes())
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FeedQuery {
    page: Option<String>,
    q: Option<String>,
}

impl FeedQuery {
    /// Unparseable page numbers fall back to the first page.
    fn into_request(self) -> FeedRequest {
        FeedRequest {
            page: self
                .page
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(0),
            query: self.q,
        }
    }
}

async fn index(State(state): State<HttpState>, Query(query): Query<FeedQuery>) -> Response {
    render_index(&state, query.into_request(), None).await
}

async fn render_index(state: &HttpState, request: FeedRequest, notice: Option<Notice>) -> Response {
    let page = state.feed.page(&request).await;
    let notice = notice.or_else(|| page.notice.clone());
    let view = LayoutContext::new(state.chrome.load(), IndexContext::from(&page))
        .with_notice(notice.as_ref());
    render_template_response(IndexTemplate { view }, StatusCode::OK)
}

async fn post_detail(State(state): State<HttpState>, Path(id): Path<String>) -> Response {
    let chrome = state.chrome.load();

    match state.content.find_post(&id).await {
        Ok(Some(post)) => {
            let card = PostCard::from(&post);
            let view = LayoutContext::new(
                chrome.with_page_title(&card.title),
                PostDetailContext { post: card },
            );
            render_template_response(PostTemplate { view }, StatusCode::OK)
        }
        Ok(None) => render_not_found_response(chrome),
        Err(err) => {
            warn!(post_id = %id, error = %err, kind = err.kind(), "post lookup failed");
            let notice = Notice::error(POST_LOAD_FAILED_MESSAGE);
            render_not_found_with_notice(chrome, Some(&notice))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContactForm {
    name: String,
    email: String,
    message: String,
}

async fn contact_page(State(state): State<HttpState>) -> Response {
    render_contact(&state, ContactContext::default(), None)
}

async fn contact_submit(State(state): State<HttpState>, Form(form): Form<ContactForm>) -> Response {
    let outcome = state
        .contact
        .submit(&form.name, &form.email, &form.message)
        .await;

    let context = if outcome.succeeded() {
        ContactContext::default()
    } else {
        ContactContext {
            name: form.name,
            email: form.email,
            message: form.message,
        }
    };
    render_contact(&state, context, Some(outcome.notice()))
}

fn render_contact(state: &HttpState, context: ContactContext, notice: Option<&Notice>) -> Response {
    let chrome = state.chrome.load().with_page_title("Contact");
    let view = LayoutContext::new(chrome, context).with_notice(notice);
    render_template_response(ContactTemplate { view }, StatusCode::OK)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SubscribeForm {
    email: String,
}

/// Footer signup; the outcome is shown on the front page.
async fn subscribe(State(state): State<HttpState>, Form(form): Form<SubscribeForm>) -> Response {
    let outcome = state.subscribers.subscribe(&form.email).await;
    render_index(&state, FeedRequest::default(), Some(outcome.into_notice())).await
}

async fn health(State(state): State<HttpState>) -> Response {
    let snapshot = state.blog.snapshot().await;
    if snapshot.is_loading || snapshot.is_error {
        let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
        ErrorReport::from_message(
            "infra::http::public::health",
            StatusCode::SERVICE_UNAVAILABLE,
            "Post list is not loaded",
        )
        .attach(&mut response);
        response
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn fallback(State(state): State<HttpState>) -> Response {
    render_not_found_response(state.chrome.load())
}
