use crate::application::error::{ErrorReport, HttpError};
use crate::application::feed::{FeedContent, FeedPage};
use crate::application::notice::Notice;
use crate::application::pagination::PageWindow;
use crate::domain::posts::Post;
use crate::domain::types::{human_date, iso_date};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use url::form_urlencoded;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    render_not_found_with_notice(chrome, None)
}

pub fn render_not_found_with_notice(chrome: LayoutChrome, notice: Option<&Notice>) -> Response {
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(chrome, content).with_notice(notice);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct NavigationView {
    pub entries: Vec<NavigationLinkView>,
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub tagline: String,
    pub href: String,
}

#[derive(Clone)]
pub struct NavigationLinkView {
    pub label: String,
    pub href: String,
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
}

impl LayoutChrome {
    /// Prefix the document title with a page-specific heading.
    pub fn with_page_title(self, title: &str) -> Self {
        let meta = PageMetaView {
            title: format!("{title} | {}", self.meta.title),
            ..self.meta
        };
        Self { meta, ..self }
    }
}

#[derive(Clone)]
pub struct NoticeView {
    pub variant: &'static str,
    pub text: String,
}

impl From<&Notice> for NoticeView {
    fn from(notice: &Notice) -> Self {
        Self {
            variant: notice.kind.as_variant(),
            text: notice.text.clone(),
        }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
    pub notice: Option<NoticeView>,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            navigation: chrome.navigation,
            footer: chrome.footer,
            meta: chrome.meta,
            notice: None,
            content,
        }
    }

    pub fn with_notice(mut self, notice: Option<&Notice>) -> Self {
        self.notice = notice.map(NoticeView::from);
        self
    }
}

#[derive(Clone)]
pub struct PostCard {
    pub id: String,
    pub href: String,
    pub title: String,
    pub author: String,
    pub published: String,
    pub iso_date: String,
    /// Sanitized markup, safe to render unescaped.
    pub content_html: String,
    pub image_url: Option<String>,
}

impl From<&Post> for PostCard {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            href: format!("/post/{}", encode_component(&post.id)),
            title: post.title.clone(),
            author: post.author.clone(),
            published: human_date(post.created_at),
            iso_date: iso_date(post.created_at),
            content_html: sanitize_post_html(&post.content),
            image_url: post.image_url.clone(),
        }
    }
}

/// Strip scripts, event handlers and other unsafe markup from authored HTML.
pub fn sanitize_post_html(raw: &str) -> String {
    ammonia::clean(raw)
}

/// Percent-encode a single path segment.
pub fn encode_component(raw: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(raw.as_bytes()).collect();
    encoded.replace('+', "%20")
}

#[derive(Clone)]
pub struct PaginationView {
    pub label: String,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
}

impl PaginationView {
    fn from_window<T>(window: &PageWindow<T>, search: Option<&str>) -> Option<Self> {
        if !window.shows_controls() {
            return None;
        }
        Some(Self {
            label: format!("Page {} of {}", window.page + 1, window.total_pages),
            previous_href: window.previous_page().map(|page| feed_href(page, search)),
            next_href: window.next_page().map(|page| feed_href(page, search)),
        })
    }
}

/// Link to a feed page, keeping the active search term.
pub fn feed_href(page: usize, search: Option<&str>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(term) = search {
        query.append_pair("q", term);
    }
    if page > 0 {
        query.append_pair("page", &page.to_string());
    }
    let query = query.finish();
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{query}")
    }
}

pub struct IndexContext {
    pub search: String,
    pub is_search: bool,
    pub is_loading: bool,
    pub is_error: bool,
    pub is_empty: bool,
    pub empty_message: String,
    pub posts: Vec<PostCard>,
    pub pagination: Option<PaginationView>,
}

impl From<&FeedPage> for IndexContext {
    fn from(page: &FeedPage) -> Self {
        let search = page.search.clone().unwrap_or_default();
        let is_search = page.search.is_some();
        let empty_message = if is_search {
            format!("No posts match \"{search}\".")
        } else {
            "No posts yet. Check back soon.".to_string()
        };

        let mut context = Self {
            search,
            is_search,
            is_loading: false,
            is_error: false,
            is_empty: false,
            empty_message,
            posts: Vec::new(),
            pagination: None,
        };

        match &page.content {
            FeedContent::Loading => context.is_loading = true,
            FeedContent::Error => context.is_error = true,
            FeedContent::Empty => context.is_empty = true,
            FeedContent::Posts(window) => {
                context.posts = window.items.iter().map(PostCard::from).collect();
                context.pagination = PaginationView::from_window(window, page.search.as_deref());
            }
        }

        context
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<IndexContext>,
}

pub struct PostDetailContext {
    pub post: PostCard,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub view: LayoutContext<PostDetailContext>,
}

/// Contact form state. Fields are echoed back only when a submission failed.
#[derive(Default)]
pub struct ContactContext {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub view: LayoutContext<ContactContext>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Page Not Found".to_string(),
            message: "The page you requested does not exist. Try returning to the homepage to continue reading.".to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn home() -> Self {
        Self {
            href: "/".to_string(),
            label: "Back to home".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
