use axum::{http::StatusCode, response::Response};
use serde::Deserialize;

use crate::{
    application::{access::AccessCheck, notice::Notice},
    domain::credential::BearerCredential,
    infra::http::{public::HttpState, set_no_store},
    presentation::{
        admin::views::{
            AdminContext, AdminTemplate, DiagnosticsView, NewsletterFormView, PostFormView,
            SubscriberPanelView,
        },
        views::{LayoutContext, render_not_found_response, render_template_response},
    },
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct GateQuery {
    pub(super) key: Option<String>,
}

impl GateQuery {
    fn key(&self) -> &str {
        self.key.as_deref().unwrap_or_default()
    }
}

/// Run the gate; anything short of an authorized verdict renders not-found.
pub(super) async fn authorize(state: &HttpState, gate: &GateQuery) -> Result<AccessCheck, Response> {
    let check = state.access.evaluate(gate.key.as_deref()).await;
    if check.is_authorized() {
        Ok(check)
    } else {
        Err(render_not_found_response(state.chrome.load()))
    }
}

/// Credential typed into an admin form field.
pub(super) fn form_credential(raw: &str) -> Option<BearerCredential> {
    BearerCredential::parse(raw)
}

/// What a handler wants the re-rendered admin page to show.
#[derive(Default)]
pub(super) struct AdminPage {
    notice: Option<Notice>,
    post_form: PostFormView,
    newsletter_form: NewsletterFormView,
}

impl AdminPage {
    pub(super) fn notice(mut self, notice: Option<Notice>) -> Self {
        self.notice = notice;
        self
    }

    pub(super) fn post_form(mut self, form: PostFormView) -> Self {
        self.post_form = form;
        self
    }

    pub(super) fn newsletter_form(mut self, form: NewsletterFormView) -> Self {
        self.newsletter_form = form;
        self
    }
}

pub(super) async fn render_admin(
    state: &HttpState,
    check: &AccessCheck,
    gate: &GateQuery,
    page: AdminPage,
) -> Response {
    let snapshot = state.blog.snapshot().await;
    let subscribers = SubscriberPanelView::from(state.subscribers.list().await);

    let mut content = AdminContext::new(
        gate.key(),
        DiagnosticsView::from_config(check.config()),
        subscribers,
    )
    .with_posts(&snapshot.posts, snapshot.is_error);
    content.post_form = page.post_form;
    content.newsletter_form = page.newsletter_form;

    let chrome = state.chrome.load().with_page_title("Admin");
    let view = LayoutContext::new(chrome, content).with_notice(page.notice.as_ref());
    let mut response = render_template_response(AdminTemplate { view }, StatusCode::OK);
    set_no_store(&mut response);
    response
}
