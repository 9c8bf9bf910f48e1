use axum::{
    Form,
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use crate::{infra::http::public::HttpState, presentation::admin::views::NewsletterFormView};

use super::shared::{AdminPage, GateQuery, authorize, form_credential, render_admin};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct NewsletterForm {
    subject: String,
    message: String,
    api_key: String,
}

pub(super) async fn admin_newsletter_send(
    State(state): State<HttpState>,
    Query(gate): Query<GateQuery>,
    Form(form): Form<NewsletterForm>,
) -> Response {
    let check = match authorize(&state, &gate).await {
        Ok(check) => check,
        Err(response) => return response,
    };

    let credential = form_credential(&form.api_key);
    let outcome = state
        .newsletter
        .send(&form.subject, &form.message, credential.as_ref())
        .await;

    let newsletter_form = if outcome.succeeded() {
        NewsletterFormView::default()
    } else {
        NewsletterFormView {
            subject: form.subject,
            message: form.message,
        }
    };

    let page = AdminPage::default()
        .notice(Some(outcome.into_notice()))
        .newsletter_form(newsletter_form);
    render_admin(&state, &check, &gate, page).await
}
