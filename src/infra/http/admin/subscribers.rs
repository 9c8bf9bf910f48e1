use axum::{
    Form,
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use crate::infra::http::public::HttpState;

use super::shared::{AdminPage, GateQuery, authorize, form_credential, render_admin};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct SubscriberAddForm {
    email: String,
}

pub(super) async fn admin_subscriber_add(
    State(state): State<HttpState>,
    Query(gate): Query<GateQuery>,
    Form(form): Form<SubscriberAddForm>,
) -> Response {
    let check = match authorize(&state, &gate).await {
        Ok(check) => check,
        Err(response) => return response,
    };

    let outcome = state.subscribers.add(&form.email).await;
    let page = AdminPage::default().notice(Some(outcome.into_notice()));
    render_admin(&state, &check, &gate, page).await
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct SubscriberDeleteForm {
    email: String,
    api_key: String,
}

pub(super) async fn admin_subscriber_delete(
    State(state): State<HttpState>,
    Query(gate): Query<GateQuery>,
    Form(form): Form<SubscriberDeleteForm>,
) -> Response {
    let check = match authorize(&state, &gate).await {
        Ok(check) => check,
        Err(response) => return response,
    };

    let credential = form_credential(&form.api_key);
    let outcome = state
        .subscribers
        .remove(&form.email, credential.as_ref())
        .await;
    let page = AdminPage::default().notice(Some(outcome.into_notice()));
    render_admin(&state, &check, &gate, page).await
}
