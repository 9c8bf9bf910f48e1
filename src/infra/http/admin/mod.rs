//! Admin surface. Every route re-runs the access gate with the `key` query
//! parameter and answers with the not-found page unless it authorizes.

mod newsletter;
mod posts;
mod shared;
mod subscribers;

use axum::{
    Router,
    extract::{Query, State},
    response::Response,
    routing::{get, post},
};

use super::public::HttpState;
use shared::{AdminPage, GateQuery, authorize, render_admin};

pub(super) fn routes() -> Router<HttpState> {
    Router::new()
        .route("/admin", get(admin_home))
        .route("/admin/posts", post(posts::admin_post_create))
        .route("/admin/posts/{id}/delete", post(posts::admin_post_delete))
        .route("/admin/subscribers", post(subscribers::admin_subscriber_add))
        .route(
            "/admin/subscribers/delete",
            post(subscribers::admin_subscriber_delete),
        )
        .route("/admin/newsletter", post(newsletter::admin_newsletter_send))
}

async fn admin_home(State(state): State<HttpState>, Query(gate): Query<GateQuery>) -> Response {
    let check = match authorize(&state, &gate).await {
        Ok(check) => check,
        Err(response) => return response,
    };

    let notice = state.blog.ensure_loaded().await.notice;
    render_admin(&state, &check, &gate, AdminPage::default().notice(notice)).await
}
