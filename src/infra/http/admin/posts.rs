use axum::{
    Form,
    extract::{Path, Query, State},
    response::Response,
};
use serde::Deserialize;

use crate::{
    application::notice::Notice,
    domain::posts::{NewPost, REQUIRED_FIELDS_MESSAGE},
    infra::http::public::HttpState,
    presentation::admin::views::PostFormView,
};

use super::shared::{AdminPage, GateQuery, authorize, form_credential, render_admin};

const DELETE_NEEDS_KEY_MESSAGE: &str = "Please enter your API key to delete posts";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct PostCreateForm {
    title: String,
    content: String,
    author: String,
    image_url: String,
    api_key: String,
}

impl PostCreateForm {
    fn echo(&self) -> PostFormView {
        PostFormView {
            title: self.title.clone(),
            content: self.content.clone(),
            author: self.author.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

pub(super) async fn admin_post_create(
    State(state): State<HttpState>,
    Query(gate): Query<GateQuery>,
    Form(form): Form<PostCreateForm>,
) -> Response {
    let check = match authorize(&state, &gate).await {
        Ok(check) => check,
        Err(response) => return response,
    };

    let image_url = Some(form.image_url.as_str());
    let fields = NewPost::new(&form.title, &form.content, &form.author, image_url);
    let (Ok(post), Some(credential)) = (fields, form_credential(&form.api_key)) else {
        let page = AdminPage::default()
            .notice(Some(Notice::error(REQUIRED_FIELDS_MESSAGE)))
            .post_form(form.echo());
        return render_admin(&state, &check, &gate, page).await;
    };

    let outcome = state.blog.create_post(post, &credential).await;
    let post_form = if outcome.succeeded() {
        form.echo().after_publish()
    } else {
        form.echo()
    };

    let page = AdminPage::default()
        .notice(Some(outcome.into_notice()))
        .post_form(post_form);
    render_admin(&state, &check, &gate, page).await
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct PostDeleteForm {
    api_key: String,
}

pub(super) async fn admin_post_delete(
    State(state): State<HttpState>,
    Path(id): Path<String>,
    Query(gate): Query<GateQuery>,
    Form(form): Form<PostDeleteForm>,
) -> Response {
    let check = match authorize(&state, &gate).await {
        Ok(check) => check,
        Err(response) => return response,
    };

    let notice = match form_credential(&form.api_key) {
        Some(credential) => state.blog.delete_post(&id, &credential).await.into_notice(),
        None => Notice::error(DELETE_NEEDS_KEY_MESSAGE),
    };

    render_admin(&state, &check, &gate, AdminPage::default().notice(Some(notice))).await
}
