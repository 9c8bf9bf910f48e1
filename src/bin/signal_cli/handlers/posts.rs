#![deny(clippy::all, clippy::pedantic)]

use reqwest::Method;
use signal_api_types::{PostCreateRequest, PostResponse};

use crate::args::PostsCmd;
use crate::client::{CliError, Ctx};
use crate::io::{read_value, require};
use crate::print::{print_json, print_status};

pub async fn handle(ctx: &Ctx, cmd: PostsCmd) -> Result<(), CliError> {
    match cmd {
        PostsCmd::List => list(ctx).await,
        PostsCmd::Search { term } => search(ctx, &term).await,
        PostsCmd::Get { id } => get(ctx, &id).await,
        PostsCmd::Create {
            title,
            author,
            content,
            content_file,
            image_url,
        } => {
            let body = PostCreateRequest {
                title,
                content: read_value(content, content_file)?,
                author,
                image_url: image_url.filter(|url| !url.trim().is_empty()),
            };
            create(ctx, body).await
        }
        PostsCmd::Delete { id } => delete(ctx, &id).await,
    }
}

async fn fetch_all(ctx: &Ctx) -> Result<Vec<PostResponse>, CliError> {
    ctx.fetch(ctx.get(&["posts"])?).await
}

async fn list(ctx: &Ctx) -> Result<(), CliError> {
    print_json(&fetch_all(ctx).await?)
}

async fn search(ctx: &Ctx, term: &str) -> Result<(), CliError> {
    require("term", term)?;
    let mut url = ctx.url(&["posts", "search"])?;
    url.query_pairs_mut().append_pair("q", term.trim());
    let res: Vec<PostResponse> = ctx.fetch(ctx.client.get(url)).await?;
    print_json(&res)
}

/// The API has no single-post endpoint, so this filters the full list.
async fn get(ctx: &Ctx, id: &str) -> Result<(), CliError> {
    let post = fetch_all(ctx)
        .await?
        .into_iter()
        .find(|post| post.id == id)
        .ok_or_else(|| CliError::NotFound(format!("post {id}")))?;
    print_json(&post)
}

async fn create(ctx: &Ctx, body: PostCreateRequest) -> Result<(), CliError> {
    require("title", &body.title)?;
    require("content", &body.content)?;
    require("author", &body.author)?;
    let req = ctx.authorized(Method::POST, &["posts"])?.json(&body);
    let res: PostResponse = ctx.fetch(req).await?;
    print_json(&res)
}

async fn delete(ctx: &Ctx, id: &str) -> Result<(), CliError> {
    require("id", id)?;
    ctx.execute(ctx.authorized(Method::DELETE, &["posts", id])?)
        .await?;
    print_status("deleted")
}
