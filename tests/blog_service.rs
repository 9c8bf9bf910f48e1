mod common;

use std::sync::Arc;

use common::{FakeContentApi, VALID_KEY};
use signal_site::application::blog::{BlogService, LOAD_FAILED_MESSAGE};
use signal_site::application::notice::AUTH_FAILED_MESSAGE;
use signal_site::domain::credential::BearerCredential;
use signal_site::domain::posts::NewPost;

fn key(raw: &str) -> BearerCredential {
    BearerCredential::parse(raw).expect("credential")
}

#[tokio::test]
async fn starts_loading_until_init() {
    let api = Arc::new(FakeContentApi::with_posts(3));
    let blog = BlogService::new(api.clone());

    let before = blog.snapshot().await;
    assert!(before.is_loading);
    assert!(before.posts.is_empty());
    assert_eq!(api.calls("list_posts").await, 0);

    let after = blog.init().await;
    assert!(!after.is_loading);
    assert!(!after.is_error);
    assert_eq!(after.posts.len(), 3);
}

#[tokio::test]
async fn created_post_appears_first() {
    let api = Arc::new(FakeContentApi::with_posts(2));
    let blog = BlogService::new(api.clone());
    blog.init().await;

    let post = NewPost::new("Rate cuts", "<p>Analysis</p>", "Ann", None).expect("valid post");
    let outcome = blog.create_post(post, &key(VALID_KEY)).await;
    assert!(outcome.succeeded());
    assert_eq!(outcome.notice().text, "Post created successfully!");

    let cached = blog.snapshot().await;
    assert_eq!(cached.posts[0].title, "Rate cuts");

    assert!(blog.fetch_posts().await.is_none());
    let refreshed = blog.snapshot().await;
    assert_eq!(refreshed.posts[0].title, "Rate cuts");
    assert_eq!(refreshed.posts.len(), 3);
}

#[tokio::test]
async fn delete_removes_exactly_one_entry() {
    let api = Arc::new(FakeContentApi::with_posts(4));
    let blog = BlogService::new(api.clone());
    blog.init().await;

    let outcome = blog.delete_post("p2", &key(VALID_KEY)).await;
    assert!(outcome.succeeded());

    let ids: Vec<String> = blog
        .snapshot()
        .await
        .posts
        .into_iter()
        .map(|post| post.id)
        .collect();
    assert_eq!(ids, ["p1", "p3", "p4"]);
}

#[tokio::test]
async fn rejected_credentials_get_the_authentication_message() {
    let api = Arc::new(FakeContentApi::with_posts(1));
    let blog = BlogService::new(api.clone());
    blog.init().await;

    let post = NewPost::new("T", "C", "A", None).expect("valid post");
    let created = blog.create_post(post, &key("wrong")).await;
    assert!(!created.succeeded());
    assert_eq!(created.notice().text, AUTH_FAILED_MESSAGE);

    let deleted = blog.delete_post("p1", &key("wrong")).await;
    assert_eq!(deleted.notice().text, AUTH_FAILED_MESSAGE);

    let missing = blog.delete_post("nope", &key(VALID_KEY)).await;
    assert_eq!(missing.notice().text, "Post not found");
    assert_ne!(missing.notice().text, AUTH_FAILED_MESSAGE);

    assert_eq!(blog.snapshot().await.posts.len(), 1);
}

#[tokio::test]
async fn failed_fetch_sets_error_and_is_retried() {
    let api = Arc::new(FakeContentApi::with_posts(2));
    api.fail_listing(true).await;
    let blog = BlogService::new(api.clone());

    let snapshot = blog.init().await;
    assert!(snapshot.is_error);
    assert!(!snapshot.is_loading);

    let notice = blog.ensure_loaded().await.notice.expect("still failing");
    assert_eq!(notice.text, LOAD_FAILED_MESSAGE);
    assert_eq!(api.calls("list_posts").await, 2);

    api.fail_listing(false).await;
    assert!(blog.ensure_loaded().await.notice.is_none());
    assert_eq!(blog.snapshot().await.posts.len(), 2);

    // A healthy cache is not refetched.
    blog.ensure_loaded().await;
    assert_eq!(api.calls("list_posts").await, 3);
}

#[tokio::test]
async fn request_during_fetch_waits_for_the_list() {
    let api = Arc::new(FakeContentApi::with_posts(2));
    let gate = api.hold_listing().await;
    let blog = Arc::new(BlogService::new(api.clone()));

    let first = tokio::spawn({
        let blog = blog.clone();
        async move { blog.init().await }
    });
    while api.calls("list_posts").await == 0 {
        tokio::task::yield_now().await;
    }
    assert!(blog.snapshot().await.is_loading);

    let second = tokio::spawn({
        let blog = blog.clone();
        async move { blog.ensure_loaded().await }
    });
    tokio::task::yield_now().await;
    gate.add_permits(1);

    let load = second.await.expect("join");
    assert!(!load.snapshot.is_loading);
    assert_eq!(load.snapshot.posts.len(), 2);
    assert!(load.notice.is_none());
    assert!(!first.await.expect("join").is_loading);
    assert_eq!(api.calls("list_posts").await, 1);
}
