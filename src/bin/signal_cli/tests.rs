#![deny(clippy::all, clippy::pedantic)]

use httpmock::MockServer;
use tempfile::NamedTempFile;

use crate::args::{Cli, Commands, ContactCmd, NewsletterCmd, PostsCmd, SubscribersCmd};
use crate::client::{CliError, Ctx, build_ctx_from_cli};
use crate::handlers::{contact, newsletter, posts, site, subscribers};

const POST_JSON: &str = r#"{"id":"p1","title":"T","content":"<p>C</p>","author":"Ann","createdAt":"2025-03-14T09:26:53.589793","imageUrl":null}"#;

fn ctx(server: &MockServer) -> Ctx {
    Ctx::new(&server.base_url(), Some("key")).expect("ctx")
}

fn anonymous(server: &MockServer) -> Ctx {
    Ctx::new(&server.base_url(), None).expect("ctx")
}

fn tmp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    std::io::Write::write_all(&mut file, contents.as_bytes()).expect("write tmp");
    file
}

fn cli(key_file: Option<std::path::PathBuf>, env: Option<&str>) -> Cli {
    Cli {
        site: Some("https://api.example.com".to_string()),
        key_file,
        api_key_env: env.map(str::to_string),
        command: Commands::Config,
    }
}

#[test]
fn build_ctx_prefers_key_file() -> Result<(), CliError> {
    let file = tmp_file("file-key\n");
    let ctx = build_ctx_from_cli(&cli(Some(file.path().to_path_buf()), Some("env-key")))?;
    let header = ctx.auth_header()?;
    assert_eq!(header.to_str().expect("header str"), "Bearer file-key");
    Ok(())
}

#[test]
fn build_ctx_allows_missing_key_until_needed() -> Result<(), CliError> {
    let ctx = build_ctx_from_cli(&cli(None, None))?;
    let err = ctx.auth_header().expect_err("no key");
    assert!(matches!(err, CliError::MissingKey));
    Ok(())
}

#[test]
fn build_ctx_requires_site() {
    let mut args = cli(None, Some("k"));
    args.site = None;
    let err = build_ctx_from_cli(&args).expect_err("missing site should fail");
    assert!(matches!(err, CliError::MissingSite));
}

#[test]
fn urls_keep_base_path_and_encode_segments() -> Result<(), CliError> {
    let ctx = Ctx::new("https://api.example.com/v2", Some("k"))?;
    let url = ctx.url(&["posts", "a b/c"])?;
    assert_eq!(url.as_str(), "https://api.example.com/v2/posts/a%20b%2Fc");
    Ok(())
}

#[test]
fn read_value_prefers_file_over_inline() -> Result<(), CliError> {
    let file = tmp_file("from-file");
    let val = crate::io::read_value(Some("inline".into()), Some(file.path().to_path_buf()))?;
    assert_eq!(val, "from-file");
    Ok(())
}

#[tokio::test]
async fn verify_key_sends_bearer() -> Result<(), CliError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/verify-key")
            .header("authorization", "Bearer key");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"message":"API key is valid"}"#);
    });

    site::verify_key(&ctx(&server)).await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn verify_key_reports_rejection_detail() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/verify-key");
        then.status(401)
            .header("content-type", "application/json")
            .body(r#"{"detail":"Invalid API key."}"#);
    });

    let err = site::verify_key(&ctx(&server))
        .await
        .expect_err("rejected key");
    match err {
        CliError::Server(message) => assert!(message.contains("Invalid API key.")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn posts_search_sends_query() -> Result<(), CliError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/posts/search")
            .query_param("q", "rate cuts");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!("[{POST_JSON}]"));
    });

    posts::handle(
        &anonymous(&server),
        PostsCmd::Search {
            term: " rate cuts ".into(),
        },
    )
    .await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn posts_get_reports_missing_id() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/posts");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!("[{POST_JSON}]"));
    });

    let err = posts::handle(&anonymous(&server), PostsCmd::Get { id: "nope".into() })
        .await
        .expect_err("unknown id");
    assert!(matches!(err, CliError::NotFound(_)));
}

#[tokio::test]
async fn posts_create_reads_content_file() -> Result<(), CliError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/posts")
            .header("authorization", "Bearer key")
            .json_body_includes(r#"{"title":"T","content":"<p>BODY</p>","author":"Ann"}"#);
        then.status(200)
            .header("content-type", "application/json")
            .body(POST_JSON);
    });

    let content = tmp_file("<p>BODY</p>");
    posts::handle(
        &ctx(&server),
        PostsCmd::Create {
            title: "T".into(),
            author: "Ann".into(),
            content: None,
            content_file: Some(content.path().to_path_buf()),
            image_url: Some("  ".into()),
        },
    )
    .await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn posts_delete_requires_key_before_any_request() {
    let server = MockServer::start();
    let err = posts::handle(&anonymous(&server), PostsCmd::Delete { id: "p1".into() })
        .await
        .expect_err("missing key");
    assert!(matches!(err, CliError::MissingKey));
}

#[tokio::test]
async fn subscribers_remove_hits_encoded_path() -> Result<(), CliError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("DELETE")
            .path("/subscribers/reader@example.com")
            .header("authorization", "Bearer key");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"message":"Unsubscribed"}"#);
    });

    subscribers::handle(
        &ctx(&server),
        SubscribersCmd::Remove {
            email: "reader@example.com".into(),
        },
    )
    .await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn subscribers_add_validates_locally() {
    let server = MockServer::start();
    let err = subscribers::handle(
        &anonymous(&server),
        SubscribersCmd::Add {
            email: "not-an-email".into(),
        },
    )
    .await
    .expect_err("invalid email");
    assert!(matches!(err, CliError::InvalidInput(_)));
}

#[tokio::test]
async fn newsletter_send_posts_subject_and_message() -> Result<(), CliError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/newsletter/send")
            .header("authorization", "Bearer key")
            .json_body_includes(r#"{"subject":"Weekly","message":"Hello"}"#);
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"message":"Newsletter sent to 2 subscribers","success_count":2,"error_count":0,"total_subscribers":2}"#);
    });

    newsletter::handle(
        &ctx(&server),
        NewsletterCmd::Send {
            subject: "Weekly".into(),
            message: Some("Hello".into()),
            message_file: None,
        },
    )
    .await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn contact_send_needs_no_key() -> Result<(), CliError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/api/contact")
            .json_body_includes(r#"{"name":"Ann","email":"ann@example.com","message":"Hi"}"#);
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"message":"Thanks"}"#);
    });

    contact::handle(
        &anonymous(&server),
        ContactCmd::Send {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            message: Some("Hi".into()),
            message_file: None,
        },
    )
    .await?;
    mock.assert();
    Ok(())
}
