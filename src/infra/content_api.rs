//! reqwest adapter for the remote content API.

use std::time::Instant;

use async_trait::async_trait;
use bytes::Bytes;
use metrics::{counter, histogram};
use reqwest::{Client, Method, RequestBuilder, header::AUTHORIZATION};
use serde::de::DeserializeOwned;
use signal_api_types::{
    ConfigResponse, ContactRequest, ErrorBody, MessageResponse, NewsletterRequest,
    NewsletterResponse, PostCreateRequest, PostResponse, SubscribeRequest, SubscribeResponse,
    SubscriberResponse,
};
use tracing::debug;
use url::Url;

use crate::application::content::{ApiError, ContentApi};
use crate::config::ContentSettings;
use crate::domain::access::ServerConfig;
use crate::domain::credential::BearerCredential;
use crate::domain::messages::{ContactMessage, NewsletterDraft, NewsletterReport};
use crate::domain::posts::{NewPost, Post};
use crate::domain::subscribers::{EmailAddress, Subscriber};
use crate::infra::error::InfraError;
use crate::infra::telemetry::{CONTENT_REQUEST_MS, CONTENT_REQUESTS_TOTAL};
use crate::presentation::views::encode_component;

#[derive(Clone, Debug)]
pub struct HttpContentApi {
    client: Client,
    base: Url,
}

impl HttpContentApi {
    pub fn new(settings: &ContentSettings) -> Result<Self, InfraError> {
        Self::with_base(settings.base_url.clone(), &settings.user_agent)
    }

    /// `base` must end with `/`; endpoint paths are joined beneath it.
    pub fn with_base(base: Url, user_agent: &str) -> Result<Self, InfraError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|err| InfraError::content_api(format!("failed to build client: {err}")))?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::Transport(format!("invalid endpoint `{path}`: {err}")))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.request(method, self.url(path)?))
    }

    fn authorized(
        &self,
        method: Method,
        path: &str,
        credential: &BearerCredential,
    ) -> Result<RequestBuilder, ApiError> {
        Ok(self
            .request(method, path)?
            .header(AUTHORIZATION, credential.header_value()))
    }

    /// Send a request and return the body of a successful response. Every
    /// call is counted and timed under `endpoint`.
    async fn send(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<Bytes, ApiError> {
        let started = Instant::now();
        let result = Self::exchange(request).await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(err) => err.kind(),
        };
        counter!(CONTENT_REQUESTS_TOTAL, "endpoint" => endpoint, "outcome" => outcome)
            .increment(1);
        histogram!(CONTENT_REQUEST_MS, "endpoint" => endpoint).record(elapsed_ms);
        debug!(endpoint, outcome, elapsed_ms, "content api call finished");

        result
    }

    async fn exchange(request: RequestBuilder) -> Result<Bytes, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        if status.is_success() {
            Ok(bytes)
        } else {
            let detail = ErrorBody::from_slice(&bytes).detail_text();
            Err(ApiError::from_status(status.as_u16(), detail))
        }
    }

    async fn fetch_posts(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<Vec<Post>, ApiError> {
        let bytes = self.send(endpoint, request).await?;
        decode::<Vec<PostResponse>>(&bytes)?
            .into_iter()
            .map(|post| Post::try_from(post).map_err(|err| ApiError::Decode(err.to_string())))
            .collect()
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Path for a single subscriber, with the address percent-encoded.
fn subscriber_path(email: &str) -> String {
    format!("subscribers/{}", encode_component(email))
}

fn post_path(id: &str) -> String {
    format!("posts/{}", encode_component(id))
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn server_config(&self) -> Result<ServerConfig, ApiError> {
        let bytes = self
            .send("config", self.request(Method::GET, "config")?)
            .await?;
        decode::<ConfigResponse>(&bytes).map(ServerConfig::from)
    }

    async fn verify_key(&self, credential: &BearerCredential) -> Result<(), ApiError> {
        let request = self.authorized(Method::POST, "verify-key", credential)?;
        self.send("verify_key", request).await.map(|_| ())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.fetch_posts("list_posts", self.request(Method::GET, "posts")?)
            .await
    }

    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, ApiError> {
        let mut url = self.url("posts/search")?;
        url.query_pairs_mut().append_pair("q", term);
        self.fetch_posts("search_posts", self.client.get(url)).await
    }

    async fn create_post(
        &self,
        post: &NewPost,
        credential: &BearerCredential,
    ) -> Result<Post, ApiError> {
        let request = self
            .authorized(Method::POST, "posts", credential)?
            .json(&PostCreateRequest::from(post));
        let bytes = self.send("create_post", request).await?;
        let created = decode::<PostResponse>(&bytes)?;
        Post::try_from(created).map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn delete_post(&self, id: &str, credential: &BearerCredential) -> Result<(), ApiError> {
        let request = self.authorized(Method::DELETE, &post_path(id), credential)?;
        self.send("delete_post", request).await.map(|_| ())
    }

    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, ApiError> {
        let bytes = self
            .send("list_subscribers", self.request(Method::GET, "subscribers")?)
            .await?;
        decode::<Vec<SubscriberResponse>>(&bytes)?
            .into_iter()
            .map(|entry| {
                Subscriber::try_from(entry).map_err(|err| ApiError::Decode(err.to_string()))
            })
            .collect()
    }

    async fn subscribe(&self, email: &EmailAddress) -> Result<String, ApiError> {
        let request = self
            .request(Method::POST, "subscribe")?
            .json(&SubscribeRequest {
                email: email.as_str().to_string(),
            });
        let bytes = self.send("subscribe", request).await?;
        decode::<SubscribeResponse>(&bytes).map(|ack| ack.message)
    }

    async fn remove_subscriber(
        &self,
        email: &str,
        credential: &BearerCredential,
    ) -> Result<(), ApiError> {
        let request = self.authorized(Method::DELETE, &subscriber_path(email), credential)?;
        self.send("remove_subscriber", request).await.map(|_| ())
    }

    async fn send_newsletter(
        &self,
        draft: &NewsletterDraft,
        credential: &BearerCredential,
    ) -> Result<NewsletterReport, ApiError> {
        let request = self
            .authorized(Method::POST, "newsletter/send", credential)?
            .json(&NewsletterRequest::from(draft));
        let bytes = self.send("send_newsletter", request).await?;
        decode::<NewsletterResponse>(&bytes).map(NewsletterReport::from)
    }

    async fn send_contact(&self, message: &ContactMessage) -> Result<Option<String>, ApiError> {
        let request = self
            .request(Method::POST, "api/contact")?
            .json(&ContactRequest::from(message));
        let bytes = self.send("send_contact", request).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        decode::<MessageResponse>(&bytes).map(|ack| ack.message)
    }
}
