#![deny(clippy::all, clippy::pedantic)]

use std::fs;

use axum::http::HeaderValue;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use signal_api_types::ErrorBody;
use signal_site::config::parse_base_url;
use signal_site::domain::credential::BearerCredential;
use thiserror::Error;

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("site URL is required (use --site or SIGNAL_SITE_URL)")]
    MissingSite,
    #[error("api key is required (use --key-file or SIGNAL_API_KEY)")]
    MissingKey,
    #[error("invalid site URL: {0}")]
    InvalidSite(String),
    #[error("failed to read key file: {0}")]
    KeyFile(std::io::Error),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Server(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Clone, Debug)]
pub struct Ctx {
    pub client: Client,
    pub base: Url,
    key: Option<BearerCredential>,
}

impl Ctx {
    pub fn new(site: &str, key: Option<&str>) -> Result<Self, CliError> {
        let base = parse_base_url(site).map_err(CliError::InvalidSite)?;
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self {
            client,
            base,
            key: key.and_then(BearerCredential::parse),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("signal-cli/", env!("CARGO_PKG_VERSION"))
    }

    pub fn auth_header(&self) -> Result<HeaderValue, CliError> {
        let key = self.key.as_ref().ok_or(CliError::MissingKey)?;
        HeaderValue::from_str(key.header_value()).map_err(|e| CliError::InvalidInput(e.to_string()))
    }

    /// Resolve `segments` below the base URL, percent-encoding each one.
    pub fn url(&self, segments: &[&str]) -> Result<Url, CliError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| CliError::InvalidSite(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn get(&self, segments: &[&str]) -> Result<RequestBuilder, CliError> {
        Ok(self.client.get(self.url(segments)?))
    }

    pub fn build(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, CliError> {
        Ok(self.client.request(method, self.url(segments)?))
    }

    pub fn authorized(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, CliError> {
        Ok(self
            .build(method, segments)?
            .header(axum::http::header::AUTHORIZATION, self.auth_header()?))
    }

    pub async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, CliError> {
        let resp = req.send().await?;
        Self::handle(resp).await
    }

    pub async fn execute(&self, req: RequestBuilder) -> Result<(), CliError> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let bytes = resp.bytes().await.unwrap_or_default();
            return Err(Self::server_error(status, &bytes));
        }
        Ok(())
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, CliError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(Self::server_error(status, &bytes));
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| CliError::Server(format!("failed to parse body: {e}")))
    }

    fn server_error(status: reqwest::StatusCode, bytes: &[u8]) -> CliError {
        let detail = ErrorBody::from_slice(bytes)
            .detail_text()
            .unwrap_or_else(|| String::from_utf8_lossy(bytes).into_owned());
        CliError::Server(format!("status {status} body {detail}"))
    }
}

/// Site is mandatory; the key is only checked by commands that send it.
pub fn build_ctx_from_cli(cli: &Cli) -> Result<Ctx, CliError> {
    let site = cli.site.clone().ok_or(CliError::MissingSite)?;
    let key = if let Some(path) = &cli.key_file {
        Some(
            fs::read_to_string(path)
                .map_err(CliError::KeyFile)?
                .trim()
                .to_string(),
        )
    } else {
        cli.api_key_env.clone()
    };

    Ctx::new(&site, key.as_deref())
}
