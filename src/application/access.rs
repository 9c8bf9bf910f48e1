//! Admin access gate: fetch configuration, then delegate the key check to
//! the remote verification endpoint. Any failure along the way denies access.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::content::{ApiError, ContentApi};
use crate::domain::access::{AccessState, ServerConfig};
use crate::domain::credential::BearerCredential;

/// One evaluation of the gate for a single page request.
#[derive(Debug, Clone)]
pub struct AccessCheck {
    state: AccessState,
    config: Option<ServerConfig>,
    candidate: Option<BearerCredential>,
}

impl AccessCheck {
    pub fn new(candidate: Option<&str>) -> Self {
        Self {
            state: AccessState::Unknown,
            config: None,
            candidate: candidate.and_then(BearerCredential::parse),
        }
    }

    pub fn state(&self) -> AccessState {
        self.state
    }

    pub fn is_authorized(&self) -> bool {
        self.state == AccessState::Authorized
    }

    pub fn config(&self) -> Option<ServerConfig> {
        self.config
    }

    /// Record the configuration response. Returns the credential that must
    /// now be verified, or `None` when the check is already settled.
    pub fn config_loaded(
        &mut self,
        result: Result<ServerConfig, ApiError>,
    ) -> Option<BearerCredential> {
        if self.state != AccessState::Unknown {
            return None;
        }

        match result {
            Ok(config) => {
                self.config = Some(config);
                match self.candidate.clone() {
                    Some(credential) => Some(credential),
                    None => {
                        self.state = AccessState::Unauthorized;
                        None
                    }
                }
            }
            Err(_) => {
                self.state = AccessState::Unauthorized;
                None
            }
        }
    }

    /// Record the verification response; only a success authorizes.
    pub fn verification_finished(&mut self, result: Result<(), ApiError>) {
        if self.state != AccessState::Unknown || self.config.is_none() {
            return;
        }
        self.state = match result {
            Ok(()) => AccessState::Authorized,
            Err(_) => AccessState::Unauthorized,
        };
    }
}

pub struct AccessGate {
    api: Arc<dyn ContentApi>,
}

impl AccessGate {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self { api }
    }

    /// Run the full gate for a key taken from the page URL.
    pub async fn evaluate(&self, key: Option<&str>) -> AccessCheck {
        let mut check = AccessCheck::new(key);

        let config = self.api.server_config().await;
        if let Err(err) = &config {
            warn!(error = %err, kind = err.kind(), "failed to load server configuration");
        }

        if let Some(credential) = check.config_loaded(config) {
            let result = self.api.verify_key(&credential).await;
            if let Err(err) = &result {
                warn!(error = %err, kind = err.kind(), "key verification failed");
            }
            check.verification_finished(result);
        }

        info!(
            state = check.state().as_str(),
            key_supplied = key.is_some_and(|k| !k.trim().is_empty()),
            "access gate evaluated"
        );
        check
    }
}
