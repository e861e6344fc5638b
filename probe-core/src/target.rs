//! Probe targets.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::probe::ProbeKind;

/// How a target is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Through the API gateway, which forwards to a backend.
    Gateway,
    /// Straight to the backend service.
    Direct,
}

/// A validated endpoint to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    name: String,
    route: Route,
    url: Url,
}

impl Target {
    /// Parse and validate a target URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the URL does not parse, is not
    /// `http`/`https`, or has no host.
    pub fn parse(name: &str, route: Route, url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(url)
            .map_err(|e| ConfigError::Invalid(format!("target {name}: invalid url {url:?}: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "target {name}: unsupported scheme {:?}",
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(ConfigError::Invalid(format!("target {name}: url has no host")));
        }

        Ok(Self {
            name: name.to_string(),
            route,
            url,
        })
    }

    /// Display name, e.g. `API Gateway`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `host:port`, with the scheme's default port when none is given.
    pub fn authority(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port_or_known_default() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// The service health endpoint on the same origin.
    pub fn health_url(&self) -> Url {
        let mut url = self.url.clone();
        url.set_path("/health");
        url.set_query(None);
        url.set_fragment(None);
        url
    }

    /// URL a probe of the given kind is sent to.
    pub fn url_for(&self, kind: ProbeKind) -> Url {
        match kind {
            ProbeKind::Register => self.url.clone(),
            ProbeKind::Health => self.health_url(),
        }
    }

    /// Heading line printed before a probe's outcome.
    pub fn label(&self, kind: ProbeKind) -> String {
        let authority = self.authority();
        match (kind, self.route) {
            (ProbeKind::Register, Route::Gateway) => {
                format!("Testing POST through {} ({}):", self.name, authority)
            }
            (ProbeKind::Register, Route::Direct) => {
                format!("Testing POST directly to {} ({}):", self.name, authority)
            }
            (ProbeKind::Health, _) => {
                format!("Checking health of {} ({}):", self.name, authority)
            }
        }
    }
}
