//! Sequential HTTP probing.

use reqwest::header::{CONTENT_TYPE, ORIGIN};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{Config, ConfigError};
use crate::error::ProbeError;
use crate::payload::RegistrationPayload;
use crate::report::Report;
use crate::target::Target;

/// What a probe asks the target for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// `POST` the registration payload to the target URL.
    Register,
    /// `GET /health` on the target's origin.
    Health,
}

/// A response that arrived in full, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body text, undecoded beyond charset conversion.
    pub body: String,
}

/// Result of one probe.
pub type ProbeOutcome = Result<ProbeResponse, ProbeError>;

/// A finished probe against one target.
#[derive(Debug, Clone)]
pub struct Probe {
    /// Target display name.
    pub target: String,
    /// Outcome.
    pub outcome: ProbeOutcome,
}

/// Sends probes one at a time with a shared client.
pub struct Prober {
    http: reqwest::Client,
    timeout: Duration,
    origin: String,
    payload: RegistrationPayload,
}

impl Prober {
    /// Build a prober from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let timeout = config.timeout();
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            timeout,
            origin: config.origin.clone(),
            payload: config.payload.clone(),
        })
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe a single target. Never fails; failures are the outcome.
    pub async fn probe(&self, target: &Target, kind: ProbeKind) -> ProbeOutcome {
        let url = target.url_for(kind);
        debug!(probe = target.name(), %url, ?kind, "sending probe");

        let request = match kind {
            ProbeKind::Register => self
                .http
                .post(url.clone())
                .header(CONTENT_TYPE, "application/json")
                .header(ORIGIN, &self.origin)
                .json(&self.payload),
            ProbeKind::Health => self.http.get(url.clone()).header(ORIGIN, &self.origin),
        };

        let result = async {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(ProbeResponse { status, body })
        }
        .await;

        match result {
            Ok(response) => {
                debug!(probe = target.name(), status = response.status, "probe answered");
                Ok(response)
            }
            Err(e) => {
                let err = ProbeError::from_reqwest(url.as_str(), self.timeout, e);
                warn!(probe = target.name(), error = %err, "probe failed");
                Err(err)
            }
        }
    }

    /// Probe every target in order, writing each block as it completes.
    ///
    /// The next request is only sent after the previous outcome is written.
    ///
    /// # Errors
    ///
    /// Only write failures on the report are returned.
    pub async fn run<W: Write>(
        &self,
        targets: &[Target],
        kind: ProbeKind,
        report: &mut Report<W>,
    ) -> std::io::Result<Vec<Probe>> {
        let mut probes = Vec::with_capacity(targets.len());

        for target in targets {
            report.start_block(&target.label(kind))?;
            let outcome = self.probe(target, kind).await;
            report.outcome(&outcome)?;
            probes.push(Probe {
                target: target.name().to_string(),
                outcome,
            });
        }

        Ok(probes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prober_uses_config_timeout() {
        let config = Config {
            timeout_secs: 3,
            ..Config::default()
        };
        let prober = Prober::new(&config).unwrap();
        assert_eq!(prober.timeout(), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn unreachable_target_is_an_outcome() {
        // Bind then drop to get a port nothing listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let target = Target::parse(
            "Nowhere",
            crate::Route::Direct,
            &format!("http://127.0.0.1:{port}/api/auth/register"),
        )
        .unwrap();

        let prober = Prober::new(&Config::default()).unwrap();
        let outcome = prober.probe(&target, ProbeKind::Register).await;

        let err = outcome.unwrap_err();
        assert!(matches!(err, ProbeError::Connect { .. }), "got {err:?}");
        assert!(err.url().ends_with("/api/auth/register"));
    }
}
