//! Gateway/direct response comparison.

use std::fmt;

use crate::probe::Probe;

/// Whether every target answered the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parity {
    /// All probes got a response with the same status and body.
    Identical {
        /// The shared status code.
        status: u16,
    },
    /// At least one probe failed or answered differently.
    Differs(Vec<(String, Option<u16>)>),
}

impl Parity {
    /// Compare finished probes.
    pub fn of(probes: &[Probe]) -> Self {
        let mut responses = probes.iter().map(|p| p.outcome.as_ref().ok());

        if let Some(Some(first)) = responses.next() {
            if responses.all(|r| r == Some(first)) {
                return Parity::Identical {
                    status: first.status,
                };
            }
        }

        Parity::Differs(
            probes
                .iter()
                .map(|p| (p.target.clone(), p.outcome.as_ref().ok().map(|r| r.status)))
                .collect(),
        )
    }

    /// True for [`Parity::Identical`].
    pub fn is_identical(&self) -> bool {
        matches!(self, Parity::Identical { .. })
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::Identical { status } => writeln!(f, "Parity: identical (status {status})"),
            Parity::Differs(targets) => {
                writeln!(f, "Parity: differs")?;
                for (name, status) in targets {
                    match status {
                        Some(code) => writeln!(f, "  {name}: {code}")?,
                        None => writeln!(f, "  {name}: error")?,
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::probe::ProbeResponse;

    fn answered(name: &str, status: u16, body: &str) -> Probe {
        Probe {
            target: name.into(),
            outcome: Ok(ProbeResponse {
                status,
                body: body.into(),
            }),
        }
    }

    fn failed(name: &str) -> Probe {
        Probe {
            target: name.into(),
            outcome: Err(ProbeError::Connect {
                url: "http://localhost:3001/".into(),
                reason: "Connection refused".into(),
            }),
        }
    }

    #[test]
    fn identical_responses() {
        let parity = Parity::of(&[answered("gw", 201, "{}"), answered("svc", 201, "{}")]);
        assert!(parity.is_identical());
        assert_eq!(parity.to_string(), "Parity: identical (status 201)\n");
    }

    #[test]
    fn different_bodies_differ() {
        let parity = Parity::of(&[
            answered("gw", 201, r#"{"id":1}"#),
            answered("svc", 201, r#"{"id":2}"#),
        ]);
        assert!(!parity.is_identical());
    }

    #[test]
    fn failure_differs() {
        let parity = Parity::of(&[answered("API Gateway", 503, "down"), failed("User Service")]);
        assert_eq!(
            parity.to_string(),
            "Parity: differs\n  API Gateway: 503\n  User Service: error\n"
        );
    }

    #[test]
    fn all_failed_differs() {
        let parity = Parity::of(&[failed("a"), failed("b")]);
        assert!(!parity.is_identical());
    }

    #[test]
    fn no_probes_differs() {
        assert_eq!(Parity::of(&[]), Parity::Differs(Vec::new()));
    }
}
