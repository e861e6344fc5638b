//! # regprobe-core
//!
//! Probes a registration endpoint through an API gateway and directly on the
//! backend service, then reports each outcome so the two can be compared.
//!
//! This crate provides:
//! - [`RegistrationPayload`] - The JSON body sent to every target
//! - [`Target`], [`Route`] - Where a probe goes and how it is labelled
//! - [`Config`] - TOML configuration with built-in defaults
//! - [`Prober`] - Sequential HTTP probing with a per-request timeout
//! - [`Report`] - Plain-text rendering of probe blocks
//! - [`Parity`] - Whether every target answered the same way

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
mod error;
mod parity;
mod payload;
mod probe;
mod report;
mod target;

pub use config::{Config, ConfigError};
pub use error::ProbeError;
pub use parity::Parity;
pub use payload::RegistrationPayload;
pub use probe::{Probe, ProbeKind, ProbeOutcome, ProbeResponse, Prober};
pub use report::{Report, SEPARATOR};
pub use target::{Route, Target};
