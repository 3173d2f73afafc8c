//! Transport security profile for incoming SMTP connections.
//!
//! The profile only records paths and policy; certificate material is read
//! from disk when negotiation parameters are derived, so a profile can be
//! constructed (and a whole configuration validated) without touching the
//! filesystem.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio_rustls::rustls::{CipherSuite, ProtocolVersion, crypto::aws_lc_rs::ALL_CIPHER_SUITES};

/// How strictly TLS is applied to a session carrying this profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TlsMode {
    /// The client may upgrade via STARTTLS but can transact in plaintext.
    Opportunistic,

    /// No mail transaction is permitted until the connection is upgraded.
    #[default]
    Required,
}

/// Diagnostic verbosity handed through to the TLS layer.
///
/// Opaque to this crate; the connection handler wires it into rustls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TlsLogging {
    #[default]
    Off,

    /// Log negotiated secrets (`SSLKEYLOGFILE`-style). Debugging only.
    KeyMaterial,
}

/// TLS profile: credential paths plus negotiation policy.
///
/// Immutable once built. [`crate::TlsSettings::negotiation_params`] turns it
/// into handshake-ready parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TlsSettings {
    /// Path to the PEM-encoded certificate chain.
    pub certificate: PathBuf,

    /// Path to the PEM-encoded private key.
    pub key: PathBuf,

    #[serde(default)]
    pub mode: TlsMode,

    /// Acceptable protocol versions, in preference order.
    #[serde(
        default = "default_versions",
        serialize_with = "super::parser::protocol_version::serialize",
        deserialize_with = "super::parser::protocol_version::deserialize"
    )]
    pub versions: Vec<ProtocolVersion>,

    /// Acceptable cipher suites, in preference order.
    #[serde(
        default = "default_ciphers",
        serialize_with = "super::parser::cipher_suite::serialize",
        deserialize_with = "super::parser::cipher_suite::deserialize"
    )]
    pub ciphers: Vec<CipherSuite>,

    #[serde(default)]
    pub logging: TlsLogging,
}

impl TlsSettings {
    /// Build a profile from a certificate/key pair, inheriting every other
    /// default: TLS required, the full legacy-to-modern version list, the full
    /// provider cipher catalog, logging off.
    #[must_use]
    pub fn from_paths(certificate: impl Into<PathBuf>, key: impl Into<PathBuf>) -> Self {
        Self {
            certificate: certificate.into(),
            key: key.into(),
            mode: TlsMode::default(),
            versions: default_versions(),
            ciphers: default_ciphers(),
            logging: TlsLogging::default(),
        }
    }
}

pub(crate) fn default_versions() -> Vec<ProtocolVersion> {
    vec![
        ProtocolVersion::TLSv1_0,
        ProtocolVersion::TLSv1_1,
        ProtocolVersion::TLSv1_2,
        ProtocolVersion::TLSv1_3,
    ]
}

pub(crate) fn default_ciphers() -> Vec<CipherSuite> {
    ALL_CIPHER_SUITES
        .iter()
        .map(|supported| supported.suite())
        .collect()
}
