//! Error types for the configuration and security policy core.
//!
//! Credential loading failures are always surfaced to the caller; session
//! faults are classified (and possibly discarded) by [`crate::fault`].

use std::io;

use thiserror::Error;

/// Errors raised while loading or assembling TLS credential material.
///
/// Raised synchronously by [`crate::TlsSettings::negotiation_params`], never
/// swallowed or defaulted.
#[derive(Debug, Error)]
pub enum TlsError {
    /// The certificate file could not be opened or parsed.
    #[error("failed to load TLS certificate from {path}: {source}")]
    CertificateLoad {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The certificate file parsed but contained no certificates.
    #[error("no certificates found in {path}")]
    EmptyCertificate { path: String },

    /// The private key file could not be opened or parsed.
    #[error("failed to load TLS private key from {path}: {reason}")]
    KeyLoad { path: String, reason: String },

    /// The private key parsed but is not a supported signing key type.
    #[error("TLS private key rejected: {reason}")]
    KeyRejected { reason: String },
}

/// Specialized `Result` for credential operations.
pub type TlsResult<T> = std::result::Result<T, TlsError>;

/// A fault raised during connection handling.
///
/// Produced by the consuming protocol engine and funnelled into the
/// `on_exception` hook; [`crate::fault::classify`] decides what the default
/// policy does with it.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The handling task was deliberately cancelled.
    #[error("session cancelled")]
    Cancelled,

    /// A shutdown signal reached the handling task.
    #[error("shutdown requested")]
    Shutdown,

    /// Transport-level I/O failure.
    #[error("connection error: {0}")]
    Connection(#[from] io::Error),

    /// Credential loading or negotiation failure during an upgrade.
    #[error("TLS error: {0}")]
    Tls(#[from] TlsError),

    /// Protocol-level failure reported by the engine.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The session exceeded its configured idle timeout.
    #[error("session timed out after {0} seconds")]
    Timeout(u64),
}

impl SessionError {
    /// Returns `true` if the fault is deliberate termination rather than an
    /// error condition.
    #[must_use]
    pub const fn is_shutdown(&self) -> bool {
        matches!(self, Self::Shutdown | Self::Cancelled)
    }
}
