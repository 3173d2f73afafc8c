//! Session configuration and transport security policy for an SMTP server.
//!
//! This crate is the declarative core a server process builds once and then
//! shares, read-only, with every connection-handling task:
//!
//! - [`config::Settings`]: the operational parameters (port, timeouts, size
//!   limits, advertised hostname) and the per-session lifecycle hooks.
//! - [`config::tls::TlsSettings`]: the transport security profile, from which
//!   [`negotiation::NegotiationParams`] are derived lazily at upgrade time.
//! - [`fault`]: the default policy applied to session faults no caller-supplied
//!   hook handles.
//!
//! The accept loop, SMTP command state machine and wire parsing live in the
//! consuming server, not here.

pub mod config;
pub mod error;
pub mod fault;
pub mod hooks;
pub mod logging;
pub mod negotiation;

pub use tracing;

pub use config::tls::{TlsLogging, TlsMode, TlsSettings};
pub use config::{Port, Settings, SettingsBuilder};
pub use error::{SessionError, TlsError, TlsResult};
pub use hooks::{Decision, DefaultHooks, SessionHooks};
pub use negotiation::NegotiationParams;
