//! Server configuration: the value object every connection-handling task
//! reads and never mutates.
//!
//! A [`Settings`] is built once, before the first connection is accepted,
//! either from its defaults, through the builder, or by deserializing a
//! configuration file. The lifecycle hooks ride along as a shared capability
//! object so one configuration serves arbitrarily many concurrent sessions.

pub mod parser;
pub mod tls;

use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hooks::SessionHooks;
use tls::{TlsMode, TlsSettings};

/// Listening endpoint: a numeric port or a named service (`"smtp"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Port {
    Number(u16),
    Service(String),
}

// Hand-rolled so every construction path enforces the same validity rule:
// an empty service name is rejected here just as it is in `FromStr`.
impl<'de> Deserialize<'de> for Port {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u16),
            Service(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(port) => Ok(Self::Number(port)),
            Raw::Service(name) if name.is_empty() => {
                Err(serde::de::Error::custom(PortParseError))
            }
            Raw::Service(name) => Ok(Self::Service(name)),
        }
    }
}

impl Default for Port {
    fn default() -> Self {
        Self::Number(defaults::PORT)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(port) => write!(f, "{port}"),
            Self::Service(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Error)]
#[error("empty port specification")]
pub struct PortParseError;

impl FromStr for Port {
    type Err = PortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PortParseError);
        }

        Ok(s.parse::<u16>()
            .map_or_else(|_| Self::Service(s.to_string()), Self::Number))
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self::Number(port)
    }
}

/// Operational parameters and per-session hooks for an SMTP server.
///
/// Read-only after construction; safe to share across connection tasks.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub port: Port,

    /// Idle-connection timeout in seconds. `0` means "no timeout"; whether and
    /// how that is enforced is the connection loop's decision.
    #[serde(default = "defaults::timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on accepted message body size in bytes, advertised and
    /// enforced by the protocol engine.
    #[serde(default = "defaults::max_message_size")]
    pub max_message_size: usize,

    /// Hostname advertised in the banner; the consumer supplies its own when
    /// absent.
    #[serde(default)]
    pub hostname: Option<String>,

    /// Transport security profile. `None` disables TLS entirely.
    #[serde(default)]
    pub tls: Option<TlsSettings>,

    /// Lifecycle hooks invoked by the protocol engine, one object for all
    /// sessions.
    #[serde(skip, default = "defaults::hooks")]
    pub hooks: Arc<dyn SessionHooks>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: Port::default(),
            timeout_secs: defaults::timeout_secs(),
            max_message_size: defaults::max_message_size(),
            hostname: None,
            tls: None,
            hooks: defaults::hooks(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("port", &self.port)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_message_size", &self.max_message_size)
            .field("hostname", &self.hostname)
            .field("tls", &self.tls)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Create a new `Settings` builder.
    #[must_use]
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    fn tls_mode(&self) -> Option<TlsMode> {
        self.tls.as_ref().map(|tls| tls.mode)
    }

    /// `true` iff a TLS profile is present and upgrading is the client's
    /// choice. Mutually exclusive with [`Self::tls_required`].
    #[must_use]
    pub fn tls_optional(&self) -> bool {
        matches!(self.tls_mode(), Some(TlsMode::Opportunistic))
    }

    /// `true` iff a TLS profile is present and no transaction may proceed
    /// before the connection is upgraded.
    #[must_use]
    pub fn tls_required(&self) -> bool {
        matches!(self.tls_mode(), Some(TlsMode::Required))
    }
}

/// Builder for [`Settings`].
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    /// Set the listening endpoint.
    #[must_use]
    pub fn with_port(mut self, port: impl Into<Port>) -> Self {
        self.settings.port = port.into();
        self
    }

    /// Set the idle-connection timeout in seconds.
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.settings.timeout_secs = timeout_secs;
        self
    }

    /// Set the maximum accepted message body size in bytes.
    #[must_use]
    pub const fn with_max_message_size(mut self, max_message_size: usize) -> Self {
        self.settings.max_message_size = max_message_size;
        self
    }

    /// Set the advertised hostname.
    #[must_use]
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.settings.hostname = Some(hostname.into());
        self
    }

    /// Set the transport security profile.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsSettings) -> Self {
        self.settings.tls = Some(tls);
        self
    }

    /// Replace the session hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Arc<dyn SessionHooks>) -> Self {
        self.settings.hooks = hooks;
        self
    }

    /// Build the final `Settings`.
    #[must_use]
    pub fn build(self) -> Settings {
        self.settings
    }
}

mod defaults {
    use std::sync::Arc;

    use crate::hooks::{DefaultHooks, SessionHooks};

    pub(super) const PORT: u16 = 3001;

    pub(super) const fn timeout_secs() -> u64 {
        1800
    }

    pub(super) const fn max_message_size() -> usize {
        32_000
    }

    pub(super) fn hooks() -> Arc<dyn SessionHooks> {
        Arc::new(DefaultHooks)
    }
}
