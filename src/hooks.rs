//! Per-session lifecycle hooks.
//!
//! The protocol engine calls into one [`SessionHooks`] object at fixed points
//! of every session. Each hook is independently overridable through a default
//! trait method; no consistency between hooks is assumed or enforced. One
//! object serves all sessions concurrently, so hooks take `&self` and must be
//! `Send + Sync`.

use std::borrow::Cow;

use async_trait::async_trait;

use crate::{error::SessionError, fault};

/// Policy decision returned by the greeting and envelope hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject { reply: Cow<'static, str> },
}

impl Decision {
    /// Reject with the reply line the engine should send to the client.
    #[must_use]
    pub fn reject(reply: impl Into<Cow<'static, str>>) -> Self {
        Self::Reject {
            reply: reply.into(),
        }
    }

    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// Capability interface invoked by the protocol engine at session lifecycle
/// points.
///
/// For one connection the hooks fire in protocol order and never concurrently
/// with each other; across connections they may run in parallel without
/// ordering guarantees.
#[async_trait]
pub trait SessionHooks: Send + Sync {
    /// Connection accepted.
    async fn on_open(&self) {}

    /// Connection terminated.
    async fn on_close(&self) {}

    /// About to enter the command dialogue loop.
    async fn before_loop(&self) {}

    /// Client issued STARTTLS; fired before the handshake begins.
    async fn on_starttls(&self) {}

    /// Client greeted with HELO/EHLO; `_greeting` is the raw argument bytes.
    async fn on_hello(&self, _greeting: &[u8]) -> Decision {
        Decision::Accept
    }

    /// Client opened a mail transaction.
    async fn on_mail_from(&self, _sender: &str) -> Decision {
        Decision::Accept
    }

    /// Client added a recipient.
    async fn on_rcpt_to(&self, _recipient: &str) -> Decision {
        Decision::Accept
    }

    /// An unhandled fault surfaced during connection handling.
    ///
    /// Synchronous on purpose: the default policy must never park the task
    /// that is already unwinding. Defaults to [`fault::handle`].
    fn on_exception(&self, fault: &SessionError) {
        fault::handle(fault);
    }
}

/// The all-default hook set: permissive decisions, no side effects, default
/// fault policy. This is the hook object a default-built configuration
/// carries.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHooks;

#[async_trait]
impl SessionHooks for DefaultHooks {}
