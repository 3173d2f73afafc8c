//! Default policy for session faults no caller-supplied hook handles.
//!
//! [`handle`] is the default body of the `on_exception` hook: a terminal,
//! best-effort observability shim invoked after the fault has already ended
//! the operation it arose from. It never fails, retries or escalates.

use std::io;

use crate::{error::SessionError, internal};

/// Closed classification of a session fault, evaluated once per fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultClass {
    /// The handling task was deliberately terminated (shutdown, cancellation).
    Cancelled,

    /// Expected outcome of a normal client disconnect: the peer reset or
    /// closed the connection, or the descriptor was already torn down.
    BenignDisconnect,

    /// Everything else. Never dropped silently.
    Unexpected,
}

/// Classify a fault into one of the three policy buckets.
#[must_use]
pub fn classify(fault: &SessionError) -> FaultClass {
    match fault {
        SessionError::Cancelled | SessionError::Shutdown => FaultClass::Cancelled,
        SessionError::Connection(err) => match err.kind() {
            // ECONNRESET/EPIPE (and the ECONNABORTED spelling some platforms
            // use): the peer vanished mid-session.
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            // EINVAL, e.g. an operation on an already-closed descriptor.
            | io::ErrorKind::InvalidInput => FaultClass::BenignDisconnect,
            _ => FaultClass::Unexpected,
        },
        SessionError::Tls(_) | SessionError::Protocol(_) | SessionError::Timeout(_) => {
            FaultClass::Unexpected
        }
    }
}

/// Apply the default fault policy: discard shutdown noise and benign
/// disconnects, log one diagnostic line for anything else.
///
/// Total and reentrant; writing the diagnostic line is the only side effect.
pub fn handle(fault: &SessionError) {
    match classify(fault) {
        FaultClass::Cancelled | FaultClass::BenignDisconnect => {}
        FaultClass::Unexpected => internal!(level = ERROR, "{fault}"),
    }
}
