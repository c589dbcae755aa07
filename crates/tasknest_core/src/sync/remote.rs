//! Remote store and identity contracts.
//!
//! The authoritative server-side collection is reachable only with a valid
//! identity, so identity is an explicit parameter of every call instead of
//! an ambient singleton read inside the transport.

use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Push/read failure against the remote collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// No authenticated identity was available for the call.
    Auth,
    /// Remote unreachable or transport failure.
    Network(String),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth => write!(f, "no authenticated identity for remote call"),
            Self::Network(details) => write!(f, "remote transport failure: {details}"),
        }
    }
}

impl Error for RemoteError {}

/// Authenticated principal, supplied by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque user identifier.
    pub uid: String,
}

impl Identity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

/// External supplier of the current authenticated principal.
pub trait IdentityProvider {
    /// Returns the signed-in identity, or `None` when signed out.
    fn current_identity(&self) -> Option<Identity>;
}

/// Authoritative server-side task collection.
///
/// Writes are idempotent full-record upserts keyed by task id, so a record
/// acked remotely but not re-persisted locally is safe to push again.
pub trait RemoteStore {
    /// Upserts one record at key `task.id`, overwriting in full.
    fn put(&self, identity: &Identity, task: &Task) -> RemoteResult<()>;

    /// Reads the whole collection. Used only by read paths outside the
    /// sync engine (e.g. a dashboard), never by the orchestrator.
    fn get_all(&self, identity: &Identity) -> RemoteResult<Vec<Task>>;
}
