use hdpcore::{
    ac::resource::ResourceKind,
    error::{
        BackendError,
        ValueError,
    },
};
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("missing required argument {0}")]
    Misconfiguration(&'static str),
    #[error(transparent)]
    Rbac(#[from] hdprbac::error::Error),
    #[error("unknown user: {0}")]
    UnknownUser(String),
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error("expected to update {expected} users but updated {updated}")]
    BatchCountMismatch {
        expected: usize,
        updated: usize,
    },
}

/// Failures establishing who is acting, and where.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum ContextError {
    #[error("user {0} is authenticated but holds no roles")]
    Roleless(String),
    #[error("access of different {kind} resources: {first} and {second}")]
    ConflictingResourceContext {
        kind: ResourceKind,
        first: String,
        second: String,
    },
    #[error("no role could be resolved for user {0}")]
    UnresolvedSubject(String),
}

impl Error {
    /// Whether the request was refused for lack of authority.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::Rbac(hdprbac::error::Error::PermissionDenied(_)))
    }
}
