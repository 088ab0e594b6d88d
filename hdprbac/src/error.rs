use hdpcore::error::ValueError;

#[non_exhaustive]
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("invalid role transition: {0}")]
    InvalidRoleTransition(String),
    #[error(transparent)]
    CustomRole(#[from] CustomRoleError),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error(transparent)]
    Value(#[from] ValueError),
}

#[non_exhaustive]
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CustomRoleError {
    #[error("duplicate role name: {0}")]
    DuplicateRoleName(String),
    #[error("role does not exist: {0}")]
    RoleDoesNotExist(String),
}
