//! Enforcement of the policies an operation requires.
//!
//! The policies are either fixed for the operation, or selected by one
//! of the functions here from the subjects of the request.

use hdprbac::error::Error as RbacError;

use crate::{
    context::AccessContext,
    error::Error,
};

/// Grants an operation when the acting subject holds every required
/// policy.
pub struct PolicyGate<'a> {
    context: &'a AccessContext,
}

pub(crate) fn denied(reason: impl Into<String>) -> Error {
    RbacError::PermissionDenied(reason.into()).into()
}

mod impls;
pub use impls::{
    admin_invitation_policy,
    assign_roles_policy,
    deny_wildcard_holder,
    enforce,
    invitation_policy,
    is_same_resource,
    own_resource_policy,
    personal_documents_policy,
    read_events_policy,
    retrieve_profile_policy,
    retrieve_profiles_policy,
    update_profile_policy,
    user_route_policy,
};
