use serde::{Deserialize, Serialize};

use crate::ac::resource::ResourceRef;

/// The binding of a role id to a resource, held by a user.
///
/// Two assignments are equal when both the role id and the resource
/// are equal.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    pub role_id: String,
    pub resource: ResourceRef,
}

pub type RoleAssignments = Vec<RoleAssignment>;

mod impls;
