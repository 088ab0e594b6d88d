use hdpcore::ac::{
    assignment::RoleAssignment,
    role::Role,
    user::User,
};

/// Optional resource context accompanying a request.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Hints {
    pub deployment_id: Option<String>,
    pub organization_id: Option<String>,
    pub patient_id: Option<String>,
}

/// The acting identity of a user for a single request.
///
/// Of all the role assignments a user holds, exactly one is selected
/// for the request based on the hints, and the role it names is
/// resolved against the built-in catalog or the tenant's custom roles.
/// Everything is computed once at construction; a subject never
/// changes afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Subject {
    user: User,
    hints: Hints,
    role_assignment: Option<RoleAssignment>,
    role: Option<Role>,

    deployment_id: Option<String>,
    organization_id: Option<String>,
    deployment_ids: Vec<String>,
    concrete_deployment_ids: Vec<String>,
    organization_ids: Vec<String>,
    proxy_participant_ids: Vec<String>,
}

mod impls;
