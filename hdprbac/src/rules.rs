//! Checks applied to role management requests before any merge.
//!
//! Each use case composes the checks it needs; none of them touch the
//! stores, so the tenants involved must already be in the directory.

use hdpcore::ac::{
    assignment::RoleAssignment,
    resource::ResourceKind,
    role::RoleName,
};

use crate::{
    catalog::RoleCatalog,
    custom::validate_same_resource_level,
    directory::TenantDirectory,
    error::Error,
    subject::Subject,
};

/// An organization level submitter may edit roles at either level, a
/// deployment level submitter only at the deployment level.
pub fn validate_common_role_edit_levels(
    submitter_level: ResourceKind,
    target_level: ResourceKind,
) -> Result<(), Error> {
    match (submitter_level, target_level) {
        (ResourceKind::Organization, ResourceKind::Organization) |
        (ResourceKind::Organization, ResourceKind::Deployment) |
        (ResourceKind::Deployment, ResourceKind::Deployment) => Ok(()),
        (submitter, target) => Err(Error::InvalidRoleTransition(format!(
            "{submitter} level cannot edit roles at the {target} level"
        ))),
    }
}

/// Whether the role id may be bound to the resource of the assignment:
/// either a built-in role of that scope, or a custom role defined by
/// that tenant.  The multi-resource organization roles are bound to the
/// deployments of their organization.
pub fn role_valid_for_resource(
    ra: &RoleAssignment,
    directory: &TenantDirectory,
) -> bool {
    let catalog = RoleCatalog::builtin();
    let role_id = ra.role_id.as_str();
    match ra.resource_kind() {
        ResourceKind::Deployment => catalog.is_deployment_role(role_id) ||
            RoleName::is_multi_resource_id(role_id) ||
            directory.deployment_custom_role(role_id, ra.resource_id()).is_some(),
        ResourceKind::Organization => catalog.is_organization_role(role_id) ||
            directory.organization_custom_role(role_id, ra.resource_id()).is_some(),
        ResourceKind::User => ra.is_role(RoleName::Proxy),
    }
}

fn validate_editable(
    submitter: &RoleAssignment,
    role: &RoleAssignment,
    directory: &TenantDirectory,
) -> Result<(), Error> {
    if RoleName::not_assignable().iter().any(|name| role.is_role(name)) {
        return Err(Error::InvalidRoleTransition(format!(
            "role {} can't be assigned",
            role.role_id,
        )));
    }
    if submitter.is_common() {
        validate_common_role_edit_levels(
            submitter.resource_kind(),
            role.resource_kind(),
        )?;
        if !role.is_common() {
            return Err(Error::InvalidRoleTransition(format!(
                "{} may only manage common roles, not {}",
                submitter.role_id,
                role.role_id,
            )));
        }
    } else {
        if role.is_common() {
            return Err(Error::InvalidRoleTransition(format!(
                "{} may not manage common role {}",
                submitter.role_id,
                role.role_id,
            )));
        }
        validate_same_resource_level(submitter, role, directory)?;
    }
    Ok(())
}

/// Validate assignments about to be added by the submitter acting
/// through its resolved assignment.
pub fn validate_add_request(
    submitter: &RoleAssignment,
    roles: &[RoleAssignment],
    directory: &TenantDirectory,
) -> Result<(), Error> {
    if roles.len() > 1 && !roles.iter().all(RoleAssignment::is_multi_resource) {
        return Err(Error::InvalidRoleTransition(
            "all roles should support multiple resources".to_string()
        ));
    }
    for role in roles {
        validate_editable(submitter, role, directory)?;
        if !role_valid_for_resource(role, directory) {
            return Err(Error::InvalidRoleTransition(format!(
                "role {} is not valid for {}",
                role.role_id,
                role.resource,
            )));
        }
    }
    Ok(())
}

/// Validate assignments about to be removed by the submitter.
pub fn validate_remove_request(
    submitter: &RoleAssignment,
    roles: &[RoleAssignment],
    directory: &TenantDirectory,
) -> Result<(), Error> {
    roles.iter()
        .try_for_each(|role| validate_editable(submitter, role, directory))
}

/// The submitter must have authority over the resource of every
/// assignment, unless it is a super admin.
pub fn check_assignment_permission(
    submitter: &Subject,
    roles: &[RoleAssignment],
) -> Result<(), Error> {
    if submitter.is_super_admin() {
        return Ok(());
    }
    for role in roles {
        let allowed: &[String] = match role.resource_kind() {
            ResourceKind::Deployment => submitter.deployment_ids(false),
            ResourceKind::Organization => submitter.organization_ids(),
            ResourceKind::User => &[],
        };
        if !allowed.iter().any(|id| id == role.resource_id()) {
            log::debug!("{} has no authority over {}", submitter.id(), role.resource);
            return Err(Error::PermissionDenied(format!(
                "cannot assign {role}"
            )));
        }
    }
    Ok(())
}
