use hdpcore::ac::{
    assignment::RoleAssignment,
    resource::ResourceKind,
    role::{
        Role,
        RoleName,
    },
    tenant::{
        Deployment,
        Organization,
    },
};

use crate::{
    catalog::RoleCatalog,
    directory::TenantDirectory,
    error::{
        CustomRoleError,
        Error,
    },
};

/// Per-tenant role definitions.
pub trait CustomRoleExtension {
    fn custom_roles(&self) -> &[Role];

    fn role_name_exists(&self, name: &str) -> bool {
        self.custom_roles().iter().any(|role| role.name == name)
    }

    fn find_role_by_id(&self, id: &str) -> Option<&Role> {
        self.custom_roles().iter().find(|role| role.id() == Some(id))
    }

    /// Checks a batch of roles about to be stored.  A role without an id
    /// is new and its name must be free; a role with an id must already
    /// exist.
    fn validate_roles<'a>(
        &self,
        roles: impl IntoIterator<Item = &'a Role>,
    ) -> Result<(), CustomRoleError>
    where
        Self: Sized,
    {
        for role in roles {
            match role.id() {
                None if self.role_name_exists(&role.name) =>
                    Err(CustomRoleError::DuplicateRoleName(role.name.clone()))?,
                Some(id) if self.find_role_by_id(id).is_none() =>
                    Err(CustomRoleError::RoleDoesNotExist(id.to_string()))?,
                _ => (),
            }
        }
        Ok(())
    }
}

impl CustomRoleExtension for Deployment {
    fn custom_roles(&self) -> &[Role] {
        &self.roles
    }
}

impl CustomRoleExtension for Organization {
    fn custom_roles(&self) -> &[Role] {
        &self.roles
    }
}

/// The resource level an assignment acts at.
///
/// Common roles act at the level of the resource they are bound to;
/// other built-in roles at the level of the table defining them.  A
/// custom role is an organization role only if the organization it is
/// bound to defines it.
pub fn resource_family(
    ra: &RoleAssignment,
    directory: &TenantDirectory,
) -> ResourceKind {
    let catalog = RoleCatalog::builtin();
    if ra.is_common() {
        ra.resource_kind()
    } else if catalog.is_organization_role(&ra.role_id) {
        ResourceKind::Organization
    } else if catalog.contains(&ra.role_id) {
        ResourceKind::Deployment
    } else if ra.is_org_scoped() &&
        directory.organization_custom_role(&ra.role_id, ra.resource_id()).is_some()
    {
        ResourceKind::Organization
    } else {
        ResourceKind::Deployment
    }
}

/// Both assignments must act at the same resource level, unless the
/// submitter is a super admin.
pub fn validate_same_resource_level(
    submitter: &RoleAssignment,
    target: &RoleAssignment,
    directory: &TenantDirectory,
) -> Result<(), Error> {
    if submitter.is_role(RoleName::SuperAdmin) {
        return Ok(());
    }
    let submitter_family = resource_family(submitter, directory);
    let target_family = resource_family(target, directory);
    if submitter_family != target_family {
        log::debug!("{submitter} ({submitter_family}) cannot manage {target} ({target_family})");
        return Err(Error::InvalidRoleTransition(format!(
            "{} is not at the {} level",
            target.role_id,
            submitter_family,
        )));
    }
    Ok(())
}
