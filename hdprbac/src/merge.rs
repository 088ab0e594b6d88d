//! Merging new role assignments into a user's existing list.
//!
//! Single-resource roles are exclusive: acquiring one revokes every
//! prior assignment.  Multi-resource roles accumulate across resources
//! for the same role id.

use hdpcore::ac::assignment::RoleAssignment;

use crate::error::Error;

/// Add one assignment to the list.
///
/// On error the list is left untouched.
pub fn add_role_to_list(
    roles: &mut Vec<RoleAssignment>,
    role: RoleAssignment,
) -> Result<(), Error> {
    if roles.contains(&role) {
        log::trace!("{role} already held");
        return Ok(());
    }
    if role.is_multi_resource() {
        if roles.iter().any(|r| r.role_id == role.role_id) {
            log::debug!("{role} appended to existing {} assignments", role.role_id);
            roles.push(role);
            return Ok(());
        }
        if !role.is_common() {
            if let Some(held) = roles.iter().find(|r| r.is_multi_resource()) {
                return Err(Error::InvalidRoleTransition(format!(
                    "role {} can not be updated to {}",
                    held.role_id,
                    role.role_id,
                )));
            }
        }
    }
    log::debug!("{role} replaces {} existing assignments", roles.len());
    roles.clear();
    roles.push(role);
    Ok(())
}

/// Add every assignment in order; the list is only updated when all of
/// them could be merged.
pub fn add_roles(
    roles: &mut Vec<RoleAssignment>,
    new_roles: impl IntoIterator<Item = RoleAssignment>,
) -> Result<(), Error> {
    let mut working = roles.clone();
    for role in new_roles {
        add_role_to_list(&mut working, role)?;
    }
    *roles = working;
    Ok(())
}

/// Remove the assignments of the listed role ids bound to the resource
/// id; returns whether anything was removed.
pub fn remove_roles(
    roles: &mut Vec<RoleAssignment>,
    role_ids: &[impl AsRef<str>],
    resource_id: &str,
) -> bool {
    let before = roles.len();
    roles.retain(|r| !(
        r.resource_id() == resource_id &&
        role_ids.iter().any(|id| id.as_ref() == r.role_id)
    ));
    before != roles.len()
}
