use hdpcore::ac::{
    assignment::RoleAssignment,
    role::Role,
    tenant::{
        Deployment,
        Organization,
    },
    user::User,
};
use std::collections::{
    BTreeSet,
    HashMap,
};

use crate::{
    custom::CustomRoleExtension,
    subject::Hints,
};

/// An immutable snapshot of the tenants relevant to a request: the
/// custom roles of each deployment and organization, and the deployment
/// ids grouped by each organization.
///
/// A subject is resolved against a directory rather than against the
/// stores, so resolution never performs any I/O.
#[derive(Clone, Debug, Default)]
pub struct TenantDirectory {
    deployments: HashMap<String, Deployment>,
    organizations: HashMap<String, Organization>,
}

/// The tenant ids a directory must hold to resolve a subject.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct References {
    pub deployment_ids: BTreeSet<String>,
    pub organization_ids: BTreeSet<String>,
}

impl References {
    /// Every concrete deployment and organization named by the user's
    /// assignments or by the hints.
    pub fn of(user: &User, hints: &Hints) -> Self {
        let mut result = Self::of_assignments(&user.roles);
        if let Some(id) = hints.deployment_id.as_deref().filter(|id| is_concrete(id)) {
            result.deployment_ids.insert(id.to_string());
        }
        if let Some(id) = hints.organization_id.as_deref().filter(|id| is_concrete(id)) {
            result.organization_ids.insert(id.to_string());
        }
        result
    }

    /// Every concrete deployment and organization the assignments are
    /// bound to.
    pub fn of_assignments<'a>(
        roles: impl IntoIterator<Item = &'a RoleAssignment>,
    ) -> Self {
        let mut result = Self::default();
        for ra in roles.into_iter().filter(|ra| !ra.is_wildcard()) {
            if ra.is_deployment_scoped() {
                result.deployment_ids.insert(ra.resource_id().to_string());
            } else if ra.is_org_scoped() {
                result.organization_ids.insert(ra.resource_id().to_string());
            }
        }
        result
    }

    pub fn merge(&mut self, other: Self) {
        self.deployment_ids.extend(other.deployment_ids);
        self.organization_ids.extend(other.organization_ids);
    }
}

fn is_concrete(id: &str) -> bool {
    !id.is_empty() && id != hdpcore::ac::resource::WILDCARD
}

impl TenantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deployment(mut self, deployment: Deployment) -> Self {
        self.insert_deployment(deployment);
        self
    }

    pub fn with_organization(mut self, organization: Organization) -> Self {
        self.insert_organization(organization);
        self
    }

    pub fn insert_deployment(&mut self, deployment: Deployment) {
        self.deployments.insert(deployment.id.clone(), deployment);
    }

    pub fn insert_organization(&mut self, organization: Organization) {
        self.organizations.insert(organization.id.clone(), organization);
    }

    pub fn deployment(&self, id: &str) -> Option<&Deployment> {
        self.deployments.get(id)
    }

    pub fn organization(&self, id: &str) -> Option<&Organization> {
        self.organizations.get(id)
    }

    pub fn deployment_custom_role(
        &self,
        role_id: &str,
        deployment_id: &str,
    ) -> Option<&Role> {
        self.deployment(deployment_id)
            .and_then(|deployment| deployment.find_role_by_id(role_id))
    }

    pub fn organization_custom_role(
        &self,
        role_id: &str,
        organization_id: &str,
    ) -> Option<&Role> {
        self.organization(organization_id)
            .and_then(|organization| organization.find_role_by_id(role_id))
    }

    /// The deployments grouped by the organization; empty when the
    /// organization is unknown.
    pub fn organization_deployment_ids(&self, organization_id: &str) -> &[String] {
        self.organization(organization_id)
            .map(|organization| organization.deployment_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Whether every referenced tenant is present.
    pub fn covers(&self, references: &References) -> bool {
        references.deployment_ids.iter().all(|id| self.deployments.contains_key(id)) &&
            references.organization_ids.iter().all(|id| self.organizations.contains_key(id))
    }
}

#[cfg(test)]
mod test {
    use hdpcore::ac::{
        assignment::RoleAssignment,
        role::UserType,
    };
    use super::*;

    #[test]
    fn references() -> anyhow::Result<()> {
        let user = User::new("u1").with_roles([
            RoleAssignment::create("Admin", "D1", None)?,
            RoleAssignment::create("AccessController", "O1", None)?,
            RoleAssignment::super_admin(),
            RoleAssignment::proxy("u2")?,
        ]);
        let hints = Hints {
            deployment_id: Some("D2".to_string()),
            organization_id: Some("*".to_string()),
            .. Default::default()
        };
        let references = References::of(&user, &hints);
        assert_eq!(
            references.deployment_ids.iter().collect::<Vec<_>>(),
            vec!["D1", "D2"],
        );
        assert_eq!(
            references.organization_ids.iter().collect::<Vec<_>>(),
            vec!["O1"],
        );
        let directory = TenantDirectory::new()
            .with_deployment(Deployment::new("D1", "Study 1"))
            .with_deployment(Deployment::new("D2", "Study 2"));
        assert!(!directory.covers(&references));
        let directory = directory.with_organization(Organization::new("O1", "Org 1"));
        assert!(directory.covers(&references));
        Ok(())
    }

    #[test]
    fn lookups() {
        let mut deployment = Deployment::new("D1", "Study 1");
        deployment.roles.push(Role::new(
            Some("r1".to_string()),
            "Nurse",
            [],
            UserType::Manager,
        ));
        let mut organization = Organization::new("O1", "Org 1");
        organization.deployment_ids = vec!["D1".to_string(), "D3".to_string()];
        let directory = TenantDirectory::new()
            .with_deployment(deployment)
            .with_organization(organization);

        assert_eq!(
            directory.deployment_custom_role("r1", "D1").map(|r| r.name.as_str()),
            Some("Nurse"),
        );
        assert!(directory.deployment_custom_role("r1", "D2").is_none());
        assert!(directory.organization_custom_role("r1", "O1").is_none());
        assert_eq!(directory.organization_deployment_ids("O1"), ["D1", "D3"]);
        assert!(directory.organization_deployment_ids("O2").is_empty());
    }
}
