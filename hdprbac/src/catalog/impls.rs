use enumset::enum_set;
use hdpcore::ac::role::{
    Role,
    RoleName,
    RoleNames,
    UserType,
};

use super::*;

impl RoleCatalog {
    fn new() -> Self {
        let deployment = enum_set!(
            RoleName::SuperAdmin |
            RoleName::HumaSupport |
            RoleName::AccountManager |
            RoleName::Admin |
            RoleName::Contributor |
            RoleName::Manager |
            RoleName::User |
            RoleName::Proxy |
            RoleName::Exporter |
            RoleName::IdentifiableExport |
            RoleName::Administrator |
            RoleName::Supervisor |
            RoleName::Support |
            RoleName::Clinician
        );
        // DeploymentStaff and CallCenter are bound to deployments but are
        // defined here, so they act at the organization level.
        let organization = enum_set!(
            RoleName::AccessController |
            RoleName::OrganizationOwner |
            RoleName::OrganizationEditor |
            RoleName::OrganizationStaff |
            RoleName::DeploymentStaff |
            RoleName::CallCenter |
            RoleName::Administrator |
            RoleName::Supervisor |
            RoleName::Support |
            RoleName::Clinician
        );
        let super_admins = enum_set!(
            RoleName::SuperAdmin |
            RoleName::HumaSupport |
            RoleName::AccountManager |
            RoleName::OrganizationOwner |
            RoleName::OrganizationEditor
        );
        let definitions = (deployment | organization).iter()
            .map(|name| (name, definition(name)))
            .collect();
        log::trace!("built-in role catalog initialized");
        Self {
            definitions,
            deployment,
            organization,
            super_admins,
        }
    }

    /// The process-wide catalog, built on first use.
    pub fn builtin() -> &'static Self {
        CATALOG.get_or_init(Self::new)
    }

    /// Look up a built-in role by its id in either table.
    pub fn get(&self, role_id: &str) -> Option<&Role> {
        RoleName::from_id(role_id)
            .and_then(|name| self.definitions.get(&name))
    }

    pub fn contains(&self, role_id: &str) -> bool {
        self.get(role_id).is_some()
    }

    pub fn deployment_role(&self, role_id: &str) -> Option<&Role> {
        self.in_table(role_id, self.deployment)
    }

    pub fn organization_role(&self, role_id: &str) -> Option<&Role> {
        self.in_table(role_id, self.organization)
    }

    pub fn is_deployment_role(&self, role_id: &str) -> bool {
        self.deployment_role(role_id).is_some()
    }

    pub fn is_organization_role(&self, role_id: &str) -> bool {
        self.organization_role(role_id).is_some()
    }

    fn in_table(&self, role_id: &str, table: RoleNames) -> Option<&Role> {
        RoleName::from_id(role_id)
            .filter(|name| table.contains(*name))
            .and_then(|name| self.definitions.get(&name))
    }

    fn view(&self, table: RoleNames) -> impl Iterator<Item = (RoleName, &Role)> {
        table.iter()
            .filter_map(move |name| self.definitions.get(&name).map(|role| (name, role)))
    }

    pub fn deployment(&self) -> impl Iterator<Item = (RoleName, &Role)> {
        self.view(self.deployment)
    }

    pub fn organization(&self) -> impl Iterator<Item = (RoleName, &Role)> {
        self.view(self.organization)
    }

    /// Every built-in role, each id listed once.
    pub fn all(&self) -> impl Iterator<Item = (RoleName, &Role)> {
        self.view(self.deployment | self.organization)
    }

    pub fn deployment_managers(&self) -> impl Iterator<Item = (RoleName, &Role)> {
        self.deployment()
            .filter(|(_, role)| role.user_type == UserType::Manager)
    }

    pub fn organization_managers(&self) -> impl Iterator<Item = (RoleName, &Role)> {
        self.organization()
            .filter(|(_, role)| role.user_type == UserType::Manager)
    }

    pub fn super_admins(&self) -> impl Iterator<Item = (RoleName, &Role)> {
        self.view(self.super_admins)
    }

    /// A human readable label for the role id, or the id itself.
    pub fn role_repr<'a>(&self, role_id: &'a str) -> &'a str {
        match RoleName::from_id(role_id) {
            Some(RoleName::AccessController) => "Access Controller",
            Some(RoleName::AccountManager) => "Account Manager",
            Some(RoleName::CallCenter) => "Patient support",
            Some(RoleName::DeploymentStaff) => "Deployment Staff",
            Some(RoleName::OrganizationOwner) => "Organization Owner",
            Some(RoleName::OrganizationEditor) => "Organization Editor",
            Some(RoleName::OrganizationStaff) => "Organization Staff",
            Some(RoleName::SuperAdmin) => "Super Admin",
            Some(RoleName::HumaSupport) => "Huma Support",
            Some(RoleName::Exporter) => "Exporter",
            Some(RoleName::IdentifiableExport) => "Identifiable Export",
            Some(RoleName::Support) => "Support",
            Some(RoleName::Administrator) => "Administrator",
            Some(RoleName::Supervisor) => "Supervisor",
            Some(RoleName::Admin) => "Admin",
            Some(RoleName::Clinician) => "Clinician",
            _ => role_id,
        }
    }
}
