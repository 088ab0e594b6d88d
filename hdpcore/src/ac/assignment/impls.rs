use std::fmt;

use crate::{
    ac::{
        resource::{
            ResourceKind,
            ResourceRef,
        },
        role::RoleName,
    },
    error::ValueError,
};
use super::*;

impl RoleAssignment {
    pub fn new(role_id: impl Into<String>, resource: ResourceRef) -> Self {
        Self {
            role_id: role_id.into(),
            resource,
        }
    }

    pub fn super_admin() -> Self {
        Self::wildcard_deployment(RoleName::SuperAdmin)
    }

    pub fn huma_support() -> Self {
        Self::wildcard_deployment(RoleName::HumaSupport)
    }

    fn wildcard_deployment(name: RoleName) -> Self {
        Self {
            role_id: name.to_string(),
            resource: ResourceRef::all_deployments(),
        }
    }

    pub fn proxy(user_id: impl Into<String>) -> Result<Self, ValueError> {
        Ok(Self::new(RoleName::Proxy.as_str(), ResourceRef::user(user_id)?))
    }

    /// Create an assignment for the role on the resource id.
    ///
    /// Without an explicit `kind` the resource type is inferred from the
    /// built-in role tables: organization roles bind to an organization,
    /// otherwise deployment roles bind to a deployment.  The super roles
    /// always bind to every deployment and need no resource id.
    pub fn create(
        role_id: &str,
        resource_id: &str,
        kind: Option<ResourceKind>,
    ) -> Result<Self, ValueError> {
        match RoleName::from_id(role_id) {
            Some(RoleName::SuperAdmin) => return Ok(Self::super_admin()),
            Some(RoleName::HumaSupport) => return Ok(Self::huma_support()),
            _ => (),
        }
        if resource_id.is_empty() {
            return Err(ValueError::Invalid(format!(
                "cannot create {role_id} with no resource"
            )));
        }
        let kind = match kind {
            Some(kind) => kind,
            None if RoleName::is_organization_id(role_id) => ResourceKind::Organization,
            None if RoleName::is_deployment_id(role_id) => ResourceKind::Deployment,
            None => {
                log::debug!("cannot infer the resource type of role {role_id}");
                return Err(ValueError::Unsupported(role_id.to_string()));
            }
        };
        log::trace!("binding {role_id} to {kind}/{resource_id}");
        Ok(Self::new(role_id, ResourceRef::new(kind, resource_id)?))
    }

    pub fn resource_kind(&self) -> ResourceKind {
        self.resource.kind()
    }

    pub fn resource_id(&self) -> &str {
        self.resource.id()
    }

    pub fn role_name(&self) -> Option<RoleName> {
        RoleName::from_id(&self.role_id)
    }

    pub fn is_deployment_scoped(&self) -> bool {
        self.resource.kind() == ResourceKind::Deployment
    }

    pub fn is_org_scoped(&self) -> bool {
        self.resource.kind() == ResourceKind::Organization
    }

    pub fn is_proxy_scoped(&self) -> bool {
        self.resource.kind() == ResourceKind::User
    }

    pub fn is_wildcard(&self) -> bool {
        self.resource.is_wildcard()
    }

    pub fn is_multi_resource(&self) -> bool {
        RoleName::is_multi_resource_id(&self.role_id)
    }

    pub fn is_common(&self) -> bool {
        RoleName::is_common_id(&self.role_id)
    }

    pub fn is_role(&self, name: RoleName) -> bool {
        self.role_id == name
    }
}

impl fmt::Display for RoleAssignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} on resource[{}]", self.role_id, self.resource)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn constructors() -> anyhow::Result<()> {
        let ra = RoleAssignment::super_admin();
        assert_eq!(ra.to_string(), "SuperAdmin on resource[deployment/*]");
        assert!(ra.is_wildcard());
        assert!(ra.is_deployment_scoped());

        let ra = RoleAssignment::huma_support();
        assert_eq!(ra.to_string(), "HumaSupport on resource[deployment/*]");

        let ra = RoleAssignment::proxy("u1")?;
        assert_eq!(ra.to_string(), "Proxy on resource[user/u1]");
        assert!(ra.is_proxy_scoped());
        assert!(!ra.is_wildcard());
        Ok(())
    }

    #[test]
    fn create() -> anyhow::Result<()> {
        let ra = RoleAssignment::create("AccessController", "O1", None)?;
        assert_eq!(ra.resource.to_string(), "organization/O1");
        assert!(ra.is_org_scoped());

        let ra = RoleAssignment::create("Admin", "D1", None)?;
        assert_eq!(ra.resource.to_string(), "deployment/D1");

        // common roles are organization roles first
        let ra = RoleAssignment::create("Clinician", "O1", None)?;
        assert!(ra.is_org_scoped());
        let ra = RoleAssignment::create("Clinician", "D1", Some(ResourceKind::Deployment))?;
        assert!(ra.is_deployment_scoped());

        // the multi-resource roles bind to deployments
        let ra = RoleAssignment::create("CallCenter", "D1", None)?;
        assert_eq!(ra.resource.to_string(), "deployment/D1");
        let ra = RoleAssignment::create("DeploymentStaff", "D1", None)?;
        assert!(ra.is_deployment_scoped());

        // custom roles need an explicit kind
        assert!(matches!(
            RoleAssignment::create("5f0c", "D1", None)
                .expect_err("should be an error"),
            ValueError::Unsupported(s) if s == "5f0c",
        ));
        let ra = RoleAssignment::create("5f0c", "D1", Some(ResourceKind::Deployment))?;
        assert_eq!(ra.to_string(), "5f0c on resource[deployment/D1]");

        assert!(matches!(
            RoleAssignment::create("Admin", "", None)
                .expect_err("should be an error"),
            ValueError::Invalid(_),
        ));
        assert_eq!(
            RoleAssignment::create("SuperAdmin", "", None)?,
            RoleAssignment::super_admin(),
        );
        assert_eq!(
            RoleAssignment::create("HumaSupport", "D1", None)?,
            RoleAssignment::huma_support(),
        );
        Ok(())
    }

    #[test]
    fn predicates() -> anyhow::Result<()> {
        let ra = RoleAssignment::create("CallCenter", "D1", None)?;
        assert!(ra.is_multi_resource());
        assert!(!ra.is_common());
        assert!(ra.is_role(RoleName::CallCenter));
        assert_eq!(ra.role_name(), Some(RoleName::CallCenter));
        let ra = RoleAssignment::create("Support", "O1", None)?;
        assert!(ra.is_multi_resource());
        assert!(ra.is_common());
        let ra = RoleAssignment::create("Admin", "D1", None)?;
        assert!(!ra.is_multi_resource());
        Ok(())
    }

    #[test]
    fn serde() -> anyhow::Result<()> {
        let ra: RoleAssignment = serde_json::from_str(r#"{
            "roleId": "User",
            "resource": "deployment/D1"
        }"#)?;
        assert_eq!(ra, RoleAssignment::create("User", "D1", None)?);
        assert!(serde_json::from_str::<RoleAssignment>(r#"{
            "roleId": "Proxy",
            "resource": "user/*"
        }"#).is_err());
        Ok(())
    }
}
