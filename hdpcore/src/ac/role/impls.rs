use enumset::enum_set;
use serde::Deserializer;
use std::fmt;

use crate::ac::{
    permission::{
        policies_of,
        Permission,
        Permissions,
    },
    policy::Policy,
};
use super::*;

impl RoleName {
    /// Resolves a raw role id against the built-in names.
    pub fn from_id(id: &str) -> Option<Self> {
        id.parse().ok()
    }

    /// Roles valid at both organization and deployment scope.
    pub fn common() -> RoleNames {
        enum_set!(
            RoleName::Administrator |
            RoleName::Clinician |
            RoleName::Supervisor |
            RoleName::Support
        )
    }

    /// Role ids that bind to an organization when created without an
    /// explicit resource type.
    ///
    /// `DeploymentStaff` and `CallCenter` are absent: they bind to
    /// deployments through [`Self::deployment`], while the organization
    /// table of the role catalog still defines them, so assignments of
    /// either role act at the organization level.
    pub fn organization() -> RoleNames {
        enum_set!(
            RoleName::AccessController |
            RoleName::OrganizationOwner |
            RoleName::OrganizationEditor |
            RoleName::OrganizationStaff
        ) | Self::common()
    }

    /// Roles that may be held for several resources at once.
    pub fn multi_resource() -> RoleNames {
        enum_set!(
            RoleName::DeploymentStaff |
            RoleName::CallCenter
        ) | Self::common()
    }

    /// Role ids that bind to a deployment when created without an
    /// explicit resource type.
    pub fn deployment() -> RoleNames {
        enum_set!(
            RoleName::SuperAdmin |
            RoleName::HumaSupport |
            RoleName::AccountManager |
            RoleName::Admin |
            RoleName::Contributor |
            RoleName::Manager |
            RoleName::User |
            RoleName::Proxy |
            RoleName::Exporter |
            RoleName::IdentifiableExport
        ) | Self::multi_resource()
    }

    /// Role ids treated as not being managers when no role definition
    /// could be resolved for them.
    pub fn non_manager() -> RoleNames {
        enum_set!(
            RoleName::SuperAdmin |
            RoleName::HumaSupport |
            RoleName::AccountManager |
            RoleName::OrganizationOwner |
            RoleName::OrganizationEditor |
            RoleName::Proxy |
            RoleName::User
        )
    }

    /// Roles that may never be handed out through role management.
    pub fn not_assignable() -> RoleNames {
        enum_set!(
            RoleName::SuperAdmin |
            RoleName::HumaSupport |
            RoleName::User
        )
    }

    pub fn is_common_id(id: &str) -> bool {
        Self::in_group(id, Self::common())
    }

    pub fn is_organization_id(id: &str) -> bool {
        Self::in_group(id, Self::organization())
    }

    pub fn is_multi_resource_id(id: &str) -> bool {
        Self::in_group(id, Self::multi_resource())
    }

    pub fn is_deployment_id(id: &str) -> bool {
        Self::in_group(id, Self::deployment())
    }

    fn in_group(id: &str, group: RoleNames) -> bool {
        Self::from_id(id)
            .map(|name| group.contains(name))
            .unwrap_or(false)
    }
}

impl PartialEq<RoleName> for str {
    fn eq(&self, other: &RoleName) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<RoleName> for String {
    fn eq(&self, other: &RoleName) -> bool {
        self == other.as_str()
    }
}

impl Role {
    pub fn new(
        id: Option<String>,
        name: impl Into<String>,
        permissions: impl IntoIterator<Item = Permission>,
        user_type: UserType,
    ) -> Self {
        let mut role = Self {
            id,
            name: name.into(),
            permissions: Permissions::empty(),
            user_type,
        };
        role.add_permissions(Permission::common());
        role.add_permissions(permissions);
        role
    }

    /// A role whose id is the given built-in name.
    pub fn builtin(
        name: RoleName,
        permissions: impl IntoIterator<Item = Permission>,
        user_type: UserType,
    ) -> Self {
        Self::new(Some(name.to_string()), name.as_str(), permissions, user_type)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    pub fn add_permissions(&mut self, permissions: impl IntoIterator<Item = Permission>) {
        self.permissions |= permissions.into_iter().collect::<Permissions>();
    }

    pub fn has_extra_permissions(&self) -> bool {
        self.permissions != Permission::common()
    }

    /// Every policy reachable from the held permissions.
    pub fn policies(&self) -> enumset::EnumSet<Policy> {
        policies_of(self.permissions)
    }

    /// Whether every one of the `required` policies is reachable from a
    /// held permission.  A role with no permission at all has nothing.
    pub fn has(&self, required: impl IntoIterator<Item = Policy>) -> bool {
        if self.permissions.is_empty() {
            return false;
        }
        let held = self.policies();
        required.into_iter().all(|policy| held.contains(policy))
    }
}

impl From<RoleRecord> for Role {
    fn from(record: RoleRecord) -> Self {
        Self::new(record.id, record.name, record.permissions, record.user_type)
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RoleRecord::deserialize(deserializer).map(Role::from)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[Role id: {}, name: {}, permissions: [{}], userType: {:?}]",
            self.id.as_deref().unwrap_or("None"),
            self.name,
            self.permissions.iter()
                .map(<&'static str>::from)
                .collect::<Vec<_>>()
                .join(", "),
            self.user_type,
        )
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;
    use super::*;
    use crate::error::ValueError;

    #[test]
    fn role_name() -> anyhow::Result<()> {
        assert_eq!(RoleName::CallCenter.to_string(), "CallCenter");
        assert_eq!(RoleName::CallCenter, RoleName::from_str("CallCenter")?);
        assert!(matches!(
            RoleName::from_str("Janitor")
                .expect_err("should be an error"),
            ValueError::Unsupported(s) if s == "Janitor",
        ));
        assert!(RoleName::is_common_id("Clinician"));
        assert!(RoleName::is_organization_id("Clinician"));
        assert!(RoleName::is_deployment_id("Clinician"));
        assert!(RoleName::is_multi_resource_id("CallCenter"));
        assert!(!RoleName::is_multi_resource_id("Admin"));
        assert!(!RoleName::is_organization_id("Admin"));
        assert!(!RoleName::is_deployment_id("custom-role-id"));
        assert!(*"Admin" == RoleName::Admin);
        Ok(())
    }

    #[test]
    fn common_permissions_always_present() {
        let role = Role::new(None, "Custom", [], UserType::Manager);
        assert_eq!(role.permissions(), Permission::common());
        assert!(!role.has_extra_permissions());
        assert!(role.is_new());
    }

    #[test]
    fn permissions_deduplicated_and_sorted() {
        let mut role = Role::new(
            Some("r1".to_string()),
            "Custom",
            [
                Permission::ViewPatientData,
                Permission::AddPatients,
                Permission::ViewPatientData,
            ],
            UserType::Manager,
        );
        let before = role.permissions().iter().collect::<Vec<_>>();
        role.add_permissions([Permission::AddPatients, Permission::ViewOwnData]);
        let after = role.permissions().iter().collect::<Vec<_>>();
        assert_eq!(before, after);
        let names = after.iter().map(|p| p.as_str()).collect::<Vec<_>>();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert!(role.has_extra_permissions());
    }

    #[test]
    fn has() {
        let role = Role::new(
            None,
            "Viewer",
            [Permission::ViewPatientData],
            UserType::Manager,
        );
        assert!(role.has([]));
        assert!(role.has([Policy::ViewPatientData, Policy::ViewPatientProfile]));
        // reachable through the common permissions
        assert!(role.has([Policy::EditOwnProfile]));
        assert!(!role.has([Policy::ViewPatientData, Policy::EditPatientData]));
        assert!(!role.has([Policy::CreateDashboard]));
    }

    #[test]
    fn has_nothing_without_permissions() -> anyhow::Result<()> {
        // bypass the constructor to model a stripped record
        let role = Role {
            id: None,
            name: "Empty".to_string(),
            permissions: Permissions::empty(),
            user_type: UserType::User,
        };
        assert!(!role.has([]));
        assert!(!role.has([Policy::ViewOwnData]));
        Ok(())
    }

    #[test]
    fn serde() -> anyhow::Result<()> {
        let role: Role = serde_json::from_str(r#"{
            "id": "5e8f0c74b50aa9656c34789c",
            "name": "Nurse",
            "permissions": ["VIEW_PATIENT_DATA", "VIEW_PATIENT_DATA"],
            "userType": "Manager"
        }"#)?;
        assert_eq!(role.id(), Some("5e8f0c74b50aa9656c34789c"));
        assert_eq!(
            role.permissions(),
            Permission::common() | Permission::ViewPatientData,
        );
        let value = serde_json::to_value(&role)?;
        assert_eq!(value["userType"], "Manager");
        assert_eq!(value["permissions"][0], "GENERATE_AUTH_TOKEN");

        let role: Role = serde_json::from_str(r#"{"name": "Bare"}"#)?;
        assert!(role.is_new());
        assert_eq!(role.user_type, UserType::Manager);
        Ok(())
    }

    #[test]
    fn display() {
        let role = Role::builtin(RoleName::Exporter, [], UserType::ServiceAccount);
        assert_eq!(
            role.to_string(),
            "[Role id: Exporter, name: Exporter, permissions: [GENERATE_AUTH_TOKEN, \
             MANAGE_OWN_DATA, VIEW_OWN_DATA, VIEW_PROXY_PROFILE], userType: ServiceAccount]",
        );
    }
}
