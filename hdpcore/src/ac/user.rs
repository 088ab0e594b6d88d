use serde::{Deserialize, Serialize};

use crate::ac::{
    assignment::RoleAssignment,
    role::RoleName,
};

/// A user profile as far as access control is concerned.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleAssignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            .. Default::default()
        }
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = RoleAssignment>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    pub fn has_roles(&self) -> bool {
        !self.roles.is_empty()
    }

    /// Whether any assignment binds to a wildcard resource.
    pub fn has_wildcard_role(&self) -> bool {
        self.roles.iter().any(RoleAssignment::is_wildcard)
    }

    /// Whether the user holds the built-in role on any resource.
    pub fn holds(&self, name: RoleName) -> bool {
        self.roles.iter().any(|ra| ra.is_role(name))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serde() -> anyhow::Result<()> {
        let user: User = serde_json::from_str(r#"{
            "id": "u1",
            "email": "alice@example.com",
            "roles": [
                {"roleId": "Admin", "resource": "deployment/D1"},
                {"roleId": "SuperAdmin", "resource": "deployment/*"}
            ]
        }"#)?;
        assert_eq!(user.roles.len(), 2);
        assert!(user.has_roles());
        assert!(user.has_wildcard_role());
        assert!(user.holds(RoleName::SuperAdmin));
        assert!(!user.holds(RoleName::User));
        assert_eq!(user.locale, None);

        let user: User = serde_json::from_str(r#"{"id": "u2"}"#)?;
        assert!(!user.has_roles());
        assert_eq!(serde_json::to_string(&user)?, r#"{"id":"u2","roles":[]}"#);
        Ok(())
    }
}
