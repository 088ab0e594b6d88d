//! An in-memory store, loaded from and saved to a JSON document.

use async_trait::async_trait;
use hdpcore::{
    ac::{
        resource::ResourceRef,
        role::RoleName,
        tenant::{
            Deployment,
            Organization,
        },
        traits::{
            ProfileBackend,
            TenantBackend,
        },
        user::User,
    },
    error::BackendError,
    platform::DefaultAcPlatform,
};
use parking_lot::RwLock;
use serde::{
    Deserialize,
    Serialize,
};
use std::collections::BTreeMap;

/// The document a [`MemoryBackend`] is loaded from.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Store {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub deployments: Vec<Deployment>,
    #[serde(default)]
    pub organizations: Vec<Organization>,
}

fn keyed<T>(
    items: Vec<T>,
    key: impl Fn(&T) -> String,
) -> RwLock<BTreeMap<String, T>> {
    RwLock::new(items.into_iter()
        .map(|item| (key(&item), item))
        .collect())
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    users: RwLock<BTreeMap<String, User>>,
    deployments: RwLock<BTreeMap<String, Deployment>>,
    organizations: RwLock<BTreeMap<String, Organization>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_store(store: Store) -> Self {
        Self {
            users: keyed(store.users, |user| user.id.clone()),
            deployments: keyed(store.deployments, |deployment| deployment.id.clone()),
            organizations: keyed(store.organizations, |organization| organization.id.clone()),
        }
    }

    pub fn from_json(s: &str) -> Result<Self, BackendError> {
        Ok(Self::from_store(serde_json::from_str(s)?))
    }

    /// A snapshot of the current contents.
    pub fn to_store(&self) -> Store {
        Store {
            users: self.users.read().values().cloned().collect(),
            deployments: self.deployments.read().values().cloned().collect(),
            organizations: self.organizations.read().values().cloned().collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, BackendError> {
        Ok(serde_json::to_string_pretty(&self.to_store())?)
    }

    pub fn insert_user(&self, user: User) {
        self.users.write().insert(user.id.clone(), user);
    }

    pub fn insert_deployment(&self, deployment: Deployment) {
        self.deployments.write().insert(deployment.id.clone(), deployment);
    }

    pub fn insert_organization(&self, organization: Organization) {
        self.organizations.write().insert(organization.id.clone(), organization);
    }

    fn users_where(&self, f: impl Fn(&User) -> bool) -> Vec<User> {
        self.users.read()
            .values()
            .filter(|user| f(user))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProfileBackend for MemoryBackend {
    async fn get_user_by_id(
        &self,
        id: &str,
    ) -> Result<Option<User>, BackendError> {
        Ok(self.users.read().get(id).cloned())
    }

    async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, BackendError> {
        Ok(self.users.read()
            .values()
            .find(|user| user.email.as_deref() == Some(email))
            .cloned())
    }

    async fn save_user(
        &self,
        user: &User,
    ) -> Result<(), BackendError> {
        self.insert_user(user.clone());
        Ok(())
    }

    async fn save_users(
        &self,
        users: &[User],
    ) -> Result<usize, BackendError> {
        let mut stored = self.users.write();
        let mut updated = 0;
        for user in users {
            if let Some(existing) = stored.get_mut(&user.id) {
                *existing = user.clone();
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn get_users_by_ids(
        &self,
        ids: &[String],
        role_id: Option<&str>,
    ) -> Result<Vec<User>, BackendError> {
        let stored = self.users.read();
        Ok(ids.iter()
            .filter_map(|id| stored.get(id))
            .filter(|user| role_id
                .map(|role_id| user.roles.iter().any(|ra| ra.role_id == role_id))
                .unwrap_or(true))
            .cloned()
            .collect())
    }

    async fn get_proxies_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<User>, BackendError> {
        Ok(self.users_where(|user| user.roles.iter()
            .any(|ra| ra.is_role(RoleName::Proxy) &&
                ra.is_proxy_scoped() &&
                ra.resource_id() == user_id)))
    }

    async fn get_staff_for_resource(
        &self,
        resource: &ResourceRef,
    ) -> Result<Vec<User>, BackendError> {
        Ok(self.users_where(|user| user.roles.iter()
            .any(|ra| &ra.resource == resource &&
                !ra.is_role(RoleName::Proxy) &&
                !ra.is_role(RoleName::User))))
    }
}

#[async_trait]
impl TenantBackend for MemoryBackend {
    async fn get_deployment(
        &self,
        id: &str,
    ) -> Result<Option<Deployment>, BackendError> {
        Ok(self.deployments.read().get(id).cloned())
    }

    async fn get_organization(
        &self,
        id: &str,
    ) -> Result<Option<Organization>, BackendError> {
        Ok(self.organizations.read().get(id).cloned())
    }

    async fn find_organization_by_deployment_id(
        &self,
        deployment_id: &str,
    ) -> Result<Option<Organization>, BackendError> {
        Ok(self.organizations.read()
            .values()
            .find(|organization| organization.contains_deployment(deployment_id))
            .cloned())
    }

    async fn organization_deployment_ids(
        &self,
        organization_id: &str,
    ) -> Result<Vec<String>, BackendError> {
        Ok(self.organizations.read()
            .get(organization_id)
            .map(|organization| organization.deployment_ids.clone())
            .unwrap_or_default())
    }
}

impl DefaultAcPlatform for MemoryBackend {}

#[cfg(test)]
mod test {
    use hdpcore::ac::assignment::RoleAssignment;
    use super::*;

    const STORE: &str = r#"{
        "users": [
            {"id": "u1", "email": "u1@example.com", "roles": [
                {"roleId": "User", "resource": "deployment/D1"}
            ]},
            {"id": "p1", "roles": [
                {"roleId": "Proxy", "resource": "user/u1"}
            ]},
            {"id": "s1", "roles": [
                {"roleId": "Admin", "resource": "deployment/D1"}
            ]}
        ],
        "deployments": [{"id": "D1", "name": "Study 1"}],
        "organizations": [{"id": "O1", "deploymentIds": ["D1"]}]
    }"#;

    #[async_std::test]
    async fn profiles() -> anyhow::Result<()> {
        let backend = MemoryBackend::from_json(STORE)?;
        assert_eq!(backend.get_user_by_id("u1").await?.map(|u| u.id), Some("u1".to_string()));
        assert!(backend.get_user_by_id("u9").await?.is_none());
        assert_eq!(
            backend.get_user_by_email("u1@example.com").await?.map(|u| u.id),
            Some("u1".to_string()),
        );

        let ids = ["s1", "u9", "u1"].map(String::from);
        let users = backend.get_users_by_ids(&ids, None).await?;
        assert_eq!(users.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(), ["s1", "u1"]);
        let users = backend.get_users_by_ids(&ids, Some("User")).await?;
        assert_eq!(users.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(), ["u1"]);

        let proxies = backend.get_proxies_for_user("u1").await?;
        assert_eq!(proxies.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(), ["p1"]);
        let staff = backend.get_staff_for_resource(&ResourceRef::deployment("D1")?).await?;
        assert_eq!(staff.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(), ["s1"]);
        Ok(())
    }

    #[async_std::test]
    async fn save() -> anyhow::Result<()> {
        let backend = MemoryBackend::from_json(STORE)?;
        let mut user = backend.get_user_by_id("s1").await?.expect("user exists");
        user.roles = vec![RoleAssignment::create("Contributor", "D1", None)?];
        backend.save_user(&user).await?;
        assert_eq!(backend.get_user_by_id("s1").await?, Some(user.clone()));

        let updated = backend.save_users(&[user, User::new("u9")]).await?;
        assert_eq!(updated, 1);
        assert!(backend.get_user_by_id("u9").await?.is_none());

        let restored = MemoryBackend::from_json(&backend.to_json()?)?;
        assert_eq!(restored.to_store(), backend.to_store());
        Ok(())
    }

    #[async_std::test]
    async fn tenants() -> anyhow::Result<()> {
        let backend = MemoryBackend::from_json(STORE)?;
        assert_eq!(
            backend.find_organization_by_deployment_id("D1").await?.map(|o| o.id),
            Some("O1".to_string()),
        );
        assert!(backend.find_organization_by_deployment_id("D2").await?.is_none());
        assert_eq!(backend.organization_deployment_ids("O1").await?, ["D1"]);
        assert!(backend.organization_deployment_ids("O2").await?.is_empty());
        assert_eq!(
            backend.get_deployment("D1").await?.map(|d| d.name),
            Some("Study 1".to_string()),
        );
        Ok(())
    }
}
