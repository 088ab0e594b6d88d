use async_trait::async_trait;
use crate::error::BackendError;
use super::{
    resource::ResourceRef,
    tenant::{
        Deployment,
        Organization,
    },
    user::User,
};

#[async_trait]
pub trait ProfileBackend {
    async fn get_user_by_id(
        &self,
        id: &str,
    ) -> Result<Option<User>, BackendError>;
    async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, BackendError>;
    /// Replaces the stored profile, role list included.
    async fn save_user(
        &self,
        user: &User,
    ) -> Result<(), BackendError>;
    /// Returns the number of profiles actually updated.
    async fn save_users(
        &self,
        users: &[User],
    ) -> Result<usize, BackendError>;
    /// Users with the given ids, optionally restricted to those that
    /// hold the role id on some resource.  Unknown ids are skipped.
    async fn get_users_by_ids(
        &self,
        ids: &[String],
        role_id: Option<&str>,
    ) -> Result<Vec<User>, BackendError>;
    /// Users holding a proxy assignment to the user.
    async fn get_proxies_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<User>, BackendError>;
    /// Users holding a non-proxy role on exactly the resource.
    async fn get_staff_for_resource(
        &self,
        resource: &ResourceRef,
    ) -> Result<Vec<User>, BackendError>;
}

#[async_trait]
pub trait TenantBackend {
    async fn get_deployment(
        &self,
        id: &str,
    ) -> Result<Option<Deployment>, BackendError>;
    async fn get_organization(
        &self,
        id: &str,
    ) -> Result<Option<Organization>, BackendError>;
    async fn find_organization_by_deployment_id(
        &self,
        deployment_id: &str,
    ) -> Result<Option<Organization>, BackendError>;
    async fn organization_deployment_ids(
        &self,
        organization_id: &str,
    ) -> Result<Vec<String>, BackendError>;
}
