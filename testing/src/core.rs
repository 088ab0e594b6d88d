use async_trait::async_trait;
use mockall::mock;
use hdpcore::{
    ac::{
        resource::ResourceRef,
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

mock! {
    pub Platform {
        pub async fn profile_get_user_by_id(
            &self,
            id: &str,
        ) -> Result<Option<User>, BackendError>;
        pub async fn profile_get_user_by_email(
            &self,
            email: &str,
        ) -> Result<Option<User>, BackendError>;
        pub async fn profile_save_user(
            &self,
            user: &User,
        ) -> Result<(), BackendError>;
        pub async fn profile_save_users(
            &self,
            users: &[User],
        ) -> Result<usize, BackendError>;
        // owned arguments, as mockall cannot match a borrow nested in
        // an Option
        pub async fn profile_get_users_by_ids(
            &self,
            ids: Vec<String>,
            role_id: Option<String>,
        ) -> Result<Vec<User>, BackendError>;
        pub async fn profile_get_proxies_for_user(
            &self,
            user_id: &str,
        ) -> Result<Vec<User>, BackendError>;
        pub async fn profile_get_staff_for_resource(
            &self,
            resource: &ResourceRef,
        ) -> Result<Vec<User>, BackendError>;
    }

    #[async_trait]
    impl TenantBackend for Platform {
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
}

impl DefaultAcPlatform for MockPlatform {}

#[async_trait]
impl ProfileBackend for MockPlatform {
    async fn get_user_by_id(
        &self,
        id: &str,
    ) -> Result<Option<User>, BackendError> {
        self.profile_get_user_by_id(id).await
    }
    async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, BackendError> {
        self.profile_get_user_by_email(email).await
    }
    async fn save_user(
        &self,
        user: &User,
    ) -> Result<(), BackendError> {
        self.profile_save_user(user).await
    }
    async fn save_users(
        &self,
        users: &[User],
    ) -> Result<usize, BackendError> {
        self.profile_save_users(users).await
    }
    async fn get_users_by_ids(
        &self,
        ids: &[String],
        role_id: Option<&str>,
    ) -> Result<Vec<User>, BackendError> {
        self.profile_get_users_by_ids(
            ids.to_vec(),
            role_id.map(str::to_string),
        ).await
    }
    async fn get_proxies_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<User>, BackendError> {
        self.profile_get_proxies_for_user(user_id).await
    }
    async fn get_staff_for_resource(
        &self,
        resource: &ResourceRef,
    ) -> Result<Vec<User>, BackendError> {
        self.profile_get_staff_for_resource(resource).await
    }
}
