use hdpcore::{
    ac::{
        assignment::RoleAssignment,
        resource::ResourceRef,
        role::RoleName,
        user::User,
    },
    platform::AcPlatform,
};
use hdprbac::{
    custom::validate_same_resource_level,
    directory::References,
    error::Error as RbacError,
    merge,
    rules::{
        check_assignment_permission,
        validate_add_request,
        validate_remove_request,
    },
    Hints,
    RoleCatalog,
    TenantDirectory,
};
use std::sync::Arc;

use crate::{
    context::{
        AccessContext,
        RequestContext,
    },
    error::{
        ContextError,
        Error,
    },
    subject::Subject,
};
use super::*;

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self {
            ac_platform: None,
            default_locale: DEFAULT_LOCALE.to_string(),
            supported_locales: vec![DEFAULT_LOCALE.to_string()],
        }
    }

    pub fn ac_platform(mut self, val: impl AcPlatform + 'static) -> Self {
        self.ac_platform = Some(Arc::new(val));
        self
    }

    /// Use a backend that is also held elsewhere.
    pub fn shared_ac_platform(mut self, val: Arc<dyn AcPlatform>) -> Self {
        self.ac_platform = Some(val);
        self
    }

    pub fn default_locale(mut self, val: impl Into<String>) -> Self {
        self.default_locale = val.into().to_lowercase();
        self
    }

    pub fn supported_locales<S: Into<String>>(
        mut self,
        val: impl IntoIterator<Item = S>,
    ) -> Self {
        self.supported_locales = val.into_iter()
            .map(|locale| locale.into().to_lowercase())
            .collect();
        self
    }

    pub fn build(self) -> Result<Platform, Error> {
        let ac_platform = self.ac_platform
            .ok_or(Error::Misconfiguration("ac_platform"))?;
        let mut supported_locales = self.supported_locales;
        if !supported_locales.contains(&self.default_locale) {
            supported_locales.push(self.default_locale.clone());
        }
        Ok(Platform(Arc::new(PlatformInner {
            ac_platform,
            default_locale: self.default_locale,
            supported_locales,
        })))
    }
}

impl Platform {
    pub fn ac_platform(&self) -> &dyn AcPlatform {
        self.0.ac_platform.as_ref()
    }

    pub fn default_locale(&self) -> &str {
        &self.0.default_locale
    }

    pub fn supported_locales(&self) -> &[String] {
        &self.0.supported_locales
    }

    /// Lower-cases the locale, falling back to the default locale when
    /// it is not supported.
    pub fn normalize_locale(&self, locale: &str) -> String {
        let locale = locale.to_lowercase();
        if self.0.supported_locales.contains(&locale) {
            locale
        } else {
            self.0.default_locale.clone()
        }
    }
}

// Subject resolution

impl Platform {
    pub async fn get_user(
        &self,
        id: &str,
    ) -> Result<User, Error> {
        self.ac_platform()
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| Error::UnknownUser(id.to_string()))
    }

    /// Load every referenced tenant that exists into a directory.
    pub async fn load_directory(
        &self,
        references: &References,
    ) -> Result<TenantDirectory, Error> {
        let mut directory = TenantDirectory::new();
        for id in references.deployment_ids.iter() {
            match self.ac_platform().get_deployment(id).await? {
                Some(deployment) => directory.insert_deployment(deployment),
                None => log::debug!("deployment {id} not found"),
            }
        }
        for id in references.organization_ids.iter() {
            match self.ac_platform().get_organization(id).await? {
                Some(organization) => directory.insert_organization(organization),
                None => log::debug!("organization {id} not found"),
            }
        }
        Ok(directory)
    }

    /// Resolve the subject for the user; the subject may be left
    /// without a role.
    pub async fn subject(
        &self,
        user: User,
        hints: Hints,
    ) -> Result<Subject, Error> {
        let references = References::of(&user, &hints);
        let directory = self.load_directory(&references).await?;
        let subject = hdprbac::Subject::new(user, hints, &directory);
        log::trace!("resolved {subject}");
        Ok(Subject::new(self.clone(), subject))
    }

    /// Resolve the subject for the user, which must end up with a role.
    pub async fn resolved_subject(
        &self,
        user: User,
        hints: Hints,
    ) -> Result<Subject, Error> {
        let subject = self.subject(user, hints).await?;
        if !subject.is_resolved() {
            Err(ContextError::UnresolvedSubject(subject.id().to_string()))?;
        }
        Ok(subject)
    }
}

// Request context

impl Platform {
    /// Establish the acting subject of a request made by the
    /// authenticated user, along with the subject of the user the
    /// request addresses, if any.
    ///
    /// A changed locale is saved to the profile only once both subjects
    /// have resolved; a failed request writes nothing.
    pub async fn resolve(
        &self,
        user_id: &str,
        request: &RequestContext,
    ) -> Result<AccessContext, Error> {
        let mut user = self.get_user(user_id).await?;
        if !user.has_roles() {
            Err(ContextError::Roleless(user.id.clone()))?;
        }

        let hints = self.request_hints(request).await?;
        let locale_changed = self.apply_locale(&mut user, request);

        let subject = self.resolved_subject(user, hints.clone()).await?;
        let path_subject = match request.path_user_id() {
            Some(id) => {
                let path_user = self.get_user(&id).await?;
                Some(self.resolved_subject(path_user, hints.clone()).await?)
            }
            None => None,
        };
        if locale_changed {
            self.ac_platform().save_user(subject.user()).await?;
        }
        Ok(AccessContext::new(hints, subject, path_subject))
    }

    async fn request_hints(
        &self,
        request: &RequestContext,
    ) -> Result<Hints, Error> {
        let deployment_id = request.deployment_id()?;
        let mut organization_id = request.organization_id()?;
        if organization_id.is_none() {
            if let Some(id) = deployment_id.as_deref() {
                organization_id = self.ac_platform()
                    .find_organization_by_deployment_id(id)
                    .await?
                    .map(|organization| organization.id);
            }
        }
        let hints = Hints {
            deployment_id,
            organization_id,
            patient_id: None,
        };
        log::debug!("request hints: {hints:?}");
        Ok(hints)
    }

    /// Set the normalized request locale on the user, returning whether
    /// it differs from the stored one.
    fn apply_locale(
        &self,
        user: &mut User,
        request: &RequestContext,
    ) -> bool {
        let Some(locale) = request.locale() else {
            return false;
        };
        let locale = self.normalize_locale(locale);
        if user.locale.as_deref() == Some(locale.as_str()) {
            return false;
        }
        log::debug!("updating locale of user {} to {locale}", user.id);
        user.locale = Some(locale);
        true
    }
}

// Role management

fn acting_assignment(submitter: &Subject) -> Result<&RoleAssignment, Error> {
    submitter.role_assignment()
        .filter(|_| submitter.is_resolved())
        .ok_or_else(|| ContextError::UnresolvedSubject(submitter.id().to_string()).into())
}

/// Each new assignment must be at the same level as every assignment
/// the user currently holds.
fn validate_against_current(
    current: &[RoleAssignment],
    roles: &[RoleAssignment],
    directory: &TenantDirectory,
) -> Result<(), Error> {
    for role in roles {
        for held in current {
            validate_same_resource_level(held, role, directory)?;
        }
    }
    Ok(())
}

impl Platform {
    async fn role_directory<'a>(
        &self,
        assignments: impl IntoIterator<Item = &'a RoleAssignment>,
    ) -> Result<TenantDirectory, Error> {
        self.load_directory(&References::of_assignments(assignments)).await
    }

    /// Add the roles to the user on behalf of the submitter, returning
    /// the user as saved.
    pub async fn add_roles(
        &self,
        submitter: &Subject,
        user_id: &str,
        roles: Vec<RoleAssignment>,
    ) -> Result<User, Error> {
        let submitter_ra = acting_assignment(submitter)?;
        check_assignment_permission(submitter, &roles)?;
        let mut user = self.get_user(user_id).await?;
        let directory = self.role_directory(
            std::iter::once(submitter_ra)
                .chain(roles.iter())
                .chain(user.roles.iter())
        ).await?;
        validate_add_request(submitter_ra, &roles, &directory)?;
        if !submitter.has_common_role() {
            validate_against_current(&user.roles, &roles, &directory)?;
        }
        merge::add_roles(&mut user.roles, roles)?;
        self.ac_platform().save_user(&user).await?;
        log::debug!("user {} now holds {} assignment(s)", user.id, user.roles.len());
        Ok(user)
    }

    /// Add the roles to every targeted user on behalf of the submitter,
    /// returning the number of users updated.
    ///
    /// Nothing is saved unless every user passes validation and the
    /// merge, and the store must report every user as updated.
    pub async fn add_roles_to_users(
        &self,
        submitter: &Subject,
        targets: Targets,
        roles: Vec<RoleAssignment>,
    ) -> Result<usize, Error> {
        let submitter_ra = acting_assignment(submitter)?;
        check_assignment_permission(submitter, &roles)?;
        let multiple = match &targets {
            Targets::Users(ids) => ids.len() > 1,
            Targets::AllStaff => true,
        };
        if multiple && roles.iter().any(|role| role.is_role(RoleName::Admin)) {
            Err(RbacError::PermissionDenied(
                "Admin role can't be set for multiple users at once".to_string()
            ))?;
        }

        let mut users = match targets {
            Targets::Users(ids) => self.ac_platform()
                .get_users_by_ids(&ids, None)
                .await?,
            Targets::AllStaff => self.staff_members(submitter).await?,
        };
        let directory = self.role_directory(
            std::iter::once(submitter_ra)
                .chain(roles.iter())
                .chain(users.iter().flat_map(|user| user.roles.iter()))
        ).await?;
        validate_add_request(submitter_ra, &roles, &directory)?;
        for user in users.iter_mut() {
            validate_against_current(&user.roles, &roles, &directory)?;
            merge::add_roles(&mut user.roles, roles.iter().cloned())?;
        }

        let expected = users.len();
        let updated = self.ac_platform().save_users(&users).await?;
        if updated != expected {
            log::warn!("bulk role update saved {updated} of {expected} users");
            return Err(Error::BatchCountMismatch { expected, updated });
        }
        Ok(updated)
    }

    async fn staff_members(
        &self,
        submitter: &Subject,
    ) -> Result<Vec<User>, Error> {
        let deployment_id = submitter.deployment_id()
            .ok_or_else(|| RbacError::PermissionDenied(
                "no deployment to select staff from".to_string()
            ))?;
        let resource = ResourceRef::deployment(deployment_id)?;
        let catalog = RoleCatalog::builtin();
        Ok(self.ac_platform()
            .get_staff_for_resource(&resource)
            .await?
            .into_iter()
            .filter(|user| user.id != submitter.id())
            .filter(|user| !user.roles.iter()
                .any(|ra| catalog.is_organization_role(&ra.role_id)))
            .collect())
    }

    /// Remove the roles bound to the resource id from the user on behalf
    /// of the submitter; returns whether anything was removed.
    pub async fn remove_roles(
        &self,
        submitter: &Subject,
        user_id: &str,
        role_ids: &[String],
        resource_id: &str,
    ) -> Result<bool, Error> {
        let submitter_ra = acting_assignment(submitter)?;
        let mut user = self.get_user(user_id).await?;
        let removing = user.roles.iter()
            .filter(|ra| ra.resource_id() == resource_id && role_ids.contains(&ra.role_id))
            .cloned()
            .collect::<Vec<_>>();
        if removing.is_empty() {
            return Ok(false);
        }
        check_assignment_permission(submitter, &removing)?;
        let directory = self.role_directory(
            std::iter::once(submitter_ra).chain(removing.iter())
        ).await?;
        validate_remove_request(submitter_ra, &removing, &directory)?;
        merge::remove_roles(&mut user.roles, role_ids, resource_id);
        self.ac_platform().save_user(&user).await?;
        log::debug!("removed {} assignment(s) from user {}", removing.len(), user.id);
        Ok(true)
    }
}
