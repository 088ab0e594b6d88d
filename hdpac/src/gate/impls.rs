use hdpcore::ac::{
    policy::{
        Policies,
        Policy,
    },
    resource::WILDCARD,
    role::{
        RoleName,
        UserType,
    },
    user::User,
};
use hdprbac::{
    Hints,
    Subject,
};

use crate::Platform;
use super::*;

impl<'a> PolicyGate<'a> {
    pub fn new(context: &'a AccessContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AccessContext {
        self.context
    }

    pub fn enforce(
        &self,
        required: impl IntoIterator<Item = Policy>,
    ) -> Result<(), Error> {
        enforce(self.context.subject(), required)
    }

    /// Enforce the policies the selector computes for the request; a
    /// selector may also deny outright.
    pub fn enforce_with(
        &self,
        selector: impl FnOnce(&AccessContext) -> Result<Policies, Error>,
    ) -> Result<(), Error> {
        let required = selector(self.context)?;
        self.enforce(required)
    }
}

/// Succeeds only if the subject's resolved role holds every one of the
/// required policies.  Nothing is required of a resolved subject for an
/// empty list.
pub fn enforce(
    subject: &Subject,
    required: impl IntoIterator<Item = Policy>,
) -> Result<(), Error> {
    let required = required.into_iter().collect::<Policies>();
    if subject.has(required) {
        return Ok(());
    }
    let required = required.iter()
        .map(|policy| policy.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    log::debug!("denied {} lacking one of [{required}]", subject.id());
    Err(denied(format!("[{required}] required")))
}

/// Whether the target is within the submitter's reach: the target acts
/// in one of the submitter's deployments, or the target's organization
/// is one of the submitter's.
pub fn is_same_resource(submitter: &Subject, target: &Subject) -> bool {
    let deployment_ids = submitter.deployment_ids(false);
    if deployment_ids.iter().any(|id| id == WILDCARD) {
        return true;
    }
    target.deployment_ids(true).iter().any(|id| deployment_ids.contains(id)) ||
        target.organization_id()
            .map(|id| submitter.organization_ids().iter().any(|o| o == id))
            .unwrap_or(false)
}

fn other_target(context: &AccessContext) -> Result<&Subject, Error> {
    context.path_subject()
        .map(|target| &**target)
        .ok_or_else(|| denied("request addresses no user"))
}

/// Self requests require the user policy; managers reaching the target
/// require the manager policy.
pub fn user_route_policy(
    context: &AccessContext,
    user_policy: Policy,
    manager_policy: Policy,
) -> Result<Policies, Error> {
    if context.is_self_request() {
        return Ok(user_policy.into());
    }
    let submitter = context.subject();
    let target = other_target(context)?;
    if submitter.is_manager() && is_same_resource(submitter, target) {
        Ok(manager_policy.into())
    } else {
        Err(denied(format!("{} cannot reach {}", submitter.id(), target.id())))
    }
}

pub fn retrieve_profile_policy(context: &AccessContext) -> Result<Policies, Error> {
    let is_proxy = context.path_subject()
        .map(|target| target.is_proxy_for_user(context.subject().id()))
        .unwrap_or(false);
    if is_proxy {
        return Ok(Policy::ViewProxyProfile.into());
    }
    user_route_policy(context, Policy::ViewOwnProfile, Policy::ViewPatientProfile)
}

pub fn update_profile_policy(context: &AccessContext) -> Result<Policies, Error> {
    user_route_policy(context, Policy::EditOwnProfile, Policy::EditPatientProfile)
}

pub fn personal_documents_policy(context: &AccessContext) -> Result<Policies, Error> {
    user_route_policy(context, Policy::ViewOwnData, Policy::ViewPatientIdentifier)
}

pub fn read_events_policy(context: &AccessContext) -> Result<Policies, Error> {
    if context.is_self_request() {
        return Ok(Policy::ViewOwnEvents.into());
    }
    let submitter = context.subject();
    if !submitter.is_manager() {
        return Err(denied(format!("{} is not a manager", submitter.id())));
    }
    let target = other_target(context)?;
    if is_same_resource(submitter, target) {
        Ok(Policy::ViewPatientData | Policy::ScheduleAndCallPatient)
    } else {
        Err(denied(format!("{} cannot reach {}", submitter.id(), target.id())))
    }
}

/// The policy to invite a user into the role; inviting a proxy for
/// oneself differs from inviting one for a patient.
pub fn invitation_policy(
    submitter: &Subject,
    role_id: &str,
    patient_id: Option<&str>,
) -> Policies {
    match RoleName::from_id(role_id) {
        Some(RoleName::User) => Policy::InvitePatients.into(),
        Some(RoleName::Proxy) if patient_id == Some(submitter.id()) =>
            Policy::InviteOwnProxy.into(),
        Some(RoleName::Proxy) => Policy::InviteProxyForPatient.into(),
        _ => Policy::InviteStaffs.into(),
    }
}

pub fn retrieve_profiles_policy(submitter: &Subject, managers: bool) -> Policies {
    if managers && submitter.has_common_role() {
        Policy::ViewStaffList.into()
    } else {
        Policy::ViewPatientProfile.into()
    }
}

pub fn assign_roles_policy(context: &AccessContext) -> Result<Policies, Error> {
    if !context.is_self_request() {
        let submitter = context.subject();
        let target = other_target(context)?;
        if !is_same_resource(submitter, target) {
            return Err(denied(format!("{} cannot reach {}", submitter.id(), target.id())));
        }
    }
    Ok(Policy::AssignRolesToStaff.into())
}

pub fn own_resource_policy(context: &AccessContext) -> Result<Policies, Error> {
    if context.is_self_request() {
        Ok(Policy::ViewOwnResources.into())
    } else {
        Err(denied("only own resources may be viewed"))
    }
}

pub fn admin_invitation_policy(submitter: &Subject) -> Result<Policies, Error> {
    if submitter.user_type() == Some(UserType::SuperAdmin) {
        Ok(Policy::InviteSuperStaff.into())
    } else {
        Err(denied(format!("{} may not invite admins", submitter.id())))
    }
}

pub fn deny_wildcard_holder(submitter: &Subject) -> Result<(), Error> {
    if submitter.user().has_wildcard_role() {
        Err(denied(format!("{} holds a wildcard role", submitter.id())))
    } else {
        Ok(())
    }
}

impl Platform {
    /// The policy for a participant to link the user with the email as
    /// their proxy: the user must be someone else, and must act as a
    /// proxy in the participant's deployment.
    pub async fn assign_proxy_policy(
        &self,
        context: &AccessContext,
        proxy_email: &str,
    ) -> Result<Policies, Error> {
        let submitter = context.subject();
        if submitter.user().email.as_deref() == Some(proxy_email) {
            return Err(denied("a user cannot be their own proxy"));
        }
        let proxy: User = self.ac_platform()
            .get_user_by_email(proxy_email)
            .await?
            .ok_or_else(|| Error::UnknownUser(proxy_email.to_string()))?;
        let hints = Hints {
            deployment_id: submitter.deployment_id().map(str::to_string),
            .. Default::default()
        };
        let proxy = self.subject(proxy, hints).await?;
        if !proxy.is_proxy() {
            return Err(denied(format!("{} is not a proxy", proxy.id())));
        }
        Ok(Policy::EditOwnProfile.into())
    }
}
