use hdpcore::ac::{
    policy::Policy,
    resource::{
        ResourceKind,
        WILDCARD,
    },
    role::{
        RoleName,
        UserType,
    },
};
use std::fmt;

use crate::{
    catalog::RoleCatalog,
    directory::TenantDirectory,
};
use super::*;

#[derive(Clone, Copy, Debug)]
enum Slot {
    Deployment,
    Organization,
    Patient,
}

impl Slot {
    fn kind(self) -> ResourceKind {
        match self {
            Slot::Deployment => ResourceKind::Deployment,
            Slot::Organization => ResourceKind::Organization,
            Slot::Patient => ResourceKind::User,
        }
    }
}

impl Hints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deployment(mut self, id: impl Into<String>) -> Self {
        self.deployment_id = Some(id.into());
        self
    }

    pub fn organization(mut self, id: impl Into<String>) -> Self {
        self.organization_id = Some(id.into());
        self
    }

    pub fn patient(mut self, id: impl Into<String>) -> Self {
        self.patient_id = Some(id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.deployment_id.is_none() &&
            self.organization_id.is_none() &&
            self.patient_id.is_none()
    }

    // empty strings carry no information
    fn normalized(self) -> Self {
        let keep = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            deployment_id: keep(self.deployment_id),
            organization_id: keep(self.organization_id),
            patient_id: keep(self.patient_id),
        }
    }

    fn slot(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Deployment => self.deployment_id.as_deref(),
            Slot::Organization => self.organization_id.as_deref(),
            Slot::Patient => self.patient_id.as_deref(),
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<String> {
        match slot {
            Slot::Deployment => &mut self.deployment_id,
            Slot::Organization => &mut self.organization_id,
            Slot::Patient => &mut self.patient_id,
        }
    }
}

/// Pick the acting assignment, caching the resource id of a matched
/// candidate back into its hint slot.
fn select_assignment(
    roles: &[RoleAssignment],
    hints: &mut Hints,
) -> Option<RoleAssignment> {
    let mut candidates = [Slot::Deployment, Slot::Organization, Slot::Patient];
    if !hints.is_empty() {
        // stable, so hinted candidates keep their relative order
        candidates.sort_by_key(|slot| hints.slot(*slot).is_none());
    }
    log::trace!("candidate order: {candidates:?}");

    for slot in candidates {
        let key = hints.slot(slot);
        if let Some(ra) = roles.iter().find(|ra| ra.resource.matches(slot.kind(), key)) {
            log::trace!("{slot:?} candidate matched {ra}");
            *hints.slot_mut(slot) = Some(ra.resource_id().to_string());
            return Some(ra.clone());
        }
    }

    let wildcard = [ResourceKind::Organization, ResourceKind::Deployment]
        .into_iter()
        .find_map(|kind| roles.iter()
            .find(|ra| ra.resource.matches(kind, Some(WILDCARD)))
        )
        .cloned();
    match &wildcard {
        Some(ra) => log::trace!("fell back to wildcard {ra}"),
        None => log::trace!("no assignment matched"),
    }
    wildcard
}

fn resolve_role(
    ra: &RoleAssignment,
    hints: &Hints,
    directory: &TenantDirectory,
) -> Option<Role> {
    let role_id = ra.role_id.as_str();
    RoleCatalog::builtin().get(role_id)
        .or_else(|| hints.deployment_id.as_deref()
            .and_then(|id| directory.deployment_custom_role(role_id, id)))
        .or_else(|| hints.organization_id.as_deref()
            .and_then(|id| directory.organization_custom_role(role_id, id)))
        .cloned()
}

fn collect_deployment_ids(
    roles: &[RoleAssignment],
    directory: &TenantDirectory,
    exclude_wildcard: bool,
) -> Vec<String> {
    let mut result = Vec::new();
    for ra in roles {
        if ra.is_org_scoped() {
            if !ra.is_wildcard() {
                result.extend(directory.organization_deployment_ids(ra.resource_id())
                    .iter()
                    .cloned());
            }
        } else if ra.is_deployment_scoped() {
            if !ra.is_wildcard() {
                result.push(ra.resource_id().to_string());
            } else if !exclude_wildcard {
                return vec![WILDCARD.to_string()];
            }
        }
    }
    result
}

impl Subject {
    pub fn new(
        user: User,
        hints: Hints,
        directory: &TenantDirectory,
    ) -> Self {
        let mut hints = hints.normalized();
        let role_assignment = select_assignment(&user.roles, &mut hints);
        let role = role_assignment.as_ref()
            .and_then(|ra| resolve_role(ra, &hints, directory));
        if role.is_none() {
            match &role_assignment {
                Some(ra) => log::warn!("user {}: no role definition for {ra}", user.id),
                None => log::debug!("user {}: no assignment for {hints:?}", user.id),
            }
        }

        let first_of = |kind: ResourceKind| user.roles.iter()
            .find(|ra| ra.resource_kind() == kind)
            .map(|ra| ra.resource_id().to_string());
        let deployment_id = match &hints.deployment_id {
            Some(id) => role.as_ref().map(|_| id.clone()),
            None => first_of(ResourceKind::Deployment),
        };
        let organization_id = match &hints.organization_id {
            Some(id) => role.as_ref().map(|_| id.clone()),
            None => first_of(ResourceKind::Organization),
        };
        let deployment_ids = collect_deployment_ids(&user.roles, directory, false);
        let concrete_deployment_ids = collect_deployment_ids(&user.roles, directory, true);
        let organization_ids = user.roles.iter()
            .filter(|ra| ra.is_org_scoped() && !ra.is_wildcard())
            .map(|ra| ra.resource_id().to_string())
            .collect();
        let proxy_participant_ids = user.roles.iter()
            .filter(|ra| ra.is_proxy_scoped())
            .map(|ra| ra.resource_id().to_string())
            .collect();

        Self {
            user,
            hints,
            role_assignment,
            role,
            deployment_id,
            organization_id,
            deployment_ids,
            concrete_deployment_ids,
            organization_ids,
            proxy_participant_ids,
        }
    }

    pub fn id(&self) -> &str {
        &self.user.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn into_user(self) -> User {
        self.user
    }

    /// The hints after resolution, with the resource id of the matched
    /// assignment filled in.
    pub fn hints(&self) -> &Hints {
        &self.hints
    }

    pub fn role_assignment(&self) -> Option<&RoleAssignment> {
        self.role_assignment.as_ref()
    }

    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Whether a role was resolved; an unresolved subject may do nothing.
    pub fn is_resolved(&self) -> bool {
        self.role.is_some()
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.role.as_ref().map(|role| role.user_type)
    }

    pub fn has(&self, required: impl IntoIterator<Item = Policy>) -> bool {
        self.role.as_ref()
            .map(|role| role.has(required))
            .unwrap_or(false)
    }

    /// The deployment the subject acts in.  With a deployment hint this
    /// is the hint, provided a role resolved; otherwise the first
    /// deployment the user holds an assignment for.
    pub fn deployment_id(&self) -> Option<&str> {
        self.deployment_id.as_deref()
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id.as_deref()
    }

    pub fn patient_id(&self) -> Option<&str> {
        self.hints.patient_id.as_deref()
    }

    /// Every deployment reachable through the user's assignments, with
    /// organization assignments expanded to their deployments.  A
    /// deployment wildcard assignment reduces the result to exactly
    /// `["*"]` unless wildcards are excluded.
    pub fn deployment_ids(&self, exclude_wildcard: bool) -> &[String] {
        if exclude_wildcard {
            &self.concrete_deployment_ids
        } else {
            &self.deployment_ids
        }
    }

    pub fn organization_ids(&self) -> &[String] {
        &self.organization_ids
    }

    pub fn proxy_participant_ids(&self) -> &[String] {
        &self.proxy_participant_ids
    }

    fn is_user_type(&self, user_type: UserType, name: RoleName) -> bool {
        match (&self.role, &self.role_assignment) {
            (Some(role), _) => role.user_type == user_type,
            (None, Some(ra)) => ra.is_role(name),
            (None, None) => false,
        }
    }

    pub fn is_manager(&self) -> bool {
        match (&self.role, &self.role_assignment) {
            (Some(role), _) => role.user_type == UserType::Manager,
            (None, Some(ra)) => !ra.role_name()
                .map(|name| RoleName::non_manager().contains(name))
                .unwrap_or(false),
            (None, None) => false,
        }
    }

    pub fn is_super_admin(&self) -> bool {
        self.is_user_type(UserType::SuperAdmin, RoleName::SuperAdmin)
    }

    pub fn is_user(&self) -> bool {
        self.is_user_type(UserType::User, RoleName::User)
    }

    pub fn is_proxy(&self) -> bool {
        self.is_user_type(UserType::Proxy, RoleName::Proxy)
    }

    pub fn is_proxy_for_user(&self, user_id: &str) -> bool {
        self.user.roles.iter()
            .any(|ra| ra.resource.matches(ResourceKind::User, Some(user_id)))
    }

    /// Whether the resolved role is one of the common roles.
    pub fn has_common_role(&self) -> bool {
        self.role_assignment.as_ref()
            .map(RoleAssignment::is_common)
            .unwrap_or(false)
    }

    pub fn has_identifier_data_permission(&self, target_id: Option<&str>) -> bool {
        if target_id == Some(self.id()) {
            return true;
        }
        self.has([Policy::ViewPatientIdentifier])
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[Subject deploymentId: {}, organizationId: {}, roleId: {}, roleAssignment: {}]",
            self.hints.deployment_id.as_deref().unwrap_or("None"),
            self.hints.organization_id.as_deref().unwrap_or("None"),
            self.role.as_ref().and_then(Role::id).unwrap_or("None"),
            self.role_assignment.as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "None".to_string()),
        )
    }
}

#[cfg(test)]
mod test {
    use hdpcore::ac::tenant::{
        Deployment,
        Organization,
    };
    use super::*;

    fn ra(role_id: &str, resource: &str) -> RoleAssignment {
        RoleAssignment::new(role_id, resource.parse().expect("valid resource"))
    }

    fn user(roles: impl IntoIterator<Item = RoleAssignment>) -> User {
        User::new("u1").with_roles(roles)
    }

    fn directory() -> TenantDirectory {
        let mut organization = Organization::new("O1", "Org 1");
        organization.deployment_ids = vec!["D1".to_string(), "D2".to_string()];
        organization.roles.push(Role::new(
            Some("auditor".to_string()),
            "Auditor",
            [],
            UserType::Manager,
        ));
        let mut deployment = Deployment::new("D3", "Study 3");
        deployment.roles.push(Role::new(
            Some("nurse".to_string()),
            "Nurse",
            [hdpcore::ac::permission::Permission::ViewPatientData],
            UserType::Manager,
        ));
        TenantDirectory::new()
            .with_organization(organization)
            .with_deployment(deployment)
    }

    #[test]
    fn single_user_role() {
        let subject = Subject::new(
            user([ra("User", "deployment/D1")]),
            Hints::new().deployment("D1"),
            &TenantDirectory::new(),
        );
        assert!(subject.is_resolved());
        assert_eq!(subject.user_type(), Some(UserType::User));
        assert!(subject.is_user());
        assert!(!subject.is_manager());
        assert_eq!(subject.deployment_id(), Some("D1"));
    }

    #[test]
    fn deployment_hint_wins() {
        let roles = [
            ra("AccessController", "organization/O1"),
            ra("Admin", "deployment/D1"),
        ];
        let subject = Subject::new(
            user(roles.clone()),
            Hints::new().deployment("D1").organization("O1"),
            &directory(),
        );
        assert_eq!(subject.role_assignment(), Some(&roles[1]));

        let subject = Subject::new(
            user(roles.clone()),
            Hints::new().organization("O1"),
            &directory(),
        );
        assert_eq!(subject.role_assignment(), Some(&roles[0]));

        // with only a patient hint the unhinted deployment candidate is
        // still tried before the organization one
        let subject = Subject::new(
            user(roles.clone()),
            Hints::new().patient("p1"),
            &directory(),
        );
        assert_eq!(subject.role_assignment(), Some(&roles[1]));
    }

    #[test]
    fn hint_cached_from_match() {
        let subject = Subject::new(
            user([ra("AccessController", "organization/O1")]),
            Hints::new(),
            &directory(),
        );
        assert_eq!(subject.hints().organization_id.as_deref(), Some("O1"));
        assert_eq!(subject.organization_id(), Some("O1"));
        assert_eq!(subject.deployment_id(), None);
        assert_eq!(subject.deployment_ids(false), ["D1", "D2"]);
    }

    #[test]
    fn exact_resource_match() {
        let subject = Subject::new(
            user([ra("Admin", "deployment/D12")]),
            Hints::new().deployment("D1"),
            &directory(),
        );
        assert!(!subject.is_resolved());
        assert_eq!(subject.role_assignment(), None);
        assert_eq!(subject.deployment_id(), None);
        assert!(!subject.has([]));
    }

    #[test]
    fn wildcard_after_concrete() {
        let roles = [
            ra("SuperAdmin", "deployment/*"),
            ra("AccessController", "organization/O1"),
        ];
        // the deployment hint matches nothing concrete, so the
        // organization assignment wins over the wildcard
        let subject = Subject::new(
            user(roles.clone()),
            Hints::new().deployment("D9"),
            &directory(),
        );
        assert_eq!(subject.role_assignment(), Some(&roles[1]));

        let roles = [
            ra("SuperAdmin", "deployment/*"),
            ra("HumaSupport", "organization/*"),
            ra("Proxy", "user/p1"),
        ];
        let subject = Subject::new(
            user(roles.clone()),
            Hints::new().patient("p2").deployment("D9").organization("O9"),
            &directory(),
        );
        assert_eq!(subject.role_assignment(), Some(&roles[1]));
        // hints are not overwritten by a wildcard match
        assert_eq!(subject.hints().deployment_id.as_deref(), Some("D9"));

        let subject = Subject::new(
            user([ra("SuperAdmin", "deployment/*")]),
            Hints::new().deployment("D9"),
            &directory(),
        );
        assert!(subject.is_super_admin());
        assert_eq!(subject.deployment_id(), Some("D9"));
    }

    #[test]
    fn deployment_ids() {
        let roles = [
            ra("CallCenter", "deployment/D5"),
            ra("SuperAdmin", "deployment/*"),
            ra("CallCenter", "deployment/D6"),
        ];
        let subject = Subject::new(user(roles.clone()), Hints::new(), &directory());
        assert_eq!(subject.deployment_ids(false), ["*"]);
        assert_eq!(subject.deployment_ids(true), ["D5", "D6"]);

        let roles = [
            ra("Support", "organization/O1"),
            ra("Support", "organization/*"),
            ra("Support", "deployment/D7"),
        ];
        let subject = Subject::new(user(roles.clone()), Hints::new(), &directory());
        assert_eq!(subject.deployment_ids(false), ["D1", "D2", "D7"]);
        assert_eq!(subject.organization_ids(), ["O1"]);
    }

    #[test]
    fn custom_roles() {
        let subject = Subject::new(
            user([ra("nurse", "deployment/D3")]),
            Hints::new(),
            &directory(),
        );
        assert_eq!(subject.role().map(|r| r.name.as_str()), Some("Nurse"));
        assert!(subject.has([Policy::ViewPatientData]));
        assert!(subject.is_manager());

        let subject = Subject::new(
            user([ra("auditor", "organization/O1")]),
            Hints::new(),
            &directory(),
        );
        assert_eq!(subject.role().map(|r| r.name.as_str()), Some("Auditor"));

        // defined by another tenant only
        let subject = Subject::new(
            user([ra("auditor", "deployment/D3")]),
            Hints::new(),
            &directory(),
        );
        assert!(!subject.is_resolved());
        assert_eq!(subject.deployment_id(), None);
    }

    #[test]
    fn fallback_classification() {
        let subject = Subject::new(
            user([ra("unknown", "deployment/D9")]),
            Hints::new(),
            &directory(),
        );
        assert!(!subject.is_resolved());
        assert!(subject.is_manager());
        assert!(!subject.is_super_admin());
        // the matched deployment is cached as the hint, which is only
        // reported once a role resolves
        assert_eq!(subject.hints().deployment_id.as_deref(), Some("D9"));
        assert_eq!(subject.deployment_id(), None);

        let subject = Subject::new(
            user([ra("unknown", "user/p1")]),
            Hints::new(),
            &directory(),
        );
        assert!(subject.is_manager());
        assert!(!subject.is_proxy());
    }

    #[test]
    fn proxy() {
        let subject = Subject::new(
            user([ra("Proxy", "user/p1"), ra("Proxy", "user/p2")]),
            Hints::new().patient("p2"),
            &directory(),
        );
        assert!(subject.is_proxy());
        assert_eq!(subject.patient_id(), Some("p2"));
        assert_eq!(subject.role_assignment(), Some(&ra("Proxy", "user/p2")));
        assert_eq!(subject.proxy_participant_ids(), ["p1", "p2"]);
        assert!(subject.is_proxy_for_user("p1"));
        assert!(!subject.is_proxy_for_user("p3"));
        assert!(subject.has_identifier_data_permission(Some("p1")));
        assert!(subject.has_identifier_data_permission(Some("u1")));
    }

    #[test]
    fn identifier_permission() {
        let subject = Subject::new(
            user([ra("User", "deployment/D1")]),
            Hints::new(),
            &directory(),
        );
        assert!(subject.has_identifier_data_permission(Some("u1")));
        assert!(!subject.has_identifier_data_permission(Some("u2")));
        assert!(!subject.has_identifier_data_permission(None));
    }

    #[test]
    fn deterministic() {
        let roles = [
            ra("CallCenter", "deployment/D1"),
            ra("CallCenter", "deployment/D2"),
            ra("Proxy", "user/p1"),
        ];
        let hints = Hints::new().organization("O1").patient("p1");
        let a = Subject::new(user(roles.clone()), hints.clone(), &directory());
        let b = Subject::new(user(roles.clone()), hints.clone(), &directory());
        assert_eq!(a, b);
        assert_eq!(a.role_assignment(), Some(&roles[2]));
    }

    #[test]
    fn empty_hints_ignored() {
        let subject = Subject::new(
            user([ra("Admin", "deployment/D1")]),
            Hints::new().deployment("").organization(""),
            &directory(),
        );
        assert_eq!(subject.deployment_id(), Some("D1"));
        assert_eq!(
            subject.to_string(),
            "[Subject deploymentId: D1, organizationId: None, roleId: Admin, \
             roleAssignment: Admin on resource[deployment/D1]]",
        );
    }
}
