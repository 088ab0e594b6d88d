use hdpcore::ac::{
    permission::Permission::{self, *},
    role::{
        Role,
        RoleName,
        RoleNames,
        UserType,
    },
};
use std::{
    collections::HashMap,
    sync::OnceLock,
};

/// The registry of built-in roles.
///
/// Every built-in role id belongs to the deployment table, the
/// organization table, or both.  The legacy `Manager` id resolves to
/// the Contributor definition.
#[derive(Debug)]
pub struct RoleCatalog {
    definitions: HashMap<RoleName, Role>,
    deployment: RoleNames,
    organization: RoleNames,
    super_admins: RoleNames,
}

static CATALOG: OnceLock<RoleCatalog> = OnceLock::new();

fn definition(name: RoleName) -> Role {
    let (permissions, user_type): (&[Permission], UserType) = match name {
        RoleName::SuperAdmin => (&[
            EditRolePermissions,
            AddStaffMembers,
            AddSuperStaffMembers,
            ManageDeployment,
            ExportPatientData,
            ManageOrganization,
            DeleteOrganization,
            RemoveUser,
            AddPatients,
            PublishPatientData,
            ViewDeploymentKeyActions,
            ManageDeploymentTemplate,
        ], UserType::SuperAdmin),
        RoleName::HumaSupport => (&[
            ManageDeployment,
            AddStaffMembers,
            AddSuperStaffMembers,
            ManageOrganization,
            AddPatients,
            ViewDeploymentKeyActions,
            ManageDeploymentTemplate,
        ], UserType::SuperAdmin),
        RoleName::AccountManager => (&[
            CreateOrganization,
            ViewOwnResources,
            AddPatients,
            ManageDeploymentTemplate,
        ], UserType::SuperAdmin),
        RoleName::OrganizationOwner => (&[
            OperateOrganization,
            ManageDeployment,
            AddStaffMembers,
            AddSuperStaffMembers,
            EditRolePermissions,
            DeleteOrganization,
            ViewOwnResources,
            AddPatients,
            RetrieveDeploymentTemplate,
        ], UserType::SuperAdmin),
        RoleName::OrganizationEditor => (&[
            OperateOrganization,
            EditDeployment,
            AddStaffMembers,
            EditRolePermissions,
            ViewOwnResources,
            AddPatients,
            RetrieveDeploymentTemplate,
        ], UserType::SuperAdmin),
        RoleName::OrganizationStaff => (&[
            ExportPatientData,
            ManageLabels,
            ViewPatientData,
            ViewStaffList,
            ViewDashboard,
        ], UserType::Manager),
        RoleName::AccessController => (&[
            AddStaffMembers,
            AddPatients,
            EditRolePermissions,
            ExportPatientData,
            ManageLabels,
            ViewPatientData,
            ViewStaffList,
            ViewDashboard,
        ], UserType::Manager),
        RoleName::DeploymentStaff => (&[
            ContactPatient,
            ManagePatientData,
            ViewPatientData,
            ViewPatientIdentifier,
        ], UserType::Manager),
        RoleName::Admin => (&[
            ManagePatientData,
            ContactPatient,
            ViewPatientData,
            ViewPatientIdentifier,
            ManageOwnEvents,
            EditRolePermissions,
            AddStaffMembers,
            ExportPatientData,
            ManagePatientModuleConfig,
            ManageLabels,
        ], UserType::Manager),
        RoleName::Contributor | RoleName::Manager => (&[
            ManagePatientData,
            ContactPatient,
            ViewPatientData,
            ViewPatientIdentifier,
            ManageOwnEvents,
            ExportPatientData,
        ], UserType::Manager),
        RoleName::CallCenter => (&[
            ViewPatientData,
            ViewPatientIdentifier,
            EditPatientData,
            ContactPatient,
            OffBoardPatient,
            ManagePatientEvents,
            InviteProxyForPatient,
        ], UserType::Manager),
        RoleName::User => (&[
            GenerateHealthReport,
            ManageOwnEvents,
            InviteOwnProxy,
        ], UserType::User),
        RoleName::Proxy => (&[
            ManageOwnEvents,
            ViewPatientData,
            EditPatientData,
            ViewPatientIdentifier,
        ], UserType::Proxy),
        RoleName::Exporter => (&[
            ExportPatientData,
        ], UserType::ServiceAccount),
        RoleName::IdentifiableExport => (&[
            ExportPatientData,
            ViewPatientIdentifier,
        ], UserType::ServiceAccount),
        RoleName::Support => (&[
            ContactPatient,
            EditPatientData,
            ManageOwnEvents,
            ViewPatientData,
            ViewPatientIdentifier,
        ], UserType::Manager),
        RoleName::Administrator => (&[
            EditRolePermissions,
            AddStaffMembers,
            AddPatients,
            ExportPatientData,
            ViewStaffList,
            ViewPatientData,
            ManageLabels,
        ], UserType::Manager),
        RoleName::Supervisor => (&[
            ExportPatientData,
            ViewStaffList,
            ViewPatientData,
        ], UserType::Manager),
        RoleName::Clinician => (&[
            ExportPatientData,
            ViewPatientData,
            ManagePatientData,
            ContactPatient,
            ViewPatientIdentifier,
            InviteProxyForPatient,
            ManagePatientEvents,
            ManageOwnEvents,
            ViewStaffList,
        ], UserType::Manager),
    };
    // the legacy id shares the Contributor definition, id included
    let name = match name {
        RoleName::Manager => RoleName::Contributor,
        name => name,
    };
    Role::builtin(name, permissions.iter().copied(), user_type)
}

mod impls;
