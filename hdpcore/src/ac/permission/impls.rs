use enumset::enum_set;
use crate::ac::policy::{
    Policies,
    Policy,
};
use super::*;

impl Permission {
    /// The base permissions every role carries.
    pub fn common() -> Permissions {
        enum_set!(
            Permission::GenerateAuthToken |
            Permission::ManageOwnData |
            Permission::ViewOwnData |
            Permission::ViewProxyProfile
        )
    }

    /// The permission to policy matrix.
    pub fn policies(self) -> Policies {
        match self {
            Permission::ViewOwnData => enum_set!(
                Policy::ViewOwnProfile |
                Policy::ViewOwnData |
                Policy::ViewOwnDeployment |
                Policy::ViewOwnEvents |
                Policy::ViewOwnMessages
            ),
            Permission::ManageOwnData => enum_set!(
                Policy::EditOwnProfile |
                Policy::EditOwnData
            ),
            Permission::ManageOwnEvents => enum_set!(Policy::EditOwnEvents),
            Permission::ViewProxyProfile => enum_set!(Policy::ViewProxyProfile),
            Permission::InviteOwnProxy => enum_set!(Policy::InviteOwnProxy),
            Permission::GenerateHealthReport => enum_set!(Policy::GenerateHealthReport),

            Permission::ViewPatientData => enum_set!(
                Policy::ViewPatientProfile |
                Policy::ViewPatientData
            ),
            Permission::ManagePatientData => enum_set!(
                Policy::AddRemovePatient |
                Policy::ChangePatientStatus |
                Policy::EditPatientNote |
                Policy::EditPatientProfile |
                Policy::EditPatientData |
                Policy::AssignPatientToStaff |
                Policy::MovePatientToOtherGroup |
                Policy::OffBoardPatient |
                Policy::InvitePatients |
                Policy::InviteProxyForPatient |
                Policy::AssignPatientLabels
            ),
            Permission::EditPatientData => enum_set!(
                Policy::EditPatientProfile |
                Policy::EditPatientData
            ),
            Permission::ManagePatientModuleConfig => enum_set!(
                Policy::ManagePatientModuleConfig
            ),
            Permission::ViewPatientIdentifier => enum_set!(Policy::ViewPatientIdentifier),
            Permission::ContactPatient => enum_set!(
                Policy::ScheduleAndCallPatient |
                Policy::RescheduleCall |
                Policy::SendPatientMessage |
                Policy::ViewPatientMessage
            ),
            Permission::ExportPatientData => enum_set!(Policy::ExportPatientData),
            Permission::AddStaffMembers => enum_set!(
                Policy::InviteStaffs |
                Policy::AssignRolesToStaff
            ),
            Permission::AddPatients => enum_set!(Policy::InvitePatients),
            Permission::ViewStaffList => enum_set!(Policy::ViewStaffList),
            Permission::OffBoardPatient => enum_set!(Policy::OffBoardPatient),
            Permission::ManagePatientEvents => enum_set!(
                Policy::ViewPatientEvents |
                Policy::EditPatientEvents
            ),
            Permission::InviteProxyForPatient => enum_set!(Policy::InviteProxyForPatient),
            Permission::ManageLabels => enum_set!(
                Policy::CreatePatientLabels |
                Policy::EditPatientLabels |
                Policy::DeletePatientLabels
            ),

            Permission::EditRolePermissions => enum_set!(
                Policy::EditCustomRoles |
                Policy::ViewCustomRoles
            ),
            Permission::ManageAdmins => enum_set!(
                Policy::InviteAdmins |
                Policy::RemoveStaff
            ),
            Permission::ManageDeployment => enum_set!(
                Policy::CreateDeployment |
                Policy::ViewDeployment |
                Policy::EditDeployment
            ),
            Permission::EditDeployment => enum_set!(
                Policy::ViewDeployment |
                Policy::EditDeployment
            ),
            Permission::CreateOrganization => enum_set!(Policy::CreateOrganization),
            Permission::ManageOrganization => enum_set!(
                Policy::ViewOrganization |
                Policy::CreateOrganization |
                Policy::EditOrganization
            ),
            Permission::OperateOrganization => enum_set!(
                Policy::ViewOrganization |
                Policy::EditOrganization
            ),
            Permission::DeleteOrganization => enum_set!(Policy::DeleteOrganization),
            Permission::RemoveUser => enum_set!(Policy::RemoveUser),
            Permission::GenerateAuthToken => enum_set!(Policy::GenerateAuthToken),
            Permission::PublishPatientData => enum_set!(Policy::PublishPatientData),
            Permission::AddSuperStaffMembers => enum_set!(Policy::InviteSuperStaff),
            Permission::ManageDeploymentTemplate => enum_set!(
                Policy::CreateDeploymentTemplate |
                Policy::DeleteDeploymentTemplate |
                Policy::UpdateDeploymentTemplate |
                Policy::RetrieveDeploymentTemplate
            ),
            Permission::RetrieveDeploymentTemplate => enum_set!(
                Policy::RetrieveDeploymentTemplate
            ),
            Permission::ViewDashboard => enum_set!(Policy::ViewDashboard),

            Permission::ViewDeploymentKeyActions => enum_set!(
                Policy::ViewDeploymentKeyActions
            ),
            Permission::ViewOwnResources => enum_set!(Policy::ViewOwnResources),
        }
    }
}

/// Union of the policies reachable from the given permissions.
pub fn policies_of(permissions: Permissions) -> Policies {
    permissions.iter()
        .fold(Policies::empty(), |acc, permission| acc | permission.policies())
}
