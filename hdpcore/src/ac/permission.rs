use enumset::{
    EnumSet,
    EnumSetType,
};

closed_enum! {
    /// Coarse capabilities granted to a role.
    ///
    /// Variants are declared in name order, so iterating a set of
    /// permissions always yields them sorted.
    #[derive(Debug, EnumSetType, Hash, PartialOrd, Ord)]
    #[enumset(serialize_repr = "list")]
    pub enum Permission {
        AddPatients => "ADD_PATIENTS",
        AddStaffMembers => "ADD_STAFF_MEMBERS",
        AddSuperStaffMembers => "ADD_SUPER_STAFF_MEMBERS",
        ContactPatient => "CONTACT_PATIENT",
        CreateOrganization => "CREATE_ORGANIZATION",
        DeleteOrganization => "DELETE_ORGANIZATION",
        EditDeployment => "EDIT_DEPLOYMENT",
        EditPatientData => "EDIT_PATIENT_DATA",
        EditRolePermissions => "EDIT_ROLE_PERMISSIONS",
        ExportPatientData => "EXPORT_PATIENT_DATA",
        GenerateAuthToken => "GENERATE_AUTH_TOKEN",
        GenerateHealthReport => "GENERATE_HEALTH_REPORT",
        InviteOwnProxy => "INVITE_OWN_PROXY",
        InviteProxyForPatient => "INVITE_PROXY_FOR_PATIENT",
        ManageAdmins => "MANAGE_ADMINS",
        ManageDeployment => "MANAGE_DEPLOYMENT",
        ManageDeploymentTemplate => "MANAGE_DEPLOYMENT_TEMPLATE",
        ManageLabels => "MANAGE_LABELS",
        ManageOrganization => "MANAGE_ORGANIZATION",
        ManageOwnData => "MANAGE_OWN_DATA",
        ManageOwnEvents => "MANAGE_OWN_EVENTS",
        ManagePatientData => "MANAGE_PATIENT_DATA",
        ManagePatientEvents => "MANAGE_PATIENT_EVENTS",
        ManagePatientModuleConfig => "MANAGE_PATIENT_MODULE_CONFIG",
        OffBoardPatient => "OFF_BOARD_PATIENT",
        OperateOrganization => "OPERATE_ORGANIZATION",
        PublishPatientData => "PUBLISH_PATIENT_DATA",
        RemoveUser => "REMOVE_USER",
        RetrieveDeploymentTemplate => "RETRIEVE_DEPLOYMENT_TEMPLATE",
        ViewDashboard => "VIEW_DASHBOARD",
        ViewDeploymentKeyActions => "VIEW_DEPLOYMENT_KEY_ACTIONS",
        ViewOwnData => "VIEW_OWN_DATA",
        ViewOwnResources => "VIEW_OWN_RESOURCES",
        ViewPatientData => "VIEW_PATIENT_DATA",
        ViewPatientIdentifier => "VIEW_PATIENT_IDENTIFIER",
        ViewProxyProfile => "VIEW_PROXY_PROFILE",
        ViewStaffList => "VIEW_STAFF_LIST",
    }
}

pub type Permissions = EnumSet<Permission>;

mod impls;
pub use impls::policies_of;
