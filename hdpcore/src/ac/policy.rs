use enumset::{
    EnumSet,
    EnumSetType,
};

closed_enum! {
    /// Fine-grained capabilities checked at the enforcement boundary.
    ///
    /// A policy is only ever reachable through a held `Permission`; the
    /// discriminant is its stable code and defines the total order.
    #[derive(Debug, EnumSetType, Hash, PartialOrd, Ord)]
    #[enumset(serialize_repr = "list")]
    pub enum Policy {
        // own data
        ViewOwnData = 1 => "VIEW_OWN_DATA",
        EditOwnData = 2 => "EDIT_OWN_DATA",
        ViewOwnProfile = 3 => "VIEW_OWN_PROFILE",
        EditOwnProfile = 4 => "EDIT_OWN_PROFILE",
        ViewOwnDeployment = 5 => "VIEW_OWN_DEPLOYMENT",
        ViewOwnEvents = 6 => "VIEW_OWN_EVENTS",
        EditOwnEvents = 7 => "EDIT_OWN_EVENTS",
        ViewProxyProfile = 8 => "VIEW_PROXY_PROFILE",
        ViewOwnMessages = 9 => "VIEW_OWN_MESSAGES",
        InviteOwnProxy = 10 => "INVITE_OWN_PROXY",
        GenerateHealthReport = 15 => "GENERATE_HEALTH_REPORT",

        // patient care
        ViewPatientData = 21 => "VIEW_PATIENT_DATA",
        EditPatientData = 22 => "EDIT_PATIENT_DATA",
        ViewPatientProfile = 23 => "VIEW_PATIENT_PROFILE",
        EditPatientProfile = 24 => "EDIT_PATIENT_PROFILE",
        EditPatientNote = 25 => "EDIT_PATIENT_NOTE",
        ChangePatientStatus = 26 => "CHANGE_PATIENT_STATUS",
        AssignPatientToStaff = 27 => "ASSIGN_PATIENT_TO_STAFF",
        MovePatientToOtherGroup = 28 => "MOVE_PATIENT_TO_OTHER_GROUP",
        InviteProxyForPatient = 29 => "INVITE_PROXY_FOR_PATIENT",
        ScheduleAndCallPatient = 30 => "SCHEDULE_AND_CALL_PATIENT",
        RescheduleCall = 31 => "RESCHEDULE_CALL",
        ExportPatientData = 32 => "EXPORT_PATIENT_DATA",
        ViewPatientIdentifier = 33 => "VIEW_PATIENT_IDENTIFIER",
        AddRemovePatient = 34 => "ADD_REMOVE_PATIENT",

        // staff management
        InvitePatients = 35 => "INVITE_PATIENTS",
        InviteStaffs = 36 => "INVITE_STAFFS",
        InviteAdmins = 37 => "INVITE_ADMINS",
        RemoveStaff = 38 => "REMOVE_STAFF",
        AssignRolesToStaff = 39 => "ASSIGN_ROLES_TO_STAFF",
        ViewCustomRoles = 40 => "VIEW_CUSTOM_ROLES",
        EditCustomRoles = 41 => "EDIT_CUSTOM_ROLES",
        ViewStaffList = 42 => "VIEW_STAFF_LIST",
        OffBoardPatient = 43 => "OFF_BOARD_PATIENT",
        SendPatientMessage = 44 => "SEND_PATIENT_MESSAGE",
        ViewPatientMessage = 45 => "VIEW_PATIENT_MESSAGE",
        ViewPatientEvents = 46 => "VIEW_PATIENT_EVENTS",
        EditPatientEvents = 47 => "EDIT_PATIENT_EVENTS",
        ManagePatientModuleConfig = 48 => "MANAGE_PATIENT_MODULE_CONFIG",
        CreatePatientLabels = 49 => "CREATE_PATIENT_LABELS",
        EditPatientLabels = 50 => "EDIT_PATIENT_LABELS",
        AssignPatientLabels = 51 => "ASSIGN_PATIENT_LABELS",
        DeletePatientLabels = 52 => "DELETE_PATIENT_LABELS",

        // platform administration
        ViewDeployment = 80 => "VIEW_DEPLOYMENT",
        EditDeployment = 81 => "EDIT_DEPLOYMENT",
        CreateDeployment = 82 => "CREATE_DEPLOYMENT",
        EditExportDeploymentConfig = 83 => "EDIT_EXPORT_DEPLOYMENT_CONFIG",
        RemoveUser = 84 => "REMOVE_USER",
        ViewOrganization = 85 => "VIEW_ORGANIZATION",
        CreateOrganization = 86 => "CREATE_ORGANIZATION",
        EditOrganization = 87 => "EDIT_ORGANIZATION",
        DeleteOrganization = 88 => "DELETE_ORGANIZATION",
        GenerateAuthToken = 89 => "GENERATE_AUTH_TOKEN",
        PublishPatientData = 90 => "PUBLISH_PATIENT_DATA",
        InviteSuperStaff = 91 => "INVITE_SUPER_STAFF",
        ViewOwnResources = 92 => "VIEW_OWN_RESOURCES",
        CreateDeploymentTemplate = 93 => "CREATE_DEPLOYMENT_TEMPLATE",
        RetrieveDeploymentTemplate = 94 => "RETRIEVE_DEPLOYMENT_TEMPLATE",
        DeleteDeploymentTemplate = 95 => "DELETE_DEPLOYMENT_TEMPLATE",
        UpdateDeploymentTemplate = 96 => "UPDATE_DEPLOYMENT_TEMPLATE",
        ViewDashboard = 97 => "VIEW_DASHBOARD",
        CreateDashboard = 98 => "CREATE_DASHBOARD",
        ViewDeploymentKeyActions = 100 => "VIEW_DEPLOYMENT_KEY_ACTIONS",
    }
}

pub type Policies = EnumSet<Policy>;

impl Policy {
    pub fn code(self) -> u8 {
        self as u8
    }
}
