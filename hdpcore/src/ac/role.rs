use enumset::{
    EnumSet,
    EnumSetType,
};
use serde::{Deserialize, Serialize};

use crate::ac::permission::Permissions;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum UserType {
    SuperAdmin,
    #[default]
    Manager,
    User,
    Proxy,
    ServiceAccount,
}

closed_enum! {
    /// Ids of the built-in roles.
    #[derive(Debug, EnumSetType, Hash)]
    pub enum RoleName {
        SuperAdmin => "SuperAdmin",
        HumaSupport => "HumaSupport",
        AccountManager => "AccountManager",
        OrganizationOwner => "OrganizationOwner",
        OrganizationStaff => "OrganizationStaff",
        OrganizationEditor => "OrganizationEditor",
        AccessController => "AccessController",
        DeploymentStaff => "DeploymentStaff",
        Admin => "Admin",
        Contributor => "Contributor",
        CallCenter => "CallCenter",
        User => "User",
        Proxy => "Proxy",
        Exporter => "Exporter",
        /// Legacy id, defined as a Contributor.
        Manager => "Manager",
        IdentifiableExport => "IdentifiableExport",
        Support => "Support",
        Administrator => "Administrator",
        Supervisor => "Supervisor",
        Clinician => "Clinician",
    }
}

pub type RoleNames = EnumSet<RoleName>;

/// A named bundle of permissions plus a coarse user type.
///
/// The permission set always contains [`Permission::common`]; it is
/// kept as a set so it is free of duplicates and iterates in sorted
/// order.
///
/// [`Permission::common`]: crate::ac::permission::Permission::common
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// `None` for a custom role that has yet to be created.
    pub id: Option<String>,
    pub name: String,
    permissions: Permissions,
    pub user_type: UserType,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoleRecord {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    permissions: Permissions,
    #[serde(default)]
    user_type: UserType,
}

mod impls;
