use hdpcore::ac::user::User;
use serde::Serialize;

use crate::Platform;

/// A resolved subject bound to the platform it was resolved by, for
/// the queries that need to consult the stores.
///
/// Dereferences to the underlying [`hdprbac::Subject`].
#[derive(Clone)]
pub struct Subject {
    platform: Platform,
    subject: hdprbac::Subject,
}

/// A user a proxy acts for.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub user: User,
    /// The deployment the participant's own subject acts in.
    pub deployment_id: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProxyStatus {
    Linked,
    Unlink,
}

mod impls;
