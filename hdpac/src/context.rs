use hdprbac::Hints;
use http::{
    HeaderMap,
    HeaderName,
    Method,
};
use std::collections::HashMap;

use crate::subject::Subject;

pub const DEPLOYMENT_ID_HEADER: HeaderName = HeaderName::from_static("x-deployment-id");
pub const ORGANIZATION_ID_HEADER: HeaderName = HeaderName::from_static("x-org-id");
pub const LOCALE_HEADER: HeaderName = HeaderName::from_static("x-hu-locale");

pub const DEPLOYMENT_ID_KEY: &str = "deploymentId";
pub const ORGANIZATION_ID_KEY: &str = "organizationId";
pub const DEPLOYMENT_ID_PARAM: &str = "deployment_id";
pub const ORGANIZATION_ID_PARAM: &str = "organization_id";
pub const USER_ID_PARAM: &str = "user_id";
pub const MANAGER_ID_PARAM: &str = "manager_id";
pub const FILENAME_KEY: &str = "filename";

/// The parts of an incoming request relevant to access control, as
/// extracted by the transport.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    pub method: Method,
    pub headers: HeaderMap,
    pub query: HashMap<String, String>,
    /// Parameters captured from the route.
    pub path: HashMap<String, String>,
    pub form: HashMap<String, String>,
    pub body: Option<serde_json::Value>,
}

/// The outcome of resolving a request: the acting subject, and the
/// subject of the user addressed by the route, if any.
#[derive(Clone, Debug)]
pub struct AccessContext {
    hints: Hints,
    subject: Subject,
    path_subject: Option<Subject>,
}

mod impls;
