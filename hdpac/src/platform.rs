use hdpcore::platform::AcPlatform;
use std::sync::Arc;

pub const DEFAULT_LOCALE: &str = "en";

pub struct Builder {
    ac_platform: Option<Arc<dyn AcPlatform>>,
    // locale used in place of any unsupported one
    default_locale: String,
    supported_locales: Vec<String>,
}

/// The access control platform.
///
/// Cloning is cheap; every clone shares the same backend.
#[derive(Clone)]
pub struct Platform(Arc<PlatformInner>);

struct PlatformInner {
    ac_platform: Arc<dyn AcPlatform>,
    default_locale: String,
    supported_locales: Vec<String>,
}

/// The users a bulk role assignment applies to.
#[derive(Clone, Debug, PartialEq)]
pub enum Targets {
    Users(Vec<String>),
    /// Every staff member of the submitter's deployment other than the
    /// submitter, excluding holders of organization roles.
    AllStaff,
}

mod impls;
