use std::{
    fmt,
    str::FromStr,
};
use crate::error::ValueError;
use super::*;

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "deployment",
            ResourceKind::Organization => "organization",
            ResourceKind::User => "user",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deployment" => Ok(ResourceKind::Deployment),
            "organization" => Ok(ResourceKind::Organization),
            "user" => Ok(ResourceKind::User),
            s => {
                log::debug!("unsupported resource type {s}");
                Err(ValueError::Unsupported(s.to_string()))
            }
        }
    }
}

impl ResourceRef {
    pub fn new(
        kind: ResourceKind,
        id: impl Into<String>,
    ) -> Result<Self, ValueError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValueError::Invalid(format!("{kind} has an empty id")));
        }
        if id.contains('/') {
            return Err(ValueError::Invalid(format!("{kind}/{id}")));
        }
        if kind == ResourceKind::User && id == WILDCARD {
            return Err(ValueError::Invalid("user/* is not a valid resource".to_string()));
        }
        Ok(Self { kind, id })
    }

    pub fn deployment(id: impl Into<String>) -> Result<Self, ValueError> {
        Self::new(ResourceKind::Deployment, id)
    }

    pub fn organization(id: impl Into<String>) -> Result<Self, ValueError> {
        Self::new(ResourceKind::Organization, id)
    }

    pub fn user(id: impl Into<String>) -> Result<Self, ValueError> {
        Self::new(ResourceKind::User, id)
    }

    /// `deployment/*`
    pub fn all_deployments() -> Self {
        Self {
            kind: ResourceKind::Deployment,
            id: WILDCARD.to_string(),
        }
    }

    /// `organization/*`
    pub fn all_organizations() -> Self {
        Self {
            kind: ResourceKind::Organization,
            id: WILDCARD.to_string(),
        }
    }

    /// The wildcard reference for the kind; `None` for users.
    pub fn wildcard(kind: ResourceKind) -> Option<Self> {
        (kind != ResourceKind::User).then(|| Self {
            kind,
            id: WILDCARD.to_string(),
        })
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_wildcard(&self) -> bool {
        self.id == WILDCARD
    }

    /// Matches against a `type` or `type/id` key.  A key without an id
    /// matches any resource of that type.
    pub fn matches(&self, kind: ResourceKind, id: Option<&str>) -> bool {
        self.kind == kind && id.map(|id| self.id == id).unwrap_or(true)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

impl FromStr for ResourceRef {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s.split_once('/')
            .ok_or_else(|| ValueError::Invalid(format!("{s} is not of the form type/id")))?;
        Self::new(kind.parse()?, id)
            .map_err(|e| {
                log::debug!("rejected resource {s}: {e}");
                e
            })
    }
}

impl TryFrom<String> for ResourceRef {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourceRef> for String {
    fn from(value: ResourceRef) -> String {
        value.to_string()
    }
}
