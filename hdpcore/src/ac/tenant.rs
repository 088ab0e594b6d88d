use serde::{Deserialize, Serialize};

use crate::ac::role::Role;

/// A clinical study or program; the most common resource scope.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// The custom roles defined for this deployment.
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// A tenant grouping deployments.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub deployment_ids: Vec<String>,
    /// The custom roles defined for this organization.
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl Deployment {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            roles: Vec::new(),
        }
    }
}

impl Organization {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            .. Default::default()
        }
    }

    pub fn contains_deployment(&self, deployment_id: &str) -> bool {
        self.deployment_ids.iter().any(|id| id == deployment_id)
    }
}
