use serde::{Deserialize, Serialize};

/// The id that stands for every resource of a given kind.
pub const WILDCARD: &str = "*";

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Deployment,
    Organization,
    /// A user account, used as the target of a proxy relationship.
    User,
}

/// A typed reference to a resource, serialized as `type/id`.
///
/// The id may be the wildcard `*` only for deployments and
/// organizations; construction through [`ResourceRef::new`] or parsing
/// enforces this.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceRef {
    kind: ResourceKind,
    id: String,
}

mod impls;
