use hdpcore::ac::resource::{
    ResourceKind,
    WILDCARD,
};
use http::HeaderValue;

use crate::error::ContextError;
use super::*;

/// Pick the hint out of the candidate values in priority order.
///
/// Concrete values must all agree; a concrete value always wins over a
/// wildcard.
fn select_hint<'a>(
    kind: ResourceKind,
    values: impl IntoIterator<Item = Option<&'a str>>,
) -> Result<Option<String>, ContextError> {
    let values = values.into_iter()
        .flatten()
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>();
    let mut concrete = values.iter()
        .copied()
        .filter(|value| *value != WILDCARD);
    match concrete.next() {
        Some(first) => match concrete.find(|value| *value != first) {
            Some(second) => {
                log::debug!("conflicting {kind} hints {first} and {second}");
                Err(ContextError::ConflictingResourceContext {
                    kind,
                    first: first.to_string(),
                    second: second.to_string(),
                })
            }
            None => Ok(Some(first.to_string())),
        },
        None => Ok(values.first().map(|value| value.to_string())),
    }
}

impl RequestContext {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            .. Default::default()
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn path(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(key.into(), value.into());
        self
    }

    pub fn form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    fn header_str(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name)
            .and_then(|value| value.to_str().ok())
    }

    fn body_str(&self, key: &str) -> Option<&str> {
        self.body.as_ref()
            .and_then(|body| body.get(key))
            .and_then(|value| value.as_str())
    }

    fn hint(
        &self,
        kind: ResourceKind,
        header: &HeaderName,
        key: &str,
        param: &str,
    ) -> Result<Option<String>, ContextError> {
        select_hint(kind, [
            self.header_str(header),
            self.query.get(key).map(String::as_str),
            self.path.get(param).map(String::as_str),
            self.body_str(key),
        ])
    }

    /// The deployment the request is about, from the header, query,
    /// path or body in that order of priority.
    pub fn deployment_id(&self) -> Result<Option<String>, ContextError> {
        self.hint(
            ResourceKind::Deployment,
            &DEPLOYMENT_ID_HEADER,
            DEPLOYMENT_ID_KEY,
            DEPLOYMENT_ID_PARAM,
        )
    }

    pub fn organization_id(&self) -> Result<Option<String>, ContextError> {
        self.hint(
            ResourceKind::Organization,
            &ORGANIZATION_ID_HEADER,
            ORGANIZATION_ID_KEY,
            ORGANIZATION_ID_PARAM,
        )
    }

    pub fn locale(&self) -> Option<&str> {
        self.header_str(&LOCALE_HEADER)
            .filter(|locale| !locale.is_empty())
    }

    /// The user addressed by the route: the `user_id` or `manager_id`
    /// parameter, or else the id in a `user/{id}/...` file name.
    pub fn path_user_id(&self) -> Option<String> {
        [USER_ID_PARAM, MANAGER_ID_PARAM].into_iter()
            .filter_map(|param| self.path.get(param))
            .find(|id| !id.is_empty())
            .cloned()
            .or_else(|| self.filename_user_id())
    }

    fn filename_user_id(&self) -> Option<String> {
        let source = if self.method == Method::GET {
            &self.path
        } else {
            &self.form
        };
        let mut parts = source.get(FILENAME_KEY)?.splitn(3, '/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("user"), Some(id), Some(_)) if !id.is_empty() => Some(id.to_string()),
            _ => None,
        }
    }
}

impl AccessContext {
    pub(crate) fn new(
        hints: Hints,
        subject: Subject,
        path_subject: Option<Subject>,
    ) -> Self {
        Self {
            hints,
            subject,
            path_subject,
        }
    }

    /// The hints extracted from the request.
    pub fn hints(&self) -> &Hints {
        &self.hints
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn path_subject(&self) -> Option<&Subject> {
        self.path_subject.as_ref()
    }

    /// Whether the request addresses the acting user; a request that
    /// addresses no user is taken to be about the acting user.
    pub fn is_self_request(&self) -> bool {
        self.path_subject.as_ref()
            .map(|target| target.id() == self.subject.id())
            .unwrap_or(true)
    }
}
