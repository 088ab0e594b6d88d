use hdpcore::ac::role::RoleName;
use hdprbac::Hints;
use std::{
    fmt,
    ops::Deref,
};

use crate::error::Error;
use super::*;

impl Subject {
    pub(crate) fn new(
        platform: Platform,
        subject: hdprbac::Subject,
    ) -> Self {
        Self {
            platform,
            subject,
        }
    }

    pub fn into_inner(self) -> hdprbac::Subject {
        self.subject
    }

    /// Proxies of this user whose own subject resolves in the
    /// deployment this subject acts in.  Empty unless the subject is a
    /// user.
    pub async fn assigned_proxies(&self) -> Result<Vec<User>, Error> {
        if !self.is_user() {
            return Ok(Vec::new());
        }
        let hints = Hints {
            deployment_id: self.deployment_id().map(str::to_string),
            .. Default::default()
        };
        let mut result = Vec::new();
        for proxy in self.platform.ac_platform()
            .get_proxies_for_user(self.id())
            .await?
        {
            let subject = self.platform.subject(proxy, hints.clone()).await?;
            if subject.is_resolved() {
                result.push(subject.into_inner().into_user());
            } else {
                log::debug!("proxy {} of {} has no role", subject.id(), self.id());
            }
        }
        Ok(result)
    }

    /// The users this proxy acts for that resolve a role.  Empty unless
    /// the subject is a proxy.
    pub async fn assigned_participants(&self) -> Result<Vec<Participant>, Error> {
        if !self.is_proxy() {
            return Ok(Vec::new());
        }
        let users = self.platform.ac_platform()
            .get_users_by_ids(
                self.proxy_participant_ids(),
                Some(RoleName::User.as_str()),
            )
            .await?;
        let mut result = Vec::new();
        for user in users {
            let subject = self.platform.subject(user, Hints::default()).await?;
            if !subject.is_resolved() {
                continue;
            }
            let deployment_id = subject.deployment_id().map(str::to_string);
            result.push(Participant {
                user: subject.into_inner().into_user(),
                deployment_id,
            });
        }
        Ok(result)
    }

    /// Whether any participant of this proxy is in the deployment this
    /// subject acts in; `None` unless the subject is a proxy.
    ///
    /// Each participant is compared by the deployment its own role
    /// resolves to, not the deployment of the proxy, so a proxy acting
    /// in a deployment none of its participants belong to is unlinked.
    pub async fn proxy_link_status(&self) -> Result<Option<ProxyStatus>, Error> {
        if !self.is_proxy() {
            return Ok(None);
        }
        let Some(deployment_id) = self.deployment_id() else {
            return Ok(Some(ProxyStatus::Unlink));
        };
        let linked = self.assigned_participants()
            .await?
            .iter()
            .any(|participant| participant.deployment_id.as_deref() == Some(deployment_id));
        Ok(Some(if linked {
            ProxyStatus::Linked
        } else {
            ProxyStatus::Unlink
        }))
    }
}

impl Deref for Subject {
    type Target = hdprbac::Subject;

    fn deref(&self) -> &Self::Target {
        &self.subject
    }
}

impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Subject")
            .field(&self.subject)
            .finish()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.subject, f)
    }
}
