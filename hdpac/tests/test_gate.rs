use hdpac::{
    context::{
        AccessContext,
        RequestContext,
        DEPLOYMENT_ID_HEADER,
        USER_ID_PARAM,
    },
    error::Error,
    gate::{
        self,
        PolicyGate,
    },
    Platform,
};
use hdpcore::ac::policy::{
    Policies,
    Policy,
};
use hdprbac::Hints;
use http::{
    HeaderValue,
    Method,
};

use test_hdp::ac::create_memory_platform;

async fn context(
    platform: &Platform,
    user_id: &str,
    deployment_id: Option<&'static str>,
    target: Option<&str>,
) -> anyhow::Result<AccessContext> {
    let mut request = RequestContext::new(Method::GET);
    if let Some(id) = deployment_id {
        request = request.header(DEPLOYMENT_ID_HEADER, HeaderValue::from_static(id));
    }
    if let Some(id) = target {
        request = request.path(USER_ID_PARAM, id);
    }
    Ok(platform.resolve(user_id, &request).await?)
}

#[async_std::test]
async fn enforce_static() -> anyhow::Result<()> {
    let platform = create_memory_platform()?;
    let ctx = context(&platform, "admin1", Some("D1"), None).await?;
    let guard = PolicyGate::new(&ctx);

    guard.enforce([])?;
    guard.enforce([Policy::ViewPatientData, Policy::ExportPatientData])?;
    let err = guard.enforce([Policy::ViewPatientData, Policy::CreateDeployment])
        .expect_err("should be an error");
    assert!(err.is_permission_denied());

    let ctx = context(&platform, "super", None, None).await?;
    gate::enforce(ctx.subject(), [Policy::CreateDeployment, Policy::InviteSuperStaff])?;
    Ok(())
}

#[async_std::test]
async fn user_routes() -> anyhow::Result<()> {
    let platform = create_memory_platform()?;

    // self
    let ctx = context(&platform, "patient1", None, Some("patient1")).await?;
    assert_eq!(gate::update_profile_policy(&ctx)?, Policies::from(Policy::EditOwnProfile));
    assert_eq!(gate::read_events_policy(&ctx)?, Policies::from(Policy::ViewOwnEvents));
    PolicyGate::new(&ctx).enforce_with(gate::update_profile_policy)?;

    // a manager reaching a patient in the same deployment
    let ctx = context(&platform, "admin1", Some("D1"), Some("patient1")).await?;
    let guard = PolicyGate::new(&ctx);
    assert_eq!(gate::update_profile_policy(&ctx)?, Policies::from(Policy::EditPatientProfile));
    assert_eq!(
        gate::personal_documents_policy(&ctx)?,
        Policies::from(Policy::ViewPatientIdentifier),
    );
    assert_eq!(
        gate::read_events_policy(&ctx)?,
        Policy::ViewPatientData | Policy::ScheduleAndCallPatient,
    );
    guard.enforce_with(gate::update_profile_policy)?;
    guard.enforce_with(gate::read_events_policy)?;

    // through the deployments of the organization
    let ctx = context(&platform, "clinician1", None, Some("patient1")).await?;
    assert_eq!(
        gate::retrieve_profile_policy(&ctx)?,
        Policies::from(Policy::ViewPatientProfile),
    );
    PolicyGate::new(&ctx).enforce_with(gate::retrieve_profile_policy)?;

    // not a manager
    let ctx = context(&platform, "patient1", None, Some("patient2")).await?;
    assert!(gate::update_profile_policy(&ctx)
        .expect_err("should be an error")
        .is_permission_denied());
    assert!(gate::read_events_policy(&ctx)
        .expect_err("should be an error")
        .is_permission_denied());

    // a manager elsewhere
    let ctx = context(&platform, "admin2", None, Some("patient1")).await?;
    assert!(PolicyGate::new(&ctx)
        .enforce_with(gate::update_profile_policy)
        .expect_err("should be an error")
        .is_permission_denied());

    // a wildcard holder reaches everyone
    let ctx = context(&platform, "super", None, Some("patient2")).await?;
    assert!(gate::is_same_resource(ctx.subject(), ctx.path_subject().expect("resolved")));
    Ok(())
}

#[async_std::test]
async fn proxy_profile() -> anyhow::Result<()> {
    let platform = create_memory_platform()?;
    let ctx = context(&platform, "patient1", None, Some("proxy1")).await?;
    assert_eq!(
        gate::retrieve_profile_policy(&ctx)?,
        Policies::from(Policy::ViewProxyProfile),
    );
    PolicyGate::new(&ctx).enforce_with(gate::retrieve_profile_policy)?;

    let ctx = context(&platform, "patient1", Some("D1"), None).await?;
    assert_eq!(
        platform.assign_proxy_policy(&ctx, "proxy1@example.com").await?,
        Policies::from(Policy::EditOwnProfile),
    );
    assert!(platform.assign_proxy_policy(&ctx, "patient1@example.com")
        .await
        .expect_err("should be an error")
        .is_permission_denied());
    assert!(platform.assign_proxy_policy(&ctx, "admin1@example.com")
        .await
        .expect_err("should be an error")
        .is_permission_denied());
    assert!(matches!(
        platform.assign_proxy_policy(&ctx, "nobody@example.com").await,
        Err(Error::UnknownUser(_)),
    ));
    Ok(())
}

#[async_std::test]
async fn role_management() -> anyhow::Result<()> {
    let platform = create_memory_platform()?;

    let ctx = context(&platform, "admin1", Some("D1"), Some("contributor1")).await?;
    assert_eq!(gate::assign_roles_policy(&ctx)?, Policies::from(Policy::AssignRolesToStaff));
    PolicyGate::new(&ctx).enforce_with(gate::assign_roles_policy)?;

    let ctx = context(&platform, "admin2", None, Some("contributor1")).await?;
    assert!(gate::assign_roles_policy(&ctx)
        .expect_err("should be an error")
        .is_permission_denied());

    let ctx = context(&platform, "patient1", None, None).await?;
    assert_eq!(gate::own_resource_policy(&ctx)?, Policies::from(Policy::ViewOwnResources));
    // the policy applies, the role lacks it
    assert!(PolicyGate::new(&ctx)
        .enforce_with(gate::own_resource_policy)
        .expect_err("should be an error")
        .is_permission_denied());
    let ctx = context(&platform, "admin1", Some("D1"), Some("patient1")).await?;
    assert!(gate::own_resource_policy(&ctx).is_err());
    Ok(())
}

#[async_std::test]
async fn invitations() -> anyhow::Result<()> {
    let platform = create_memory_platform()?;
    let patient = platform.resolved_subject(
        platform.get_user("patient1").await?,
        Hints::new(),
    ).await?;

    assert_eq!(
        gate::invitation_policy(&patient, "Proxy", Some("patient1")),
        Policies::from(Policy::InviteOwnProxy),
    );
    assert_eq!(
        gate::invitation_policy(&patient, "Proxy", Some("patient2")),
        Policies::from(Policy::InviteProxyForPatient),
    );
    assert_eq!(
        gate::invitation_policy(&patient, "User", None),
        Policies::from(Policy::InvitePatients),
    );
    assert_eq!(
        gate::invitation_policy(&patient, "Admin", None),
        Policies::from(Policy::InviteStaffs),
    );
    gate::enforce(&patient, gate::invitation_policy(&patient, "Proxy", Some("patient1")))?;

    let ctx = context(&platform, "super", None, None).await?;
    assert_eq!(
        gate::admin_invitation_policy(ctx.subject())?,
        Policies::from(Policy::InviteSuperStaff),
    );
    assert!(gate::deny_wildcard_holder(ctx.subject())
        .expect_err("should be an error")
        .is_permission_denied());

    let ctx = context(&platform, "admin1", Some("D1"), None).await?;
    assert!(gate::admin_invitation_policy(ctx.subject()).is_err());
    gate::deny_wildcard_holder(ctx.subject())?;
    Ok(())
}

#[async_std::test]
async fn retrieve_profiles() -> anyhow::Result<()> {
    let platform = create_memory_platform()?;

    let ctx = context(&platform, "clinician1", None, None).await?;
    assert_eq!(
        gate::retrieve_profiles_policy(ctx.subject(), true),
        Policies::from(Policy::ViewStaffList),
    );
    assert_eq!(
        gate::retrieve_profiles_policy(ctx.subject(), false),
        Policies::from(Policy::ViewPatientProfile),
    );

    let ctx = context(&platform, "admin1", Some("D1"), None).await?;
    assert_eq!(
        gate::retrieve_profiles_policy(ctx.subject(), true),
        Policies::from(Policy::ViewPatientProfile),
    );
    Ok(())
}
