use hdpac::{
    backend::MemoryBackend,
    platform::Builder,
    Platform,
};

/// Two organizations over three deployments, with a user per role of
/// interest.
///
/// - O1 holds D1 and D3, O2 holds D2.
/// - D1 defines the custom role `nurse-d1`; O1 defines `auditor-o1`.
/// - `proxy1` is the proxy of `patient1`.
pub const SAMPLE_STORE: &str = r#"{
    "deployments": [
        {
            "id": "D1",
            "name": "Diabetes",
            "roles": [
                {
                    "id": "nurse-d1",
                    "name": "Nurse",
                    "permissions": ["VIEW_PATIENT_DATA", "CONTACT_PATIENT"],
                    "userType": "Manager"
                }
            ]
        },
        {"id": "D2", "name": "Cardiology"},
        {"id": "D3", "name": "Oncology"}
    ],
    "organizations": [
        {
            "id": "O1",
            "name": "North",
            "deploymentIds": ["D1", "D3"],
            "roles": [
                {
                    "id": "auditor-o1",
                    "name": "Auditor",
                    "permissions": ["VIEW_STAFF_LIST"],
                    "userType": "Manager"
                }
            ]
        },
        {"id": "O2", "name": "South", "deploymentIds": ["D2"]}
    ],
    "users": [
        {
            "id": "super",
            "email": "super@example.com",
            "roles": [{"roleId": "SuperAdmin", "resource": "deployment/*"}]
        },
        {
            "id": "admin1",
            "email": "admin1@example.com",
            "roles": [{"roleId": "Admin", "resource": "deployment/D1"}]
        },
        {
            "id": "admin2",
            "roles": [{"roleId": "Admin", "resource": "deployment/D2"}]
        },
        {
            "id": "contributor1",
            "roles": [{"roleId": "Contributor", "resource": "deployment/D1"}]
        },
        {
            "id": "ac1",
            "roles": [{"roleId": "AccessController", "resource": "organization/O1"}]
        },
        {
            "id": "clinician1",
            "roles": [{"roleId": "Clinician", "resource": "organization/O1"}]
        },
        {
            "id": "staff1",
            "roles": [{"roleId": "CallCenter", "resource": "deployment/D1"}]
        },
        {
            "id": "patient1",
            "email": "patient1@example.com",
            "locale": "en",
            "roles": [{"roleId": "User", "resource": "deployment/D1"}]
        },
        {
            "id": "patient2",
            "roles": [{"roleId": "User", "resource": "deployment/D2"}]
        },
        {
            "id": "proxy1",
            "email": "proxy1@example.com",
            "roles": [{"roleId": "Proxy", "resource": "user/patient1"}]
        },
        {
            "id": "roleless",
            "email": "roleless@example.com"
        }
    ]
}"#;

pub fn create_memory_backend() -> anyhow::Result<MemoryBackend> {
    Ok(MemoryBackend::from_json(SAMPLE_STORE)?)
}

pub fn create_memory_platform() -> anyhow::Result<Platform> {
    let platform = Builder::new()
        .ac_platform(create_memory_backend()?)
        .supported_locales(["en", "de", "fr"])
        .build()?;
    Ok(platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[async_std::test]
    async fn smoke_test_create_platform() -> anyhow::Result<()> {
        let platform = create_memory_platform()?;
        assert_eq!(platform.default_locale(), "en");
        assert!(platform.get_user("patient1").await.is_ok());
        Ok(())
    }
}
