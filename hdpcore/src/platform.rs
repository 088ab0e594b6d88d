use crate::ac::traits::{
    ProfileBackend,
    TenantBackend,
};

/// AcPlatform - Access Control Platform
///
/// The stores the access control core reads from and writes to: user
/// profiles with their role assignments, and the deployments and
/// organizations that own custom roles.
///
/// This trait is applicable to everything that correctly implements the
/// relevant backends that compose this trait.
pub trait AcPlatform: ProfileBackend
    + TenantBackend

    + Send
    + Sync
{
    fn as_dyn(&self) -> &dyn AcPlatform;
}

pub trait DefaultAcPlatform: AcPlatform {}

impl<P: ProfileBackend
    + TenantBackend

    + DefaultAcPlatform

    + Send
    + Sync
> AcPlatform for P {
    fn as_dyn(&self) -> &(dyn AcPlatform) {
        self
    }
}
