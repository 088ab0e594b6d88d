#[macro_use]
mod macros;

pub mod assignment;
pub mod permission;
pub mod policy;
pub mod resource;
pub mod role;
pub mod tenant;
pub mod traits;
pub mod user;

pub use self::assignment::RoleAssignment;
pub use self::resource::ResourceRef;
pub use self::role::Role;
