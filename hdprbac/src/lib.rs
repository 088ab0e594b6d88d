pub mod catalog;
pub mod custom;
pub mod directory;
pub mod error;
pub mod merge;
pub mod rules;
pub mod subject;

pub use catalog::RoleCatalog;
pub use directory::TenantDirectory;
pub use subject::{
    Hints,
    Subject,
};
