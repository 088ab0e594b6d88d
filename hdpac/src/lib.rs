pub mod backend;
pub mod context;
pub mod error;
pub mod gate;
pub mod platform;
pub mod subject;

pub use platform::Platform;
