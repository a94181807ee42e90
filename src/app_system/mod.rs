//! System orchestration, startup, and shutdown logic.

pub mod warehouse_system;
pub mod tracing;
pub mod error;

pub use warehouse_system::*;
pub use self::tracing::*;
pub use error::*;
