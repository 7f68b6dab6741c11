//! Command implementations.

pub mod builds;
pub mod catalog;
pub mod show;

pub use self::builds::{execute_builds, execute_delete, execute_totals};
pub use self::catalog::execute_catalog;
pub use self::show::execute_show;
