//! Command implementations for iamsync-cli

pub mod check_version;
pub mod export;
pub mod import;
pub mod summary;

pub use check_version::run_check_version;
pub use export::run_export;
pub use import::run_import;
