pub mod config;
pub mod dashboard;
pub mod error;
pub mod folder;
pub mod format;
pub mod logging;
pub mod scheduler;
pub mod severity;
pub mod system;
