use std::io;
use std::path::PathBuf;

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("template file '{}' not found", path.display())]
    TemplateMissing { path: PathBuf },

    #[error("failed to read template '{}': {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write dashboard to '{}': {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not resolve an IP address for host '{host}': {reason}")]
    HostResolution { host: String, reason: String },

    #[error("home directory could not be determined")]
    HomeDirUnavailable,
}

impl DashboardError {
    /// Whether the scheduler may skip the current cycle and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DashboardError::TemplateMissing { .. })
    }
}
