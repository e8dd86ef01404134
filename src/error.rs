//! Error taxonomy for dashboard actions.
//!
//! Every variant is terminal for the user action that raised it; nothing
//! here is retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Scan triggered with an empty exchange selection.
    #[error("Please select at least one exchange.")]
    NoExchangeSelected,

    /// Scan triggered while another scan is still running.
    #[error("A scan is already running.")]
    ScanInProgress,

    /// The scanner answered with `status: "error"`.
    #[error("Error: {message}")]
    Scanner { message: String },

    /// The request never produced a response.
    #[error("scanner request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response arrived but was not a scanner payload.
    #[error("unexpected scanner response ({status}): {detail}")]
    Decode { status: u16, detail: String },
}

impl DashboardError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::NoExchangeSelected
            | DashboardError::ScanInProgress
            | DashboardError::Scanner { .. } => self.to_string(),
            DashboardError::Transport(_) | DashboardError::Decode { .. } => {
                "Failed to connect to scanner.".to_string()
            }
        }
    }

    /// Whether the failure happened below the application protocol.
    pub fn is_transport(&self) -> bool {
        matches!(self, DashboardError::Transport(_) | DashboardError::Decode { .. })
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
