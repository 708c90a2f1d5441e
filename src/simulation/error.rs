//! Simulation request errors.

/// Errors that can occur while running a simulation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// The backend answered but reported a failure.
    #[error("Simulation failed ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// The backend could not be reached.
    #[error("Simulation backend unreachable: {0}")]
    Transport(String),

    /// The backend answered with something that is not a valid result.
    #[error("Malformed simulation response: {0}")]
    Malformed(String),

    #[error("Load a model file first")]
    NoModel,

    #[error("A simulation is already running")]
    Busy,
}

impl SimulationError {
    /// Message shown to the user in the status line.
    ///
    /// Upstream and transport failures read the same way to the user;
    /// the distinction only matters in the log.
    pub fn user_message(&self) -> String {
        match self {
            Self::Upstream { message, .. } => format!("Simulation failed: {}", message),
            Self::Transport(_) | Self::Malformed(_) => format!("Simulation failed: {}", self),
            Self::NoModel | Self::Busy => self.to_string(),
        }
    }
}
