use thiserror::Error;

use crate::models::PlayerId;

/// Errors raised by the simulation engine.
///
/// Every variant describes malformed caller input. The engine performs no I/O,
/// so nothing here is transient or worth retrying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A weighted draw received weights that are empty, negative, non-finite
    /// or sum to zero.
    #[error("Invalid weights: total {total}")]
    InvalidWeights { total: f64 },

    /// A lineup cannot put four valid players on the ice.
    #[error("Degenerate roster: {0}")]
    DegenerateRoster(String),

    /// A rating was requested for a player with zero energy.
    #[error("Non-positive energy for player {player}")]
    NonPositiveEnergy { player: PlayerId },

    /// Lineup bias must lie in [0, 1].
    #[error("Invalid line bias: {0}")]
    InvalidBias(f64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SimError {
    /// Whether the error stems from caller input rather than engine state.
    ///
    /// Every current variant does. Hosts branch on this instead of matching
    /// variants, so a future runtime variant only has to return `false` here.
    pub fn is_configuration(&self) -> bool {
        match self {
            SimError::InvalidWeights { .. }
            | SimError::DegenerateRoster(_)
            | SimError::NonPositiveEnergy { .. }
            | SimError::InvalidBias(_)
            | SimError::InvalidConfig(_) => true,
        }
    }

    pub(crate) fn roster(msg: impl Into<String>) -> Self {
        SimError::DegenerateRoster(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
