//! # Engine Configuration
//!
//! Tuning constants for play resolution and the shape of a game.
//!
//! ```rust
//! use rink_core::engine::config::{EngineConfig, GameRules};
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! let rules = GameRules::default();
//! assert!(arcade.save_bias < config.save_bias);
//! assert_eq!(rules.num_periods, 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Play resolution parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds consumed by one play (default: 10)
    pub play_length: u32,
    /// Added to the goaltender's stopping weight in the shot contest (default: 300)
    pub save_bias: u32,
    /// Scale applied to a goaltender's passing weight when choosing the passer (default: 0.5)
    pub goaltender_pass_factor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { play_length: 10, save_bias: 300, goaltender_pass_factor: 0.5 }
    }
}

impl EngineConfig {
    pub fn standard() -> Self {
        Self::default()
    }

    /// More goals.
    pub fn arcade() -> Self {
        Self { save_bias: 150, ..Self::default() }
    }

    /// Fewer goals.
    pub fn defensive() -> Self {
        Self { save_bias: 450, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.play_length == 0 {
            return Err(SimError::InvalidConfig("play_length must be positive".into()));
        }
        if !self.goaltender_pass_factor.is_finite() || self.goaltender_pass_factor < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "goaltender_pass_factor must be a non-negative number, got {}",
                self.goaltender_pass_factor
            )));
        }
        Ok(())
    }
}

/// Shape of a game: regulation periods and whether ties go to overtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Seconds per period (default: 1200)
    pub period_length: u32,
    /// Regulation periods (default: 3)
    pub num_periods: u32,
    /// Play sudden-death periods until a tie is broken (default: true)
    pub overtime: bool,
}

impl Default for GameRules {
    fn default() -> Self {
        Self { period_length: 1200, num_periods: 3, overtime: true }
    }
}

impl GameRules {
    pub fn new(period_length: u32, num_periods: u32, overtime: bool) -> Self {
        Self { period_length, num_periods, overtime }
    }

    pub fn validate(&self) -> Result<()> {
        if self.period_length == 0 {
            return Err(SimError::InvalidConfig("period_length must be positive".into()));
        }
        if self.num_periods == 0 {
            return Err(SimError::InvalidConfig("num_periods must be positive".into()));
        }
        Ok(())
    }
}
