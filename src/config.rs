use crate::error::{DecipherError, DfResult};
use clap::Args;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// How the initial mapping orders the distinct ciphertext symbols before
/// pairing them with the alphabet.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, EnumIter, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InitStrategy {
    /// Most frequent ciphertext symbol first (ties by code point).
    #[default]
    Frequency,
    /// Code point order.
    Lexicographic,
}

#[derive(Args, Debug, Clone, Default)]
pub struct Config {
    #[command(flatten)]
    pub engine: EngineParams,
    #[command(flatten)]
    pub search: SearchParams,
}

impl Config {
    pub fn validate(&self) -> DfResult<()> {
        self.engine.validate()?;
        self.search.validate()
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct EngineParams {
    /// Multiplier on the score difference in the stochastic acceptance test
    #[arg(long, default_value_t = 1.0)]
    pub scaling_factor: f64,

    /// Disable stochastic acceptance of worse moves (greedy hill climbing)
    #[arg(long, default_value_t = false)]
    pub broken: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            scaling_factor: 1.0,
            broken: false,
        }
    }
}

impl EngineParams {
    pub fn validate(&self) -> DfResult<()> {
        if !self.scaling_factor.is_finite() || self.scaling_factor < 0.0 {
            return Err(DecipherError::Config(format!(
                "--scaling-factor must be a finite non-negative number, got {}",
                self.scaling_factor
            )));
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    #[arg(long, default_value_t = 5_000)]
    pub steps: usize,

    /// Stop after this many steps without a new best score (0 disables)
    #[arg(long, default_value_t = 1_000)]
    pub early_stop: usize,

    /// Log the current decryption every N steps (0 disables)
    #[arg(long, default_value_t = 0)]
    pub report_every: usize,

    /// Number of plaintext symbols shown in progress lines
    #[arg(long, default_value_t = 100)]
    pub preview_len: usize,

    /// Independent chains to run; the best one wins
    #[arg(long, default_value_t = 1)]
    pub restarts: usize,

    #[arg(long, default_value_t = InitStrategy::Frequency)]
    pub init: InitStrategy,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            steps: 5_000,
            early_stop: 1_000,
            report_every: 0,
            preview_len: 100,
            restarts: 1,
            init: InitStrategy::Frequency,
            seed: None,
        }
    }
}

impl SearchParams {
    pub fn validate(&self) -> DfResult<()> {
        if self.restarts == 0 {
            return Err(DecipherError::Config(
                "--restarts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
