use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::BrokerLevel;

/// Errors raised at the configuration boundary. The simulation engines never
/// raise these; invalid runtime input degrades to zero instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Ratio pair {pair} must sum to 1, got {sum}")]
    RatioPairNotUnit { pair: &'static str, sum: Decimal },

    #[error("Percentage pair {pair} must sum to 100, got {sum}")]
    PercentagePairNotFull { pair: &'static str, sum: Decimal },

    #[error("{field} out of bounds: {value}")]
    RatioOutOfBounds { field: &'static str, value: Decimal },

    #[error("{field} must be between 0 and 100, got {value}")]
    PercentageOutOfBounds { field: &'static str, value: Decimal },

    #[error("{field} must be non-negative, got {value}")]
    NegativeRate { field: &'static str, value: Decimal },

    #[error("Tier {tier} trading fee rate {rate} outside 1%-8%")]
    FeeRateOutOfBounds { tier: u32, rate: Decimal },

    #[error("Staking period must be at least 1 day, got {0}")]
    InvalidStakingPeriod(u32),

    #[error("Duplicate tier config for tier {0}")]
    DuplicateTier(u32),

    #[error("Duplicate broker config for level {0:?}")]
    DuplicateBrokerLevel(BrokerLevel),

    #[error("Broker level {level:?} layer range [{start}, {end}] outside 1..=20")]
    InvalidLayerRange {
        level: BrokerLevel,
        start: u32,
        end: u32,
    },

    #[error("Unknown tier: {0}")]
    UnknownTier(u32),

    #[error("Unknown broker level: {0:?}")]
    UnknownBrokerLevel(BrokerLevel),
}
