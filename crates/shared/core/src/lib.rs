//! AFx Core Domain
//!
//! Pure domain types for the AFx token-economy simulator.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod config;
pub mod constants;
pub mod entities;
pub mod error;

// Re-export commonly used types at crate root
pub use config::{
    AfExitConfig, AfReleaseChoice, BrokerConfig, BrokerLevel, ReleaseMode, StakingPeriod,
    SystemConfig, TierConfig, TradeFundFlow, TradeProfitDistribution,
};
pub use entities::{
    BrokerReward, DailyReleaseRecord, LpPoolState, OrderStatus, StakingOrder, TradeRecord,
};
pub use error::ConfigError;
