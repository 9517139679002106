//! AFx Calculation Engines
//!
//! The deterministic arithmetic core of the simulator:
//! - `amm`: constant-product pool pricing with a fixed slippage haircut
//! - `release`: per-order daily emission and its exit fan-out
//! - `trade`: per-trade profit/fee splits and daily trade batching
//! - `broker`: 20-layer referral reward mapping and aggregation
//!
//! Every function here is pure: state goes in by reference, new state comes
//! out by value. Invalid or missing input degrades to a zero result rather
//! than an error (the configuration boundary validates upfront).

pub mod amm;
pub mod broker;
pub mod release;
pub mod trade;

pub use amm::{BuyResult, SellResult};
pub use release::EmissionDistribution;
pub use trade::{DailyTradeBatch, TradeOutcome};
