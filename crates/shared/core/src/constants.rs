//! System-wide constants shared by every engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fractional haircut applied to the input side of every AMM trade.
/// Modelled as execution cost lost to price impact, not a fee the pool keeps.
pub const AMM_SLIPPAGE: Decimal = dec!(0.03);

/// Total AF minted at genesis.
pub const INITIAL_AF_SUPPLY: Decimal = dec!(10000000);

/// Lower bound on a tier's trading fee rate (1%).
pub const MIN_TRADING_FEE_RATE: Decimal = dec!(0.01);

/// Upper bound on a tier's trading fee rate (8%).
pub const MAX_TRADING_FEE_RATE: Decimal = dec!(0.08);

/// Depth of the broker referral ladder.
pub const MAX_BROKER_LAYERS: u32 = 20;

/// Number of equal-sized trades simulated per order per day.
pub const TRADES_PER_DAY: u32 = 10;

/// Share of buyback tokens that is burned immediately after the buy.
/// Fixed by design; intentionally not part of `TradeFundFlow`.
pub const BUYBACK_BURN_RATIO: Decimal = dec!(0.5);

/// Default daily profit rate applied to an order's trading fund.
pub const DEFAULT_DAILY_PROFIT_RATE: Decimal = dec!(0.02);

/// Staking length used when the staking-period policy is disabled.
pub const UNBOUNDED_STAKING_DAYS: u32 = 365;
