use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::BrokerLevel;
use crate::entities::pool::LpPoolState;

/// One simulated trade's inputs and outputs. Append-only; never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: Uuid,
    pub order_id: Uuid,
    pub day: u32,
    pub trading_fund_used: Decimal,
    pub gross_profit: Decimal,
    pub trading_fee: Decimal,
    pub net_profit: Decimal,
    pub user_profit: Decimal,
    pub platform_profit: Decimal,
    pub broker_profit: Decimal,
    /// AF consumed to pay the trading fee, at the day's price.
    pub af_consumed: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// One (level, layer) reward line for a single day's emission.
///
/// `usdc_earned` and `promotion_reward` are placeholders populated by the
/// separate promotion computation, not by the layer-release mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerReward {
    pub level: BrokerLevel,
    pub layer: u32,
    pub af_released: Decimal,
    pub usdc_earned: Decimal,
    pub promotion_reward: Decimal,
}

/// The one-per-day summary record. Immutable once appended; ordered by day
/// ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReleaseRecord {
    pub day: u32,
    pub total_af_released: Decimal,
    pub af_to_market: Decimal,
    pub af_burned: Decimal,
    pub af_to_trading_fee: Decimal,
    pub af_to_trading_fund: Decimal,
    /// Pool state after all of this day's mutations.
    pub lp_pool_state: LpPoolState,
    pub forex_reserve: Decimal,
    pub total_buyback: Decimal,
}
