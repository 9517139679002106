use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TierConfig;

/// Lifecycle status of a staking order. Orders transition
/// `Active -> Completed` exactly once and are never resurrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Active,
    Completed,
    Cancelled,
}

/// A user's staking position. Advanced exactly once per simulated day by the
/// orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingOrder {
    pub id: Uuid,

    /// Staking bracket; must match a row in the tier table.
    pub tier: u32,

    /// Staked principal in USDC.
    pub principal: Decimal,

    /// Derived trading fund: principal x tier multiplier.
    pub trading_fund: Decimal,

    /// Cumulative AF released to this order.
    pub af_released: Decimal,

    /// Cumulative AF pending withdrawal.
    pub af_pending: Decimal,

    pub start_date: DateTime<Utc>,

    /// Total staking-period length in days.
    pub staking_days: u32,

    /// Elapsed day counter, advanced by the orchestrator.
    pub current_day: u32,

    /// Profit-share ratio locked in from the tier row at creation.
    pub profit_share_ratio: Decimal,

    pub status: OrderStatus,
}

impl StakingOrder {
    /// Create a new active order, deriving the trading fund and locking in
    /// the tier's profit-share ratio.
    pub fn new(principal: Decimal, tier_config: &TierConfig, staking_days: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            tier: tier_config.tier,
            principal,
            trading_fund: principal * tier_config.trading_fund_multiplier,
            af_released: Decimal::ZERO,
            af_pending: Decimal::ZERO,
            start_date: Utc::now(),
            staking_days,
            current_day: 0,
            profit_share_ratio: tier_config.profit_share_ratio,
            status: OrderStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Active
    }
}
