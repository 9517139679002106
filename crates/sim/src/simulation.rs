//! The caller-held simulation context.
//!
//! One `Simulation` value owns the full timeline state: config, pool,
//! orders, histories and running totals. There is no ambient singleton;
//! every engine call receives state explicitly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use afx_core::constants::{DEFAULT_DAILY_PROFIT_RATE, UNBOUNDED_STAKING_DAYS};
use afx_core::{
    BrokerConfig, BrokerLevel, BrokerReward, ConfigError, DailyReleaseRecord, LpPoolState,
    StakingOrder, SystemConfig, TierConfig, TradeRecord,
};
use afx_engine::amm;

use crate::orchestrator;
use crate::prediction::{self, ReturnPrediction};

/// Cumulative statistics across the whole timeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationStats {
    pub total_staked: Decimal,
    pub total_af_released: Decimal,
    pub total_af_burned: Decimal,
    pub total_user_profit: Decimal,
    pub total_platform_profit: Decimal,
    pub total_broker_profit: Decimal,
    pub total_forex_reserve: Decimal,
}

/// Single-timeline simulation state. Day N is materialized; the only
/// transition is "advance to day N+1".
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SystemConfig,
    pool: LpPoolState,
    orders: Vec<StakingOrder>,
    trade_records: Vec<TradeRecord>,
    broker_rewards: Vec<BrokerReward>,
    daily_records: Vec<DailyReleaseRecord>,
    current_day: u32,
    stats: SimulationStats,
}

impl Simulation {
    /// Fresh simulation at day 0 with default config and pool.
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    /// Fresh simulation with a caller-supplied (already validated) config.
    pub fn with_config(config: SystemConfig) -> Self {
        Self {
            config,
            pool: LpPoolState::default(),
            orders: Vec::new(),
            trade_records: Vec::new(),
            broker_rewards: Vec::new(),
            daily_records: Vec::new(),
            current_day: 0,
            stats: SimulationStats::default(),
        }
    }

    pub(crate) fn from_parts(
        config: SystemConfig,
        pool: LpPoolState,
        orders: Vec<StakingOrder>,
        trade_records: Vec<TradeRecord>,
        broker_rewards: Vec<BrokerReward>,
        daily_records: Vec<DailyReleaseRecord>,
        current_day: u32,
        stats: SimulationStats,
    ) -> Self {
        Self {
            config,
            pool,
            orders,
            trade_records,
            broker_rewards,
            daily_records,
            current_day,
            stats,
        }
    }

    // ==================== configuration ====================

    /// Replace the whole configuration. Rejected (state unchanged) if the
    /// new config violates the documented bounds.
    pub fn set_config(&mut self, config: SystemConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Replace one tier row wholesale. Unknown tiers are rejected.
    pub fn update_tier_config(&mut self, tier_config: TierConfig) -> Result<(), ConfigError> {
        let mut candidate = self.config.clone();
        let Some(slot) = candidate.tier_configs.iter_mut().find(|t| t.tier == tier_config.tier)
        else {
            return Err(ConfigError::UnknownTier(tier_config.tier));
        };
        *slot = tier_config;
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    /// Replace one broker row wholesale, keyed by level. Unknown levels are
    /// rejected.
    pub fn update_broker_config(&mut self, broker_config: BrokerConfig) -> Result<(), ConfigError> {
        let mut candidate = self.config.clone();
        let Some(slot) = candidate
            .broker_configs
            .iter_mut()
            .find(|b| b.level == broker_config.level)
        else {
            return Err(ConfigError::UnknownBrokerLevel(broker_config.level));
        };
        *slot = broker_config;
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    /// Reset config to defaults, leaving timeline state alone.
    pub fn reset_config(&mut self) {
        self.config = SystemConfig::default();
    }

    // ==================== staking ====================

    /// Create a staking order for `tier` with `principal` USDC. Returns the
    /// new order's id, or `None` for an unknown tier.
    pub fn create_order(&mut self, tier: u32, principal: Decimal) -> Option<Uuid> {
        let tier_config = self.config.tier_config(tier)?;

        let staking_days = if self.config.staking_period.enabled {
            self.config.staking_period.days
        } else {
            UNBOUNDED_STAKING_DAYS
        };

        let order = StakingOrder::new(principal, tier_config, staking_days);
        let id = order.id;

        log::info!(
            "Created order {} (tier {}, principal {}, {} days)",
            id,
            tier,
            principal,
            staking_days
        );

        self.stats.total_staked += principal;
        self.orders.push(order);
        Some(id)
    }

    /// Remove an order and release its principal from the staked total.
    pub fn remove_order(&mut self, order_id: Uuid) -> bool {
        let Some(index) = self.orders.iter().position(|o| o.id == order_id) else {
            return false;
        };
        let order = self.orders.remove(index);
        self.stats.total_staked -= order.principal;
        true
    }

    pub fn clear_orders(&mut self) {
        self.orders.clear();
        self.stats.total_staked = Decimal::ZERO;
    }

    // ==================== timeline ====================

    /// Advance one day at the default daily profit rate.
    pub fn advance_one_day(&mut self) {
        self.advance_one_day_with_rate(DEFAULT_DAILY_PROFIT_RATE);
    }

    /// Advance one day. A day with zero active orders is a no-op, not an
    /// error.
    pub fn advance_one_day_with_rate(&mut self, daily_profit_rate: Decimal) {
        if !self.orders.iter().any(StakingOrder::is_active) {
            log::debug!("Day {} advance skipped: no active orders", self.current_day);
            return;
        }

        let new_day = self.current_day + 1;
        let outcome = orchestrator::advance_day(
            &self.orders,
            &self.config,
            &self.pool,
            new_day,
            daily_profit_rate,
        );

        self.orders = outcome.updated_orders;
        self.pool = outcome.updated_pool;
        self.broker_rewards.extend(outcome.broker_rewards);
        self.trade_records.extend(outcome.trade_records);

        self.stats.total_af_released += outcome.record.total_af_released;
        self.stats.total_af_burned += outcome.record.af_burned;
        self.stats.total_forex_reserve += outcome.record.forex_reserve;
        self.stats.total_user_profit += outcome.total_user_profit;
        self.stats.total_platform_profit += outcome.total_platform_profit;
        self.stats.total_broker_profit += outcome.total_broker_profit;

        log::info!(
            "Day {}: released {} AF, burned {}, pool price {}",
            new_day,
            outcome.record.total_af_released,
            outcome.record.af_burned,
            outcome.record.lp_pool_state.af_price
        );

        self.daily_records.push(outcome.record);
        self.current_day = new_day;
    }

    /// N sequential single-day advances; each day's outcome is a pure
    /// function of the previous day's end state.
    pub fn advance_days(&mut self, days: u32) {
        self.advance_days_with_rate(days, DEFAULT_DAILY_PROFIT_RATE);
    }

    pub fn advance_days_with_rate(&mut self, days: u32, daily_profit_rate: Decimal) {
        for _ in 0..days {
            self.advance_one_day_with_rate(daily_profit_rate);
        }
    }

    /// Reset the timeline: pool, orders, histories and stats return to
    /// defaults; the config is retained.
    pub fn reset(&mut self) {
        self.pool = LpPoolState::default();
        self.orders.clear();
        self.trade_records.clear();
        self.broker_rewards.clear();
        self.daily_records.clear();
        self.current_day = 0;
        self.stats = SimulationStats::default();
    }

    // ==================== pool entry points ====================

    /// Buy AF against the pool with `usdc_amount`, returning the AF
    /// received.
    pub fn buy(&mut self, usdc_amount: Decimal) -> Decimal {
        let result = amm::buy(usdc_amount, &self.pool);
        self.pool = result.new_pool;
        result.af_received
    }

    /// Sell `af_amount` AF into the pool, returning the USDC proceeds.
    pub fn sell(&mut self, af_amount: Decimal) -> Decimal {
        let result = amm::sell(af_amount, &self.pool);
        self.pool = result.new_pool;
        result.usdc_received
    }

    // ==================== read-only snapshots ====================

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn pool(&self) -> &LpPoolState {
        &self.pool
    }

    pub fn orders(&self) -> &[StakingOrder] {
        &self.orders
    }

    pub fn trade_records(&self) -> &[TradeRecord] {
        &self.trade_records
    }

    pub fn broker_rewards(&self) -> &[BrokerReward] {
        &self.broker_rewards
    }

    pub fn daily_records(&self) -> &[DailyReleaseRecord] {
        &self.daily_records
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn tier_config(&self, tier: u32) -> Option<&TierConfig> {
        self.config.tier_config(tier)
    }

    pub fn broker_config(&self, level: BrokerLevel) -> Option<&BrokerConfig> {
        self.config.broker_config(level)
    }

    /// Project returns for a prospective stake at the current pool price.
    pub fn predict_returns(&self, principal: Decimal, tier: u32, days: u32) -> ReturnPrediction {
        prediction::predict_returns(principal, tier, &self.config, &self.pool, days)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
