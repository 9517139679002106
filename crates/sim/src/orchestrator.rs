//! Daily orchestration: one day-advance over all staking orders.
//!
//! The shared pool is threaded sequentially through every order's
//! contribution: each order sees the pool as mutated by the orders before it.
//! Within-day price drift is therefore order-dependent by design, and the
//! iteration order of `orders` is part of the contract.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use afx_core::constants::BUYBACK_BURN_RATIO;
use afx_core::{
    BrokerReward, DailyReleaseRecord, LpPoolState, OrderStatus, StakingOrder, SystemConfig,
    TradeRecord,
};
use afx_engine::release::EmissionDistribution;
use afx_engine::trade::DailyTradeBatch;
use afx_engine::{amm, broker, release, trade};

/// Everything one order produced for one simulated day.
#[derive(Debug, Clone)]
pub struct OrderDayResult {
    pub updated_order: StakingOrder,
    pub daily_af_release: Decimal,
    pub distribution: EmissionDistribution,
    pub trade_batch: DailyTradeBatch,
    pub broker_rewards: Vec<BrokerReward>,
}

/// Aggregate outcome of one day-advance.
#[derive(Debug, Clone)]
pub struct DayOutcome {
    pub updated_orders: Vec<StakingOrder>,
    pub updated_pool: LpPoolState,
    pub record: DailyReleaseRecord,
    /// Layer rewards summed across all orders, sorted by layer.
    pub broker_rewards: Vec<BrokerReward>,
    /// Per-trade records for the whole day, in execution order.
    pub trade_records: Vec<TradeRecord>,
    pub total_user_profit: Decimal,
    pub total_platform_profit: Decimal,
    pub total_broker_profit: Decimal,
}

/// Run one order through the release, trade and broker engines against the
/// current shared pool. Pure with respect to the pool: the caller applies
/// the returned contributions.
pub fn process_order_day(
    order: &StakingOrder,
    config: &SystemConfig,
    pool: &LpPoolState,
    daily_profit_rate: Decimal,
) -> OrderDayResult {
    let daily_af_release = release::daily_emission(order, config, pool.af_price);
    let distribution = release::distribute(daily_af_release, config);
    let trade_batch = trade::simulate_daily_batch(order, config, pool, daily_profit_rate);
    let broker_rewards = broker::layer_rewards(daily_af_release, &config.broker_configs);

    let mut updated_order = order.clone();
    updated_order.af_released += daily_af_release;
    updated_order.current_day += 1;
    if updated_order.current_day >= updated_order.staking_days {
        updated_order.status = OrderStatus::Completed;
    }

    OrderDayResult {
        updated_order,
        daily_af_release,
        distribution,
        trade_batch,
        broker_rewards,
    }
}

/// Advance all orders by one day, producing the day's record tagged with
/// `day`.
///
/// Sequence per active order: emission -> distribution -> trade batch ->
/// LP contribution applied to the shared pool -> buyback (half of the bought
/// AF is burned) -> layer rewards. After the loop, all accumulated to-market
/// emission is sold in one aggregate trade against the final pool.
///
/// Non-active orders pass through unchanged. A malformed or missing tier or
/// broker config degrades that order to zero contribution.
pub fn advance_day(
    orders: &[StakingOrder],
    config: &SystemConfig,
    pool: &LpPoolState,
    day: u32,
    daily_profit_rate: Decimal,
) -> DayOutcome {
    let mut current_pool = pool.clone();

    let mut total_af_released = Decimal::ZERO;
    let mut total_af_to_market = Decimal::ZERO;
    let mut total_af_burned = Decimal::ZERO;
    let mut total_af_to_trading_fee = Decimal::ZERO;
    let mut total_af_to_trading_fund = Decimal::ZERO;
    let mut total_forex_reserve = Decimal::ZERO;
    let mut total_buyback = Decimal::ZERO;
    let mut total_user_profit = Decimal::ZERO;
    let mut total_platform_profit = Decimal::ZERO;
    let mut total_broker_profit = Decimal::ZERO;

    let mut updated_orders = Vec::with_capacity(orders.len());
    let mut all_broker_rewards = Vec::new();
    let mut trade_records = Vec::new();

    for order in orders {
        if !order.is_active() {
            updated_orders.push(order.clone());
            continue;
        }

        let result = process_order_day(order, config, &current_pool, daily_profit_rate);

        total_af_released += result.daily_af_release;
        total_af_to_market += result.distribution.withdraw_to_market;
        total_af_burned += result.distribution.withdraw_burn;
        total_af_to_trading_fee +=
            result.distribution.to_withdraw * config.af_exit_config.keep_as_trading_fee_ratio;
        total_af_to_trading_fund += result.distribution.to_trading_fund;

        let batch = &result.trade_batch;
        total_forex_reserve += batch.total_forex_reserve;
        total_buyback += batch.total_buyback;
        total_user_profit += batch.total_user_profit;
        total_platform_profit += batch.total_platform_profit;
        total_broker_profit += batch.total_broker_profit;

        let timestamp = Utc::now();
        for outcome in &batch.trades {
            trade_records.push(TradeRecord {
                id: Uuid::new_v4(),
                order_id: order.id,
                day,
                trading_fund_used: batch.trading_fund_per_trade,
                gross_profit: outcome.gross_profit,
                trading_fee: outcome.trading_fee,
                net_profit: outcome.net_profit,
                user_profit: outcome.user_profit,
                platform_profit: outcome.platform_profit,
                broker_profit: outcome.broker_profit,
                af_consumed: outcome.af_consumed_for_fee,
                timestamp,
            });
        }

        // Subsequent orders see the pool as mutated by this one.
        current_pool = amm::add_liquidity(batch.total_lp_usdc, batch.total_lp_af, &current_pool);

        // Buyback-then-partial-burn is one atomic step.
        if batch.total_buyback > Decimal::ZERO {
            let buy_result = amm::buy(batch.total_buyback, &current_pool);
            current_pool = buy_result.new_pool;
            total_af_burned += buy_result.af_received * BUYBACK_BURN_RATIO;
        }

        all_broker_rewards.extend(result.broker_rewards);
        updated_orders.push(result.updated_order);
    }

    // One aggregate sale of everything headed to market, against the final
    // pool state.
    if total_af_to_market > Decimal::ZERO {
        let sell_result = amm::sell(total_af_to_market, &current_pool);
        current_pool = sell_result.new_pool;
    }

    let record = DailyReleaseRecord {
        day,
        total_af_released,
        af_to_market: total_af_to_market,
        af_burned: total_af_burned,
        af_to_trading_fee: total_af_to_trading_fee,
        af_to_trading_fund: total_af_to_trading_fund,
        lp_pool_state: current_pool.clone(),
        forex_reserve: total_forex_reserve,
        total_buyback,
    };

    DayOutcome {
        updated_orders,
        updated_pool: current_pool,
        record,
        broker_rewards: broker::aggregate(all_broker_rewards),
        trade_records,
        total_user_profit,
        total_platform_profit,
        total_broker_profit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use afx_core::config::default_tier_configs;
    use rust_decimal_macros::dec;

    fn order(tier: u32, principal: Decimal) -> StakingOrder {
        let tiers = default_tier_configs();
        let tier_config = tiers.iter().find(|t| t.tier == tier).unwrap();
        StakingOrder::new(principal, tier_config, 30)
    }

    #[test]
    fn test_process_order_day_advances_counter() {
        let config = SystemConfig::default();
        let pool = LpPoolState::default();
        let o = order(1000, dec!(1000));

        let result = process_order_day(&o, &config, &pool, dec!(0.02));

        assert_eq!(result.updated_order.current_day, 1);
        assert_eq!(result.updated_order.status, OrderStatus::Active);
        assert_eq!(result.daily_af_release, dec!(1.4));
        assert_eq!(result.updated_order.af_released, dec!(1.4));
        assert_eq!(result.broker_rewards.len(), 20);
    }

    #[test]
    fn test_order_completes_at_staking_days() {
        let config = SystemConfig::default();
        let pool = LpPoolState::default();
        let mut o = order(1000, dec!(1000));
        o.current_day = 29;

        let result = process_order_day(&o, &config, &pool, dec!(0.02));

        assert_eq!(result.updated_order.current_day, 30);
        assert_eq!(result.updated_order.status, OrderStatus::Completed);
    }

    #[test]
    fn test_advance_day_threads_pool_through_orders() {
        let config = SystemConfig::default();
        let pool = LpPoolState::default();
        let orders = vec![order(1000, dec!(1000)), order(1000, dec!(1000))];

        let outcome = advance_day(&orders, &config, &pool, 1, dec!(0.02));

        // Both orders processed, pool mutated, one record produced.
        assert_eq!(outcome.updated_orders.len(), 2);
        assert_ne!(outcome.updated_pool, pool);
        assert_eq!(outcome.record.day, 1);
        // The total is the sum of the per-order releases. The first order
        // emits exactly 1.4; the second prices off the pool the first one
        // already moved up, so the total lands strictly below 2 x 1.4.
        let released_sum: Decimal = outcome
            .updated_orders
            .iter()
            .map(|o| o.af_released)
            .sum();
        assert_eq!(outcome.record.total_af_released, released_sum);
        assert_eq!(outcome.updated_orders[0].af_released, dec!(1.4));
        assert!(outcome.record.total_af_released > dec!(1.4));
        assert!(outcome.record.total_af_released < dec!(2.8));
        // 20 trades total: 10 per order
        assert_eq!(outcome.trade_records.len(), 20);
        // The aggregate matches two identical orders' batches.
        assert_eq!(outcome.total_user_profit, dec!(7.98));
    }

    #[test]
    fn test_second_order_sees_mutated_pool() {
        // The second order's emission is priced off the pool state left by
        // the first order's LP contribution and buyback.
        let config = SystemConfig::default();
        let pool = LpPoolState::default();
        let orders = vec![order(1000, dec!(1000)), order(1000, dec!(1000))];

        let outcome = advance_day(&orders, &config, &pool, 1, dec!(0.02));

        let first = &outcome.updated_orders[0];
        let second = &outcome.updated_orders[1];
        assert_ne!(first.af_released, second.af_released);
    }

    #[test]
    fn test_completed_orders_pass_through() {
        let config = SystemConfig::default();
        let pool = LpPoolState::default();
        let mut o = order(1000, dec!(1000));
        o.status = OrderStatus::Completed;
        o.current_day = 30;

        let outcome = advance_day(&[o.clone()], &config, &pool, 5, dec!(0.02));

        assert_eq!(outcome.updated_orders[0], o);
        assert_eq!(outcome.record.total_af_released, Decimal::ZERO);
        assert_eq!(outcome.updated_pool, pool);
        assert!(outcome.trade_records.is_empty());
    }

    #[test]
    fn test_unmatched_tier_degrades_to_zero_contribution() {
        let mut config = SystemConfig::default();
        config.tier_configs.clear();
        let pool = LpPoolState::default();
        let orders = vec![order(1000, dec!(1000))];

        let outcome = advance_day(&orders, &config, &pool, 1, dec!(0.02));

        // The day still advances the order; it just contributes nothing.
        assert_eq!(outcome.updated_orders[0].current_day, 1);
        assert_eq!(outcome.record.total_af_released, Decimal::ZERO);
        assert_eq!(outcome.updated_pool, pool);
    }

    #[test]
    fn test_buyback_burns_half() {
        let config = SystemConfig::default();
        let pool = LpPoolState::default();
        let orders = vec![order(1000, dec!(1000))];

        let outcome = advance_day(&orders, &config, &pool, 1, dec!(0.02));

        // Burn total = distribution burn + half the buyback AF. With a 600
        // USDC buyback it must exceed the distribution burn alone.
        let distribution_burn = dec!(1.4) * dec!(0.7) * dec!(0.2);
        assert!(outcome.record.af_burned > distribution_burn);
        assert_eq!(outcome.record.total_buyback, dec!(600));
    }
}
