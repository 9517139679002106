//! Single-trade profit/fee arithmetic and per-order daily trade batching.

use afx_core::constants::TRADES_PER_DAY;
use afx_core::{LpPoolState, StakingOrder, SystemConfig};
use rust_decimal::Decimal;

/// Full breakdown of one simulated trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOutcome {
    pub gross_profit: Decimal,
    pub trading_fee: Decimal,
    pub net_profit: Decimal,
    pub user_profit: Decimal,
    pub platform_profit: Decimal,
    pub broker_profit: Decimal,
    /// AF consumed to pay the trading fee at the current price.
    pub af_consumed_for_fee: Decimal,
    /// USDC contributed to the LP pool.
    pub lp_usdc: Decimal,
    /// AF contributed to the LP pool, converted at the current price.
    pub lp_af: Decimal,
    /// USDC volume earmarked for buyback.
    pub buyback_amount: Decimal,
    /// USDC accrued to the forex reserve.
    pub forex_reserve: Decimal,
}

/// Aggregated result of one order's daily trade batch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailyTradeBatch {
    /// Per-trade breakdowns, in execution order.
    pub trades: Vec<TradeOutcome>,
    /// Equal trading-fund slice used by each trade.
    pub trading_fund_per_trade: Decimal,
    pub total_user_profit: Decimal,
    pub total_platform_profit: Decimal,
    pub total_broker_profit: Decimal,
    pub total_af_consumed: Decimal,
    pub total_lp_usdc: Decimal,
    pub total_lp_af: Decimal,
    pub total_buyback: Decimal,
    pub total_forex_reserve: Decimal,
}

/// Compute one trade's profit, fee and fund-flow breakdown.
///
/// The four fund-flow ratios apply to the full trading-fund slice, not to
/// the profit; they are independent inputs and the unallocated remainder is
/// implicitly retained.
pub fn execute(
    trading_fund: Decimal,
    profit_rate: Decimal,
    trading_fee_rate: Decimal,
    profit_share_ratio: Decimal,
    config: &SystemConfig,
    af_price: Decimal,
) -> TradeOutcome {
    let gross_profit = trading_fund * profit_rate;
    let trading_fee = gross_profit * trading_fee_rate;
    let net_profit = gross_profit - trading_fee;

    let user_profit = net_profit * profit_share_ratio;
    let remaining_profit = net_profit - user_profit;

    let split = &config.trade_profit_distribution;
    let platform_profit = remaining_profit * split.platform_ratio;
    let broker_profit = remaining_profit * split.broker_ratio;

    let af_consumed_for_fee = if af_price > Decimal::ZERO {
        trading_fee / af_price
    } else {
        Decimal::ZERO
    };

    let flow = &config.trade_fund_flow;
    let lp_af = if af_price > Decimal::ZERO {
        (trading_fund * flow.lp_af_ratio) / af_price
    } else {
        Decimal::ZERO
    };

    TradeOutcome {
        gross_profit,
        trading_fee,
        net_profit,
        user_profit,
        platform_profit,
        broker_profit,
        af_consumed_for_fee,
        lp_usdc: trading_fund * flow.lp_usdc_ratio,
        lp_af,
        buyback_amount: trading_fund * flow.buyback_ratio,
        forex_reserve: trading_fund * flow.forex_reserve_ratio,
    }
}

/// Simulate one order's daily trade batch: the trading fund is split into
/// `TRADES_PER_DAY` equal slices, each run at `daily_profit_rate /
/// TRADES_PER_DAY`, and all fields are summed across the batch.
///
/// Every trade in the batch prices against the pool state the batch was
/// handed; within-day price drift happens between orders, not between an
/// order's own trades.
pub fn simulate_daily_batch(
    order: &StakingOrder,
    config: &SystemConfig,
    pool: &LpPoolState,
    daily_profit_rate: Decimal,
) -> DailyTradeBatch {
    let Some(tier_config) = config.tier_config(order.tier) else {
        return DailyTradeBatch::default();
    };

    let trades_per_day = Decimal::from(TRADES_PER_DAY);
    let trading_fund_per_trade = order.trading_fund / trades_per_day;
    let per_trade_rate = daily_profit_rate / trades_per_day;

    let mut batch = DailyTradeBatch {
        trading_fund_per_trade,
        ..DailyTradeBatch::default()
    };

    for _ in 0..TRADES_PER_DAY {
        let outcome = execute(
            trading_fund_per_trade,
            per_trade_rate,
            tier_config.trading_fee_rate,
            tier_config.profit_share_ratio,
            config,
            pool.af_price,
        );

        batch.total_user_profit += outcome.user_profit;
        batch.total_platform_profit += outcome.platform_profit;
        batch.total_broker_profit += outcome.broker_profit;
        batch.total_af_consumed += outcome.af_consumed_for_fee;
        batch.total_lp_usdc += outcome.lp_usdc;
        batch.total_lp_af += outcome.lp_af;
        batch.total_buyback += outcome.buyback_amount;
        batch.total_forex_reserve += outcome.forex_reserve;
        batch.trades.push(outcome);
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use afx_core::config::default_tier_configs;
    use rust_decimal_macros::dec;

    #[test]
    fn test_trade_split_scenario() {
        // fund 100, profit 2%, fee 5%, share 70%, platform/broker 50/50
        let config = SystemConfig::default();
        let outcome = execute(dec!(100), dec!(0.02), dec!(0.05), dec!(0.70), &config, dec!(5));

        assert_eq!(outcome.gross_profit, dec!(2));
        assert_eq!(outcome.trading_fee, dec!(0.1));
        assert_eq!(outcome.net_profit, dec!(1.9));
        assert_eq!(outcome.user_profit, dec!(1.33));
        assert_eq!(outcome.platform_profit, dec!(0.285));
        assert_eq!(outcome.broker_profit, dec!(0.285));
        assert_eq!(outcome.af_consumed_for_fee, dec!(0.02));
    }

    #[test]
    fn test_fund_flow_uses_full_fund_slice() {
        let config = SystemConfig::default();
        let outcome = execute(dec!(100), dec!(0.02), dec!(0.05), dec!(0.70), &config, dec!(5));

        // 0.30 / 0.30 / 0.20 / 0.50 of the slice, lp_af converted at price 5
        assert_eq!(outcome.lp_usdc, dec!(30));
        assert_eq!(outcome.lp_af, dec!(6));
        assert_eq!(outcome.buyback_amount, dec!(20));
        assert_eq!(outcome.forex_reserve, dec!(50));
    }

    #[test]
    fn test_zero_price_guards_divisions() {
        let config = SystemConfig::default();
        let outcome = execute(
            dec!(100),
            dec!(0.02),
            dec!(0.05),
            dec!(0.70),
            &config,
            Decimal::ZERO,
        );

        assert_eq!(outcome.af_consumed_for_fee, Decimal::ZERO);
        assert_eq!(outcome.lp_af, Decimal::ZERO);
        // USDC-side flows are unaffected
        assert_eq!(outcome.lp_usdc, dec!(30));
    }

    #[test]
    fn test_daily_batch_totals() {
        let config = SystemConfig::default();
        let tiers = default_tier_configs();
        let tier = tiers.iter().find(|t| t.tier == 1000).unwrap();
        let order = StakingOrder::new(dec!(1000), tier, 30);
        let pool = LpPoolState::default();

        let batch = simulate_daily_batch(&order, &config, &pool, dec!(0.02));

        assert_eq!(batch.trades.len(), 10);
        // fund 3000 split into 10 slices of 300
        assert_eq!(batch.trading_fund_per_trade, dec!(300));
        // gross per trade = 300 * 0.002 = 0.6; total gross = 6
        let total_gross: Decimal = batch.trades.iter().map(|t| t.gross_profit).sum();
        assert_eq!(total_gross, dec!(6));
        // fee 5%: net = 6 * 0.95 = 5.7; user 70% = 3.99
        assert_eq!(batch.total_user_profit, dec!(3.99));
        // platform/broker split the rest evenly
        assert_eq!(batch.total_platform_profit, dec!(0.855));
        assert_eq!(batch.total_broker_profit, dec!(0.855));
        // fund flow over the full 3000: 900 / 180 AF / 600 / 1500
        assert_eq!(batch.total_lp_usdc, dec!(900));
        assert_eq!(batch.total_lp_af, dec!(180));
        assert_eq!(batch.total_buyback, dec!(600));
        assert_eq!(batch.total_forex_reserve, dec!(1500));
    }

    #[test]
    fn test_unmatched_tier_yields_empty_batch() {
        let mut config = SystemConfig::default();
        let tiers = default_tier_configs();
        let tier = tiers.iter().find(|t| t.tier == 1000).unwrap();
        let order = StakingOrder::new(dec!(1000), tier, 30);
        config.tier_configs.clear();

        let batch = simulate_daily_batch(&order, &config, &LpPoolState::default(), dec!(0.02));

        assert!(batch.trades.is_empty());
        assert_eq!(batch.total_user_profit, Decimal::ZERO);
        assert_eq!(batch.total_buyback, Decimal::ZERO);
    }
}
