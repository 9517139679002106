//! Closed-form staking-return projection.
//!
//! Projects emission and trade profit over a horizon at the current pool
//! price, without touching pool state. Intentionally simpler than a real
//! advance: the price is frozen, so this is an estimate, not a replay.

use rust_decimal::Decimal;

use afx_core::constants::DEFAULT_DAILY_PROFIT_RATE;
use afx_core::{LpPoolState, ReleaseMode, SystemConfig};

/// Projected returns for a prospective stake.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReturnPrediction {
    pub total_af_released: Decimal,
    pub total_user_profit: Decimal,
    pub total_trading_fund: Decimal,
    /// AF valued at the frozen price.
    pub estimated_af_value: Decimal,
    /// Total return over principal, as a percentage.
    pub roi: Decimal,
}

/// Predict returns for `principal` staked at `tier` over `days` days.
/// Unknown tiers yield an all-zero prediction.
pub fn predict_returns(
    principal: Decimal,
    tier: u32,
    config: &SystemConfig,
    pool: &LpPoolState,
    days: u32,
) -> ReturnPrediction {
    let Some(tier_config) = config.tier_config(tier) else {
        return ReturnPrediction::default();
    };

    let trading_fund = principal * tier_config.trading_fund_multiplier;
    let current_price = pool.af_price;

    let daily_emission = if current_price > Decimal::ZERO {
        match config.release_mode {
            ReleaseMode::Gold => (principal * tier_config.af_release_rate) / current_price,
            ReleaseMode::Coin => (principal / current_price) * tier_config.af_release_rate,
        }
    } else {
        Decimal::ZERO
    };
    let daily_user_profit =
        trading_fund * DEFAULT_DAILY_PROFIT_RATE * tier_config.profit_share_ratio;

    let days = Decimal::from(days);
    let total_af_released = daily_emission * days;
    let total_user_profit = daily_user_profit * days;

    let estimated_af_value = total_af_released * current_price;
    let roi = if principal > Decimal::ZERO {
        ((estimated_af_value + total_user_profit) / principal) * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    ReturnPrediction {
        total_af_released,
        total_user_profit,
        total_trading_fund: trading_fund,
        estimated_af_value,
        roi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_prediction_gold_mode() {
        let config = SystemConfig::default();
        let pool = LpPoolState::default();

        let prediction = predict_returns(dec!(1000), 1000, &config, &pool, 30);

        // 1.4 AF/day for 30 days at a frozen price of 5
        assert_eq!(prediction.total_af_released, dec!(42));
        assert_eq!(prediction.estimated_af_value, dec!(210));
        assert_eq!(prediction.total_trading_fund, dec!(3000));
        // 3000 * 0.02 * 0.70 = 42/day
        assert_eq!(prediction.total_user_profit, dec!(1260));
        // (210 + 1260) / 1000 * 100
        assert_eq!(prediction.roi, dec!(147.0));
    }

    #[test]
    fn test_prediction_unknown_tier_is_zero() {
        let config = SystemConfig::default();
        let pool = LpPoolState::default();

        let prediction = predict_returns(dec!(1000), 42, &config, &pool, 30);
        assert_eq!(prediction, ReturnPrediction::default());
    }

    #[test]
    fn test_prediction_drained_pool() {
        let config = SystemConfig::default();
        let pool = LpPoolState::from_reserves(dec!(1000), Decimal::ZERO);

        let prediction = predict_returns(dec!(1000), 1000, &config, &pool, 30);
        assert_eq!(prediction.total_af_released, Decimal::ZERO);
        // Trade profit does not depend on the price
        assert!(prediction.total_user_profit > Decimal::ZERO);
    }
}
