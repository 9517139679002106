//! Daily AF emission and its exit fan-out.

use afx_core::{ReleaseMode, StakingOrder, SystemConfig};
use rust_decimal::Decimal;

/// Fan-out of one emission amount across the exit paths.
///
/// Invariants: `to_withdraw + to_trading_fund == total emission` and
/// `withdraw_to_market + withdraw_burn == to_withdraw` (both exact, since
/// all four ratios derive from two complementary pairs).
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionDistribution {
    /// Portion the user withdraws.
    pub to_withdraw: Decimal,
    /// Portion converted into trading fund.
    pub to_trading_fund: Decimal,
    /// Withdrawn portion sold into the market.
    pub withdraw_to_market: Decimal,
    /// Withdrawn portion burned.
    pub withdraw_burn: Decimal,
}

/// One order's one-day AF emission at the current price.
///
/// Gold mode releases a fixed currency value converted to AF; coin mode
/// divides principal by price before applying the same rate. Returns zero on
/// an unmatched tier or a non-positive price.
pub fn daily_emission(
    order: &StakingOrder,
    config: &SystemConfig,
    current_price: Decimal,
) -> Decimal {
    let Some(tier_config) = config.tier_config(order.tier) else {
        return Decimal::ZERO;
    };
    if current_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    match config.release_mode {
        ReleaseMode::Gold => {
            let daily_usdc_value = order.principal * tier_config.af_release_rate;
            daily_usdc_value / current_price
        }
        ReleaseMode::Coin => (order.principal / current_price) * tier_config.af_release_rate,
    }
}

/// Split a day's emission by user choice percentages, then split the
/// withdrawn part by the exit ratios.
pub fn distribute(total_emission: Decimal, config: &SystemConfig) -> EmissionDistribution {
    let choice = &config.af_release_choice;
    let exit = &config.af_exit_config;

    let to_withdraw = total_emission * (choice.withdraw_percentage / Decimal::ONE_HUNDRED);
    let to_trading_fund = total_emission * (choice.convert_percentage / Decimal::ONE_HUNDRED);

    EmissionDistribution {
        withdraw_to_market: to_withdraw * exit.withdraw_to_market_ratio,
        withdraw_burn: to_withdraw * exit.withdraw_burn_ratio,
        to_withdraw,
        to_trading_fund,
    }
}
