use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// State of the constant-product LP pool pricing AF against USDC.
///
/// Owned exclusively by the orchestrator during a simulation step; the AMM
/// engine reads it and returns new states rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LpPoolState {
    /// USDC reserve.
    pub usdc_balance: Decimal,

    /// AF token reserve.
    pub af_balance: Decimal,

    /// Spot price derived at the last state change (usdc / af).
    pub af_price: Decimal,

    /// Constant product at the last rebase. Held constant by buy/sell,
    /// rebased by liquidity addition.
    pub k: Decimal,
}

impl LpPoolState {
    /// Create a pool from reserves, deriving price and k.
    pub fn from_reserves(usdc_balance: Decimal, af_balance: Decimal) -> Self {
        let af_price = if af_balance > Decimal::ZERO {
            usdc_balance / af_balance
        } else {
            Decimal::ZERO
        };
        Self {
            usdc_balance,
            af_balance,
            af_price,
            k: usdc_balance * af_balance,
        }
    }

    /// A pool with no AF reserve cannot be sold into and is treated as a
    /// terminal simulation state.
    pub fn is_drained(&self) -> bool {
        self.af_balance <= Decimal::ZERO
    }
}

impl Default for LpPoolState {
    fn default() -> Self {
        Self::from_reserves(dec!(500000), dec!(100000))
    }
}
