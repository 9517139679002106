//! Constant-product AMM math.
//!
//! A fixed slippage haircut is applied to the input side of every trade; it
//! models execution cost lost to price impact, not a fee the pool retains.
//! `buy` and `sell` hold `k` constant; only `add_liquidity` rebases it.

use afx_core::LpPoolState;
use afx_core::constants::AMM_SLIPPAGE;
use rust_decimal::Decimal;

/// Result of buying AF with USDC.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyResult {
    /// AF taken out of the pool.
    pub af_received: Decimal,
    pub new_pool: LpPoolState,
    /// Signed relative price move: (new - old) / old. Zero if the pool had
    /// no price.
    pub price_impact: Decimal,
    /// Effective fill price: effective input / AF received.
    pub effective_price: Decimal,
}

/// Result of selling AF for USDC.
#[derive(Debug, Clone, PartialEq)]
pub struct SellResult {
    /// USDC proceeds after the slippage haircut.
    pub usdc_received: Decimal,
    pub new_pool: LpPoolState,
    pub price_impact: Decimal,
    pub effective_price: Decimal,
}

/// Spot price of AF in USDC. Zero for a drained pool: a zero-token pool is
/// a degenerate terminal state, not an error.
pub fn spot_price(pool: &LpPoolState) -> Decimal {
    if pool.af_balance <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    pool.usdc_balance / pool.af_balance
}

/// Buy AF with `usdc_in` USDC.
///
/// effective input = usdc_in x (1 - slippage); the pool's `k` is unchanged.
/// Degenerate inputs are the caller's responsibility to filter; guarded
/// divisions degrade to zero instead of panicking.
pub fn buy(usdc_in: Decimal, pool: &LpPoolState) -> BuyResult {
    let effective_usdc = usdc_in * (Decimal::ONE - AMM_SLIPPAGE);

    // (usdc + effective_usdc) * (af - af_out) = k
    let new_usdc_balance = pool.usdc_balance + effective_usdc;
    let new_af_balance = if new_usdc_balance > Decimal::ZERO {
        pool.k / new_usdc_balance
    } else {
        Decimal::ZERO
    };
    let af_received = pool.af_balance - new_af_balance;

    let old_price = spot_price(pool);
    let new_pool = LpPoolState {
        usdc_balance: new_usdc_balance,
        af_balance: new_af_balance,
        af_price: if new_af_balance > Decimal::ZERO {
            new_usdc_balance / new_af_balance
        } else {
            Decimal::ZERO
        },
        k: pool.k,
    };

    BuyResult {
        af_received,
        price_impact: relative_move(old_price, new_pool.af_price),
        effective_price: if af_received > Decimal::ZERO {
            effective_usdc / af_received
        } else {
            Decimal::ZERO
        },
        new_pool,
    }
}

/// Sell `af_in` AF for USDC. Symmetric to `buy`: the haircut lands on the
/// USDC proceeds.
pub fn sell(af_in: Decimal, pool: &LpPoolState) -> SellResult {
    // (usdc - usdc_out) * (af + af_in) = k
    let new_af_balance = pool.af_balance + af_in;
    let new_usdc_balance = if new_af_balance > Decimal::ZERO {
        pool.k / new_af_balance
    } else {
        Decimal::ZERO
    };
    let usdc_out = pool.usdc_balance - new_usdc_balance;
    let usdc_received = usdc_out * (Decimal::ONE - AMM_SLIPPAGE);

    let old_price = spot_price(pool);
    let new_pool = LpPoolState {
        usdc_balance: new_usdc_balance,
        af_balance: new_af_balance,
        af_price: if new_af_balance > Decimal::ZERO {
            new_usdc_balance / new_af_balance
        } else {
            Decimal::ZERO
        },
        k: pool.k,
    };

    SellResult {
        usdc_received,
        price_impact: relative_move(old_price, new_pool.af_price),
        effective_price: if af_in > Decimal::ZERO {
            usdc_received / af_in
        } else {
            Decimal::ZERO
        },
        new_pool,
    }
}

/// Add liquidity to both sides of the pool.
///
/// Both reserves increase by the raw inputs (no slippage) and `k` is rebased
/// to the new product: price continuity is determined by the ratio of the
/// injected amounts, not by the trade formula.
pub fn add_liquidity(usdc_in: Decimal, af_in: Decimal, pool: &LpPoolState) -> LpPoolState {
    let new_usdc_balance = pool.usdc_balance + usdc_in;
    let new_af_balance = pool.af_balance + af_in;

    LpPoolState {
        usdc_balance: new_usdc_balance,
        af_balance: new_af_balance,
        af_price: if new_af_balance > Decimal::ZERO {
            new_usdc_balance / new_af_balance
        } else {
            Decimal::ZERO
        },
        k: new_usdc_balance * new_af_balance,
    }
}

fn relative_move(old_price: Decimal, new_price: Decimal) -> Decimal {
    if old_price > Decimal::ZERO {
        (new_price - old_price) / old_price
    } else {
        Decimal::ZERO
    }
}
