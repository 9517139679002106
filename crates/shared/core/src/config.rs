//! System configuration: release mode, tier table, broker table and the
//! ratio pairs that drive every split in the simulation.
//!
//! Configuration is validated once at the boundary (`SystemConfig::validate`);
//! the engines trust whatever they are handed and degrade to zero on lookups
//! that miss.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_BROKER_LAYERS, MAX_TRADING_FEE_RATE, MIN_TRADING_FEE_RATE};
use crate::error::ConfigError;

/// How daily emission is denominated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseMode {
    /// Emission is a fixed currency value, converted to AF at the current
    /// price. Token quantity varies inversely with price.
    Gold,
    /// Emission divides principal by the current price before applying the
    /// tier rate. Same formula shape as gold mode despite the name.
    Coin,
}

impl Default for ReleaseMode {
    fn default() -> Self {
        Self::Gold
    }
}

/// Broker level, ordered lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BrokerLevel {
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
}

/// One row per staking tier. Immutable once created; edits replace the
/// whole row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Tier key: the staking bracket size (100, 500, ...).
    pub tier: u32,

    /// Daily AF release rate.
    pub af_release_rate: Decimal,

    /// Trading fund = principal x this multiplier.
    pub trading_fund_multiplier: Decimal,

    /// Share of net trade profit paid to the user.
    pub profit_share_ratio: Decimal,

    /// Trading fee rate, bounded 1%-8% by validation.
    pub trading_fee_rate: Decimal,
}

/// One row per broker level. The `[layer_start, layer_end]` ranges across all
/// levels are expected to partition 1..=20; the engine does not enforce this
/// and resolves overlaps by first match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerConfig {
    pub level: BrokerLevel,

    /// Share of referral profit paid as promotion reward.
    pub promotion_reward_ratio: Decimal,

    /// First referral layer this level covers (1-based, inclusive).
    pub layer_start: u32,

    /// Last referral layer this level covers (inclusive).
    pub layer_end: u32,

    /// Emission share released to each layer in the range.
    pub layer_release_ratio: Decimal,
}

impl BrokerConfig {
    /// Whether this level's range covers the given layer.
    pub fn covers(&self, layer: u32) -> bool {
        layer >= self.layer_start && layer <= self.layer_end
    }
}

/// Staking period policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingPeriod {
    pub enabled: bool,
    pub days: u32,
}

impl Default for StakingPeriod {
    fn default() -> Self {
        Self {
            enabled: true,
            days: 30,
        }
    }
}

/// Where withdrawn emission goes. `withdraw_to_market_ratio` and
/// `withdraw_burn_ratio` are a complementary pair summing to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AfExitConfig {
    pub withdraw_to_market_ratio: Decimal,
    pub withdraw_burn_ratio: Decimal,
    pub keep_as_trading_fee_ratio: Decimal,
    pub convert_to_trading_fund_ratio: Decimal,
}

impl Default for AfExitConfig {
    fn default() -> Self {
        Self {
            withdraw_to_market_ratio: dec!(0.80),
            withdraw_burn_ratio: dec!(0.20),
            keep_as_trading_fee_ratio: Decimal::ZERO,
            convert_to_trading_fund_ratio: Decimal::ZERO,
        }
    }
}

/// User choice between withdrawing and converting released AF.
/// Percentage-typed pair: must sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AfReleaseChoice {
    pub withdraw_percentage: Decimal,
    pub convert_percentage: Decimal,
}

impl Default for AfReleaseChoice {
    fn default() -> Self {
        Self {
            withdraw_percentage: dec!(70),
            convert_percentage: dec!(30),
        }
    }
}

/// How each trade's full trading-fund slice fans out. These four ratios are
/// independent inputs; the remainder is implicitly retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeFundFlow {
    pub lp_usdc_ratio: Decimal,
    pub lp_af_ratio: Decimal,
    pub buyback_ratio: Decimal,
    pub forex_reserve_ratio: Decimal,
}

impl Default for TradeFundFlow {
    fn default() -> Self {
        Self {
            lp_usdc_ratio: dec!(0.30),
            lp_af_ratio: dec!(0.30),
            buyback_ratio: dec!(0.20),
            forex_reserve_ratio: dec!(0.50),
        }
    }
}

/// Split of post-user trade profit between platform and brokers.
/// Must sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeProfitDistribution {
    pub platform_ratio: Decimal,
    pub broker_ratio: Decimal,
}

impl Default for TradeProfitDistribution {
    fn default() -> Self {
        Self {
            platform_ratio: dec!(0.50),
            broker_ratio: dec!(0.50),
        }
    }
}

/// Immutable-per-day configuration bundle consumed by every engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub release_mode: ReleaseMode,
    pub staking_period: StakingPeriod,
    pub af_exit_config: AfExitConfig,
    pub af_release_choice: AfReleaseChoice,
    /// AF -> trading fund conversion multiplier.
    pub af_to_trading_fund_rate: Decimal,
    pub trade_fund_flow: TradeFundFlow,
    pub tier_configs: Vec<TierConfig>,
    pub broker_configs: Vec<BrokerConfig>,
    pub trade_profit_distribution: TradeProfitDistribution,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            release_mode: ReleaseMode::default(),
            staking_period: StakingPeriod::default(),
            af_exit_config: AfExitConfig::default(),
            af_release_choice: AfReleaseChoice::default(),
            af_to_trading_fund_rate: Decimal::ONE,
            trade_fund_flow: TradeFundFlow::default(),
            tier_configs: default_tier_configs(),
            broker_configs: default_broker_configs(),
            trade_profit_distribution: TradeProfitDistribution::default(),
        }
    }
}

impl SystemConfig {
    /// Look up the tier row for a staking bracket.
    pub fn tier_config(&self, tier: u32) -> Option<&TierConfig> {
        self.tier_configs.iter().find(|t| t.tier == tier)
    }

    /// Look up the broker row for a level.
    pub fn broker_config(&self, level: BrokerLevel) -> Option<&BrokerConfig> {
        self.broker_configs.iter().find(|b| b.level == level)
    }

    /// Validate the documented field constraints. Runs at the configuration
    /// boundary only; simulation step functions trust validated config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.staking_period.enabled && self.staking_period.days == 0 {
            // Disabled periods never consult `days`.
        } else if self.staking_period.days < 1 {
            return Err(ConfigError::InvalidStakingPeriod(self.staking_period.days));
        }

        let exit_sum =
            self.af_exit_config.withdraw_to_market_ratio + self.af_exit_config.withdraw_burn_ratio;
        if exit_sum != Decimal::ONE {
            return Err(ConfigError::RatioPairNotUnit {
                pair: "withdraw_to_market_ratio + withdraw_burn_ratio",
                sum: exit_sum,
            });
        }

        for (field, ratio) in [
            (
                "keep_as_trading_fee_ratio",
                self.af_exit_config.keep_as_trading_fee_ratio,
            ),
            (
                "convert_to_trading_fund_ratio",
                self.af_exit_config.convert_to_trading_fund_ratio,
            ),
        ] {
            if ratio < Decimal::ZERO || ratio > Decimal::ONE {
                return Err(ConfigError::RatioOutOfBounds {
                    field,
                    value: ratio,
                });
            }
        }

        let choice_sum =
            self.af_release_choice.withdraw_percentage + self.af_release_choice.convert_percentage;
        if choice_sum != Decimal::ONE_HUNDRED {
            return Err(ConfigError::PercentagePairNotFull {
                pair: "withdraw_percentage + convert_percentage",
                sum: choice_sum,
            });
        }

        // A pair summing to 100 can still hide values like 150/-50.
        for (field, percentage) in [
            (
                "withdraw_percentage",
                self.af_release_choice.withdraw_percentage,
            ),
            (
                "convert_percentage",
                self.af_release_choice.convert_percentage,
            ),
        ] {
            if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
                return Err(ConfigError::PercentageOutOfBounds {
                    field,
                    value: percentage,
                });
            }
        }

        if self.af_to_trading_fund_rate < Decimal::ZERO {
            return Err(ConfigError::NegativeRate {
                field: "af_to_trading_fund_rate",
                value: self.af_to_trading_fund_rate,
            });
        }

        let profit_sum = self.trade_profit_distribution.platform_ratio
            + self.trade_profit_distribution.broker_ratio;
        if profit_sum != Decimal::ONE {
            return Err(ConfigError::RatioPairNotUnit {
                pair: "platform_ratio + broker_ratio",
                sum: profit_sum,
            });
        }

        for flow in [
            self.trade_fund_flow.lp_usdc_ratio,
            self.trade_fund_flow.lp_af_ratio,
            self.trade_fund_flow.buyback_ratio,
            self.trade_fund_flow.forex_reserve_ratio,
        ] {
            if flow < Decimal::ZERO || flow > Decimal::ONE {
                return Err(ConfigError::RatioOutOfBounds {
                    field: "trade_fund_flow",
                    value: flow,
                });
            }
        }

        let mut seen_tiers = Vec::new();
        for tier in &self.tier_configs {
            if seen_tiers.contains(&tier.tier) {
                return Err(ConfigError::DuplicateTier(tier.tier));
            }
            seen_tiers.push(tier.tier);

            if tier.trading_fee_rate < MIN_TRADING_FEE_RATE
                || tier.trading_fee_rate > MAX_TRADING_FEE_RATE
            {
                return Err(ConfigError::FeeRateOutOfBounds {
                    tier: tier.tier,
                    rate: tier.trading_fee_rate,
                });
            }
            if tier.af_release_rate < Decimal::ZERO || tier.af_release_rate > Decimal::ONE {
                return Err(ConfigError::RatioOutOfBounds {
                    field: "af_release_rate",
                    value: tier.af_release_rate,
                });
            }
            if tier.profit_share_ratio < Decimal::ZERO || tier.profit_share_ratio > Decimal::ONE {
                return Err(ConfigError::RatioOutOfBounds {
                    field: "profit_share_ratio",
                    value: tier.profit_share_ratio,
                });
            }
            if tier.trading_fund_multiplier < Decimal::ONE {
                return Err(ConfigError::RatioOutOfBounds {
                    field: "trading_fund_multiplier",
                    value: tier.trading_fund_multiplier,
                });
            }
        }

        let mut seen_levels = Vec::new();
        for broker in &self.broker_configs {
            if seen_levels.contains(&broker.level) {
                return Err(ConfigError::DuplicateBrokerLevel(broker.level));
            }
            seen_levels.push(broker.level);

            if broker.layer_start < 1
                || broker.layer_end > MAX_BROKER_LAYERS
                || broker.layer_start > broker.layer_end
            {
                return Err(ConfigError::InvalidLayerRange {
                    level: broker.level,
                    start: broker.layer_start,
                    end: broker.layer_end,
                });
            }
            if broker.promotion_reward_ratio < Decimal::ZERO
                || broker.promotion_reward_ratio > Decimal::ONE
            {
                return Err(ConfigError::RatioOutOfBounds {
                    field: "promotion_reward_ratio",
                    value: broker.promotion_reward_ratio,
                });
            }
            if broker.layer_release_ratio < Decimal::ZERO
                || broker.layer_release_ratio > Decimal::ONE
            {
                return Err(ConfigError::RatioOutOfBounds {
                    field: "layer_release_ratio",
                    value: broker.layer_release_ratio,
                });
            }
        }

        Ok(())
    }
}

/// Default tier table: six fixed brackets, larger stakes release faster,
/// share more profit and pay lower fees.
pub fn default_tier_configs() -> Vec<TierConfig> {
    vec![
        TierConfig {
            tier: 100,
            af_release_rate: dec!(0.005),
            trading_fund_multiplier: dec!(2),
            profit_share_ratio: dec!(0.60),
            trading_fee_rate: dec!(0.08),
        },
        TierConfig {
            tier: 500,
            af_release_rate: dec!(0.006),
            trading_fund_multiplier: dec!(2.5),
            profit_share_ratio: dec!(0.65),
            trading_fee_rate: dec!(0.06),
        },
        TierConfig {
            tier: 1000,
            af_release_rate: dec!(0.007),
            trading_fund_multiplier: dec!(3),
            profit_share_ratio: dec!(0.70),
            trading_fee_rate: dec!(0.05),
        },
        TierConfig {
            tier: 3000,
            af_release_rate: dec!(0.008),
            trading_fund_multiplier: dec!(3.5),
            profit_share_ratio: dec!(0.75),
            trading_fee_rate: dec!(0.03),
        },
        TierConfig {
            tier: 5000,
            af_release_rate: dec!(0.009),
            trading_fund_multiplier: dec!(4),
            profit_share_ratio: dec!(0.80),
            trading_fee_rate: dec!(0.02),
        },
        TierConfig {
            tier: 10000,
            af_release_rate: dec!(0.01),
            trading_fund_multiplier: dec!(5),
            profit_share_ratio: dec!(0.85),
            trading_fee_rate: dec!(0.01),
        },
    ]
}

/// Default broker table: six levels partitioning layers 1..=20.
pub fn default_broker_configs() -> Vec<BrokerConfig> {
    vec![
        BrokerConfig {
            level: BrokerLevel::V1,
            promotion_reward_ratio: dec!(0.40),
            layer_start: 1,
            layer_end: 4,
            layer_release_ratio: dec!(0.04),
        },
        BrokerConfig {
            level: BrokerLevel::V2,
            promotion_reward_ratio: dec!(0.50),
            layer_start: 5,
            layer_end: 8,
            layer_release_ratio: dec!(0.04),
        },
        BrokerConfig {
            level: BrokerLevel::V3,
            promotion_reward_ratio: dec!(0.60),
            layer_start: 9,
            layer_end: 11,
            layer_release_ratio: dec!(0.03),
        },
        BrokerConfig {
            level: BrokerLevel::V4,
            promotion_reward_ratio: dec!(0.70),
            layer_start: 12,
            layer_end: 14,
            layer_release_ratio: dec!(0.03),
        },
        BrokerConfig {
            level: BrokerLevel::V5,
            promotion_reward_ratio: dec!(0.80),
            layer_start: 15,
            layer_end: 17,
            layer_release_ratio: dec!(0.03),
        },
        BrokerConfig {
            level: BrokerLevel::V6,
            promotion_reward_ratio: dec!(1.00),
            layer_start: 18,
            layer_end: 20,
            layer_release_ratio: dec!(0.03),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SystemConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_broker_table_partitions_ladder() {
        let config = SystemConfig::default();
        for layer in 1..=MAX_BROKER_LAYERS {
            let covering: Vec<_> = config
                .broker_configs
                .iter()
                .filter(|b| b.covers(layer))
                .collect();
            assert_eq!(covering.len(), 1, "layer {} must have one owner", layer);
        }
    }

    #[test]
    fn test_tier_lookup() {
        let config = SystemConfig::default();
        assert_eq!(
            config.tier_config(1000).unwrap().af_release_rate,
            dec!(0.007)
        );
        assert!(config.tier_config(1234).is_none());
    }

    #[test]
    fn test_validate_rejects_broken_exit_pair() {
        let mut config = SystemConfig::default();
        config.af_exit_config.withdraw_to_market_ratio = dec!(0.9);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RatioPairNotUnit { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_exit_ratio_out_of_bounds() {
        let mut config = SystemConfig::default();
        config.af_exit_config.keep_as_trading_fee_ratio = dec!(-0.1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RatioOutOfBounds {
                field: "keep_as_trading_fee_ratio",
                ..
            })
        ));

        let mut config = SystemConfig::default();
        config.af_exit_config.convert_to_trading_fund_ratio = dec!(1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RatioOutOfBounds {
                field: "convert_to_trading_fund_ratio",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_release_choice_outside_percent_range() {
        // Sums to 100 but both legs are out of range individually.
        let mut config = SystemConfig::default();
        config.af_release_choice.withdraw_percentage = dec!(150);
        config.af_release_choice.convert_percentage = dec!(-50);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PercentageOutOfBounds {
                field: "withdraw_percentage",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_trading_fund_rate() {
        let mut config = SystemConfig::default();
        config.af_to_trading_fund_rate = dec!(-1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeRate {
                field: "af_to_trading_fund_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_fee_rate_out_of_bounds() {
        let mut config = SystemConfig::default();
        config.tier_configs[0].trading_fee_rate = dec!(0.10);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FeeRateOutOfBounds { tier: 100, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_layer_range() {
        let mut config = SystemConfig::default();
        config.broker_configs[5].layer_end = 25;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLayerRange { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_tier() {
        let mut config = SystemConfig::default();
        config.tier_configs[1].tier = 100;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateTier(100))
        ));
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        // A stale snapshot may carry only a subset of fields.
        let config: SystemConfig =
            serde_json::from_str(r#"{"release_mode":"coin"}"#).unwrap();
        assert_eq!(config.release_mode, ReleaseMode::Coin);
        assert_eq!(config.tier_configs.len(), 6);
        assert_eq!(config.broker_configs.len(), 6);
    }
}
