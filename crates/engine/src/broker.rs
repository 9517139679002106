//! Broker referral rewards: the 20-layer release ladder.

use std::collections::BTreeMap;

use afx_core::constants::MAX_BROKER_LAYERS;
use afx_core::{BrokerConfig, BrokerReward};
use rust_decimal::Decimal;

/// First broker config whose layer range contains `layer`. First match wins
/// when ranges overlap; the caller is expected to configure a partition.
pub fn layer_config(layer: u32, broker_configs: &[BrokerConfig]) -> Option<&BrokerConfig> {
    broker_configs.iter().find(|config| config.covers(layer))
}

/// Map one emission amount onto the 20-layer ladder.
///
/// Unmatched layers produce no line, so the result holds at most 20 entries.
/// `usdc_earned` and `promotion_reward` stay zero here; they belong to the
/// separate promotion computation.
pub fn layer_rewards(total_emission: Decimal, broker_configs: &[BrokerConfig]) -> Vec<BrokerReward> {
    let mut rewards = Vec::new();

    for layer in 1..=MAX_BROKER_LAYERS {
        if let Some(config) = layer_config(layer, broker_configs) {
            rewards.push(BrokerReward {
                level: config.level,
                layer,
                af_released: total_emission * config.layer_release_ratio,
                usdc_earned: Decimal::ZERO,
                promotion_reward: Decimal::ZERO,
            });
        }
    }

    rewards
}

/// Sum reward lines by layer index, sorted layer-ascending. The same layer
/// across different orders accumulates into one line.
pub fn aggregate(rewards: Vec<BrokerReward>) -> Vec<BrokerReward> {
    let mut by_layer: BTreeMap<u32, BrokerReward> = BTreeMap::new();

    for reward in rewards {
        by_layer
            .entry(reward.layer)
            .and_modify(|existing| {
                existing.af_released += reward.af_released;
                existing.usdc_earned += reward.usdc_earned;
                existing.promotion_reward += reward.promotion_reward;
            })
            .or_insert(reward);
    }

    by_layer.into_values().collect()
}

/// Promotion reward for a broker level off referral profit.
pub fn promotion_reward(referral_profit: Decimal, broker_config: &BrokerConfig) -> Decimal {
    referral_profit * broker_config.promotion_reward_ratio
}
