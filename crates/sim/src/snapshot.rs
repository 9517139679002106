//! Snapshot persistence.
//!
//! The storage collaborator may hand back partial or stale state; every
//! field is default-guarded so the merge with defaults happens here, at the
//! deserialization boundary, never inside the computation layer.

use serde::{Deserialize, Serialize};

use afx_core::{
    BrokerReward, DailyReleaseRecord, LpPoolState, StakingOrder, SystemConfig, TradeRecord,
    config::{default_broker_configs, default_tier_configs},
};

use crate::simulation::{Simulation, SimulationStats};

/// Serializable mirror of the persisted state layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSnapshot {
    pub config: SystemConfig,
    pub pool: LpPoolState,
    pub orders: Vec<StakingOrder>,
    pub trade_records: Vec<TradeRecord>,
    pub broker_rewards: Vec<BrokerReward>,
    pub daily_records: Vec<DailyReleaseRecord>,
    pub current_day: u32,
    pub stats: SimulationStats,
}

impl SimulationSnapshot {
    /// Capture the full state of a simulation.
    pub fn capture(sim: &Simulation) -> Self {
        Self {
            config: sim.config().clone(),
            pool: sim.pool().clone(),
            orders: sim.orders().to_vec(),
            trade_records: sim.trade_records().to_vec(),
            broker_rewards: sim.broker_rewards().to_vec(),
            daily_records: sim.daily_records().to_vec(),
            current_day: sim.current_day(),
            stats: sim.stats().clone(),
        }
    }

    /// Rebuild a simulation, filling anything the stored state lost with
    /// defaults. A snapshot whose tier or broker tables went missing gets
    /// the default tables back.
    pub fn restore(mut self) -> Simulation {
        if self.config.tier_configs.is_empty() {
            self.config.tier_configs = default_tier_configs();
        }
        if self.config.broker_configs.is_empty() {
            self.config.broker_configs = default_broker_configs();
        }

        Simulation::from_parts(
            self.config,
            self.pool,
            self.orders,
            self.trade_records,
            self.broker_rewards,
            self.daily_records,
            self.current_day,
            self.stats,
        )
    }
}

impl Simulation {
    /// Capture this simulation's full state for persistence.
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot::capture(self)
    }

    /// Rebuild a simulation from persisted state, merging with defaults.
    pub fn from_snapshot(snapshot: SimulationSnapshot) -> Self {
        snapshot.restore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_round_trip() {
        let mut sim = Simulation::new();
        sim.create_order(1000, dec!(1000));
        sim.advance_days(5);

        let json = serde_json::to_string(&sim.snapshot()).unwrap();
        let restored = Simulation::from_snapshot(serde_json::from_str(&json).unwrap());

        assert_eq!(restored.current_day(), 5);
        assert_eq!(restored.pool(), sim.pool());
        assert_eq!(restored.orders(), sim.orders());
        assert_eq!(restored.daily_records(), sim.daily_records());
        assert_eq!(restored.stats(), sim.stats());
    }

    #[test]
    fn test_empty_snapshot_restores_defaults() {
        let snapshot: SimulationSnapshot = serde_json::from_str("{}").unwrap();
        let sim = snapshot.restore();

        assert_eq!(sim.current_day(), 0);
        assert_eq!(sim.pool(), &LpPoolState::default());
        assert_eq!(sim.config().tier_configs.len(), 6);
    }

    #[test]
    fn test_partial_snapshot_merges_with_defaults() {
        // Stale storage: pool and day survived, config lost its tables.
        let json = r#"{
            "current_day": 7,
            "pool": {"usdc_balance": "510000", "af_balance": "98000",
                     "af_price": "5.2", "k": "49980000000"},
            "config": {"release_mode": "coin", "tier_configs": [], "broker_configs": []}
        }"#;

        let snapshot: SimulationSnapshot = serde_json::from_str(json).unwrap();
        let sim = snapshot.restore();

        assert_eq!(sim.current_day(), 7);
        assert_eq!(sim.pool().usdc_balance, dec!(510000));
        assert_eq!(sim.config().release_mode, afx_core::ReleaseMode::Coin);
        // Missing tables fall back to the defaults
        assert_eq!(sim.config().tier_configs.len(), 6);
        assert_eq!(sim.config().broker_configs.len(), 6);
        // Untouched sections are fully defaulted
        assert_eq!(sim.stats(), &SimulationStats::default());
        assert!(sim.orders().is_empty());
    }
}
