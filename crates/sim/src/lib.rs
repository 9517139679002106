//! AFx Simulation
//!
//! The caller-held simulation context and the daily orchestrator that
//! sequences every active staking order through the release, trade and
//! broker engines, threading each order's contribution through the shared
//! LP pool in strict iteration order.

pub mod orchestrator;
pub mod prediction;
pub mod simulation;
pub mod snapshot;

pub use orchestrator::{DayOutcome, OrderDayResult};
pub use prediction::ReturnPrediction;
pub use simulation::{Simulation, SimulationStats};
pub use snapshot::SimulationSnapshot;
