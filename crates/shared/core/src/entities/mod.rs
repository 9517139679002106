pub mod order;
pub mod pool;
pub mod record;

pub use order::{OrderStatus, StakingOrder};
pub use pool::LpPoolState;
pub use record::{BrokerReward, DailyReleaseRecord, TradeRecord};
