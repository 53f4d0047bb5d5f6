pub mod attendance;
pub mod balances;
pub mod db_utils;
pub mod incidents;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod sites;
pub mod stats;
pub mod workers;
