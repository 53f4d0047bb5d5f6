//! Business rules: everything that turns check-ins and incident reports into
//! money and risk figures. Each mutating operation runs in one write
//! transaction that also rebuilds the owning site's balance.

pub mod attendance;
pub mod balance;
pub mod calculator;
pub mod config;
pub mod dashboard;
pub mod incident;
pub mod log;
pub mod policy;
pub mod registry;

use crate::clock::Clock;
use crate::config::Config;
use policy::Policy;

/// What every operation needs besides the database: a time source and the
/// business thresholds.
pub struct Context<'a> {
    pub clock: &'a dyn Clock,
    pub policy: Policy,
}

impl<'a> Context<'a> {
    pub fn new(clock: &'a dyn Clock, policy: Policy) -> Self {
        Self { clock, policy }
    }

    pub fn from_config(clock: &'a dyn Clock, cfg: &Config) -> Self {
        Self::new(clock, Policy::from(cfg))
    }
}
