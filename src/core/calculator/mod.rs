//! Pure computations: no database, no clock.

pub mod attendance;
pub mod balance;
pub mod fraud;
pub mod geo;
pub mod impact;
pub mod money;
pub mod projection;
