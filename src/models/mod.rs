pub mod attendance;
pub mod balance;
pub mod coords;
pub mod incident;
pub mod role;
pub mod site;
pub mod worker;

pub type WorkerId = i64;
pub type SiteId = i64;
pub type RecordId = i64;
pub type IncidentId = i64;
