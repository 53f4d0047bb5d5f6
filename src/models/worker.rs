use super::{WorkerId, role::Role};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub daily_rate: Decimal,
    pub hourly_rate: Decimal,
    /// Device pinned by the auth layer; carried but not interpreted here.
    pub device_id: Option<String>,
}

/// Input for registering a worker.
#[derive(Debug, Clone)]
pub struct NewWorker {
    pub name: String,
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub daily_rate: Decimal,
    pub hourly_rate: Decimal,
}
