use super::SiteId;
use crate::core::calculator::money;
use crate::errors::AppResult;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

/// Cached per-site aggregate. Always rebuilt from source rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteBalance {
    pub site_id: SiteId,
    pub total_wages: Decimal,
    pub total_loss_cost: Decimal,
    pub total_penalty: Decimal,
    pub remaining_budget: Decimal,
    pub profitable: bool,
    pub updated_at: NaiveDateTime,
}

impl SiteBalance {
    /// Wages plus incident losses; penalties excluded.
    pub fn operating_spend(&self) -> AppResult<Decimal> {
        money::add(self.total_wages, self.total_loss_cost, "operating spend")
    }

    pub fn total_spend(&self) -> AppResult<Decimal> {
        money::add(self.operating_spend()?, self.total_penalty, "total spend")
    }
}
