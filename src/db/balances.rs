use crate::db::db_utils::{datetime_str, get_bool, get_datetime, get_decimal};
use crate::errors::AppResult;
use crate::models::SiteId;
use crate::models::balance::SiteBalance;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<SiteBalance> {
    Ok(SiteBalance {
        site_id: row.get("site_id")?,
        total_wages: get_decimal(row, "total_wages")?,
        total_loss_cost: get_decimal(row, "total_loss_cost")?,
        total_penalty: get_decimal(row, "total_penalty")?,
        remaining_budget: get_decimal(row, "remaining_budget")?,
        profitable: get_bool(row, "profitable")?,
        updated_at: get_datetime(row, "updated_at")?,
    })
}

/// Insert or overwrite the cached balance row of a site.
pub fn upsert_balance(conn: &Connection, b: &SiteBalance) -> AppResult<()> {
    conn.execute(
        "INSERT INTO site_balances (site_id, total_wages, total_loss_cost, total_penalty,
                                    remaining_budget, profitable, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(site_id) DO UPDATE SET
             total_wages = excluded.total_wages,
             total_loss_cost = excluded.total_loss_cost,
             total_penalty = excluded.total_penalty,
             remaining_budget = excluded.remaining_budget,
             profitable = excluded.profitable,
             updated_at = excluded.updated_at",
        params![
            b.site_id,
            b.total_wages.to_string(),
            b.total_loss_cost.to_string(),
            b.total_penalty.to_string(),
            b.remaining_budget.to_string(),
            b.profitable as i64,
            datetime_str(&b.updated_at),
        ],
    )?;
    Ok(())
}

pub fn load_balance(conn: &Connection, site: SiteId) -> AppResult<Option<SiteBalance>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM site_balances WHERE site_id = ?1")?;
    Ok(stmt.query_row([site], map_row).optional()?)
}
