//! Quarter sales and purchase totals for the VAT calculator.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{info, warn};

use crate::client::EcountClient;
use crate::error::EcountError;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlipTotals {
    pub sales_total: i64,
    pub purchase_total: i64,
}

fn amount_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

/// `SUPPLY_AMT`, else `TOTAL_AMT`, else 0. A present but null field counts as
/// absent; an unreadable value counts as 0.
pub fn slip_amount(slip: &Value) -> i64 {
    let field = ["SUPPLY_AMT", "TOTAL_AMT"]
        .into_iter()
        .find_map(|key| slip.get(key).filter(|v| !v.is_null()));
    let Some(field) = field else {
        return 0;
    };
    match amount_value(field) {
        Some(amount) => amount.round() as i64,
        None => {
            warn!(%field, "unreadable slip amount; counted as 0");
            0
        }
    }
}

pub fn sum_slips(slips: &[Value]) -> i64 {
    slips
        .iter()
        .map(slip_amount)
        .fold(0, |total: i64, amount| total.saturating_add(amount))
}

/// Log in and total the sales and purchase slips dated `from..=to`. Both
/// lists are fetched concurrently.
pub async fn fetch_slip_totals<T: Transport>(
    client: &EcountClient<T>,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<SlipTotals, EcountError> {
    let session = client.login().await?;
    let (sales, purchases) = tokio::try_join!(
        client.get_sales_slips(&session, from, to),
        client.get_purchase_slips(&session, from, to),
    )?;

    let totals = SlipTotals {
        sales_total: sum_slips(sales.slips()),
        purchase_total: sum_slips(purchases.slips()),
    };
    info!(
        sales_slips = sales.slips().len(),
        purchase_slips = purchases.slips().len(),
        sales_total = totals.sales_total,
        purchase_total = totals.purchase_total,
        "slip totals"
    );
    Ok(totals)
}
