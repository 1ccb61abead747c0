use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::serde_num;

// ============================================================================
// Grouped record
// ============================================================================

/// Заказ клиента: заголовок + строки (XTD_OE_ORDERS_LINES_V)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    #[serde(deserialize_with = "serde_num::req_i64")]
    pub header_id: i64,
    pub order_number: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub ordered_date: Option<String>,
    #[serde(default)]
    pub flow_status_code: Option<String>,
    #[serde(default)]
    pub order_type: Option<String>,
    #[serde(default)]
    pub branch_code: Option<String>,
    #[serde(default)]
    pub lines: Vec<SalesOrderLine>,
}

/// Строка заказа клиента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderLine {
    #[serde(deserialize_with = "serde_num::req_i64")]
    pub line_number: i64,
    #[serde(default)]
    pub ordered_item: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_f64")]
    pub ordered_quantity: Option<f64>,
    #[serde(default, deserialize_with = "serde_num::opt_f64")]
    pub unit_selling_price: Option<f64>,
    #[serde(default)]
    pub line_status: Option<String>,
}

// ============================================================================
// Filter
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesOrderQuery {
    pub order_number: Option<String>,
    pub customer_name: Option<String>,
    pub flow_status_code: Option<String>,
    pub branch_code: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub limit: Option<i64>,
}
