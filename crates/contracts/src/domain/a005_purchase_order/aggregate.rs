use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::serde_num;

// ============================================================================
// Grouped record
// ============================================================================

/// Заказ на закупку: заголовок + строки (XTD_PO_HEADERS_LINES_V)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    #[serde(deserialize_with = "serde_num::req_i64")]
    pub po_header_id: i64,
    pub po_number: String,
    #[serde(default)]
    pub vendor_name: Option<String>,
    #[serde(default)]
    pub vendor_site_code: Option<String>,
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub lines: Vec<PurchaseOrderLine>,
}

/// Строка заказа на закупку
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    #[serde(deserialize_with = "serde_num::req_i64")]
    pub line_num: i64,
    #[serde(default)]
    pub item_code: Option<String>,
    #[serde(default)]
    pub item_description: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_f64")]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub uom: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_f64")]
    pub unit_price: Option<f64>,
    #[serde(default, deserialize_with = "serde_num::opt_f64")]
    pub amount: Option<f64>,
}

// ============================================================================
// Filter
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseOrderQuery {
    pub po_number: Option<String>,
    pub vendor_name: Option<String>,
    pub status: Option<String>,
    pub item_code: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub limit: Option<i64>,
}
