use serde::{Deserialize, Serialize};

use crate::shared::serde_num;

/// Тип заказа клиента (XTD_OE_ORDER_TYPES_V)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderType {
    #[serde(deserialize_with = "serde_num::req_i64")]
    pub order_type_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order_category_code: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub org_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesOrderTypeQuery {
    pub name: Option<String>,
    pub order_category_code: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub org_id: Option<i64>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub limit: Option<i64>,
}
