use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::serde_num;

/// Активность торгового представителя (XTD_ONT_SALES_ACTIVITY_V)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesActivity {
    #[serde(deserialize_with = "serde_num::req_i64")]
    pub activity_id: i64,
    #[serde(default)]
    pub salesrep_name: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub activity_date: Option<String>,
    #[serde(default)]
    pub branch_code: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesActivityQuery {
    pub salesrep_name: Option<String>,
    pub customer_name: Option<String>,
    pub activity_type: Option<String>,
    pub branch_code: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub limit: Option<i64>,
}
