use serde::{Deserialize, Serialize};

use crate::shared::serde_num;

/// Провинция (XTD_AR_PROVINCES_V)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Province {
    #[serde(deserialize_with = "serde_num::req_i64")]
    pub province_id: i64,
    pub province_code: String,
    pub province_name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvinceQuery {
    pub province_code: Option<String>,
    pub province_name: Option<String>,
    pub region: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub limit: Option<i64>,
}
