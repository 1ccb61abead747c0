use serde::{Deserialize, Serialize};

use crate::shared::serde_num;

/// Валюта (XTD_FND_CURRENCIES_V), ключ: код ISO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub currency_code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub precision: Option<i64>,
    #[serde(default)]
    pub enabled_flag: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrencyQuery {
    pub currency_code: Option<String>,
    pub name: Option<String>,
    pub enabled_flag: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub limit: Option<i64>,
}
