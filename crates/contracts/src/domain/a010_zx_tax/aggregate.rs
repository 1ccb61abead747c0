use serde::{Deserialize, Serialize};

use crate::shared::serde_num;

/// Налоговая ставка E-Business Tax (XTD_ZX_TAXES_V)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZxTax {
    #[serde(deserialize_with = "serde_num::req_i64")]
    pub tax_rate_id: i64,
    pub tax_rate_code: String,
    #[serde(default)]
    pub tax: Option<String>,
    #[serde(default)]
    pub tax_regime_code: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_f64")]
    pub percentage_rate: Option<f64>,
    #[serde(default)]
    pub effective_from: Option<String>,
    #[serde(default)]
    pub effective_to: Option<String>,
    #[serde(default)]
    pub active_flag: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZxTaxQuery {
    pub tax_rate_code: Option<String>,
    pub tax: Option<String>,
    pub active_flag: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_f64")]
    pub percentage_rate: Option<f64>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub limit: Option<i64>,
}
