use serde::{Deserialize, Serialize};

use crate::shared::serde_num;

// ============================================================================
// Record
// ============================================================================

/// Условия оплаты AP (XTD_AP_TERMS_V)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApTerm {
    #[serde(deserialize_with = "serde_num::req_i64")]
    pub term_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub due_days: Option<i64>,
    #[serde(default, deserialize_with = "serde_num::opt_f64")]
    pub discount_percent: Option<f64>,
    #[serde(default)]
    pub enabled_flag: Option<String>,
    #[serde(default)]
    pub start_date_active: Option<String>,
    #[serde(default)]
    pub end_date_active: Option<String>,
}

// ============================================================================
// Filter
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApTermsQuery {
    pub name: Option<String>,
    pub enabled_flag: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub due_days: Option<i64>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub limit: Option<i64>,
}
