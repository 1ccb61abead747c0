use serde::{Deserialize, Serialize};

use crate::shared::serde_num;

// ============================================================================
// Record
// ============================================================================

/// Филиал / склад (XTD_INV_BRANCHES_V)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(deserialize_with = "serde_num::req_i64")]
    pub organization_id: i64,
    pub branch_code: String,
    pub branch_name: String,
    #[serde(default)]
    pub province_code: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_active: Option<String>,
}

// ============================================================================
// Filter
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchQuery {
    pub branch_code: Option<String>,
    pub branch_name: Option<String>,
    pub province_code: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub limit: Option<i64>,
}
