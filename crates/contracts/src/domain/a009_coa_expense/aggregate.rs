use serde::{Deserialize, Serialize};

use crate::shared::serde_num;

/// Счёт расходов плана счетов (XTD_GL_COA_EXPENSE_V)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoaExpense {
    #[serde(deserialize_with = "serde_num::req_i64")]
    pub code_combination_id: i64,
    pub account_code: String,
    #[serde(default)]
    pub account_description: Option<String>,
    #[serde(default)]
    pub expense_type: Option<String>,
    #[serde(default)]
    pub enabled_flag: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoaExpenseQuery {
    pub account_code: Option<String>,
    pub account_description: Option<String>,
    pub expense_type: Option<String>,
    pub enabled_flag: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub limit: Option<i64>,
}
