use serde::{Deserialize, Serialize};

use crate::shared::serde_num;

/// Доступ пользователя к приложению (auth: users + user_applications + applications)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDms {
    #[serde(deserialize_with = "serde_num::req_i64")]
    pub grant_id: i64,
    #[serde(deserialize_with = "serde_num::req_i64")]
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub application_code: Option<String>,
    #[serde(default)]
    pub application_name: Option<String>,
    #[serde(default)]
    pub granted_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserDmsQuery {
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub application_code: Option<String>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "serde_num::opt_i64")]
    pub limit: Option<i64>,
}
