use serde::{Deserialize, Serialize};

/// Default page size when the caller sends none (or a non-positive one)
pub const DEFAULT_LIMIT: u64 = 10;

/// Pagination block of a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// `total_pages = ceil(total / limit)`; limit is floored at 1
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let divisor = limit.max(1);
        let total_pages = (total + divisor - 1) / divisor;
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// Успешный ответ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Success<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> Success<T> {
    pub fn single(data: T) -> Self {
        Self {
            success: true,
            data,
            pagination: None,
        }
    }

    pub fn paged(data: T, pagination: Pagination) -> Self {
        Self {
            success: true,
            data,
            pagination: Some(pagination),
        }
    }
}

/// Ответ с ошибкой. `error` несёт исходное сообщение, без стектрейса.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub success: bool,
    pub message: String,
    pub error: String,
}

impl Failure {
    pub fn new(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: error.into(),
        }
    }
}

/// Payload of count operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResult {
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let p = Pagination::new(1, 10, 25);
        assert_eq!(p.total_pages, 3);
        assert_eq!(Pagination::new(1, 10, 30).total_pages, 3);
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
    }

    #[test]
    fn test_zero_limit_does_not_divide_by_zero() {
        let p = Pagination::new(1, 0, 7);
        assert_eq!(p.total_pages, 7);
    }

    #[test]
    fn test_success_shape() {
        let body = Success::paged(vec![1, 2], Pagination::new(2, 2, 5));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert_eq!(json["pagination"]["totalPages"], 3);
        assert_eq!(json["pagination"]["page"], 2);

        let single = serde_json::to_value(Success::single("x")).unwrap();
        assert!(single.get("pagination").is_none());
    }

    #[test]
    fn test_failure_shape() {
        let json = serde_json::to_value(Failure::new("Branch not found", "id=7")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "message": "Branch not found", "error": "id=7"})
        );
    }
}
