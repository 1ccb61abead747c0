use axum::http::{header, Method};
use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::domain::a001_ap_terms::repository::ApTerms;
use crate::domain::a002_branch::repository::Branches;
use crate::domain::a003_currency::repository::Currencies;
use crate::domain::a004_province::repository::Provinces;
use crate::domain::a005_purchase_order::repository::PurchaseOrders;
use crate::domain::a006_sales_order::repository::SalesOrders;
use crate::domain::a007_sales_activity::repository::SalesActivities;
use crate::domain::a008_sales_order_type::repository::SalesOrderTypes;
use crate::domain::a009_coa_expense::repository::CoaExpenses;
use crate::domain::a010_zx_tax::repository::ZxTaxes;
use crate::domain::a011_user_dms::repository::UserGrants;
use crate::domain::a012_application::repository::Applications;
use crate::handlers::{entity, health};
use crate::shared::query::entity::Entity;
use crate::shared::state::AppState;
use crate::system::middleware::request_logger::request_logger;

/// Четыре маршрута на сущность; `/count` статический и имеет приоритет над `/:id`
fn mount<E: Entity>(router: Router<AppState>) -> Router<AppState> {
    let base = format!("/api/{}", E::view().slug);
    router
        .route(&base, get(entity::list::<E>))
        .route(&format!("{}/count", base), get(entity::count::<E>))
        .route(&format!("{}/:id", base), get(entity::get_by_id::<E>))
        .route(
            &format!("{}/:field/:value", base),
            get(entity::find_by_field::<E>),
        )
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let router = Router::new().route("/health", get(health::health));

    // ERP
    let router = mount::<ApTerms>(router);
    let router = mount::<Branches>(router);
    let router = mount::<Currencies>(router);
    let router = mount::<Provinces>(router);
    let router = mount::<PurchaseOrders>(router);
    let router = mount::<SalesOrders>(router);
    let router = mount::<SalesActivities>(router);
    let router = mount::<SalesOrderTypes>(router);
    let router = mount::<CoaExpenses>(router);
    let router = mount::<ZxTaxes>(router);
    // AUTH
    let router = mount::<UserGrants>(router);
    let router = mount::<Applications>(router);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    router
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::shared::cache::DisabledCache;
    use crate::shared::query::testing::{is_count, rows, total, MockExecutor};

    fn app(exec: MockExecutor) -> (Router, Arc<MockExecutor>) {
        let exec = Arc::new(exec);
        let state = AppState::for_tests(exec.clone(), Arc::new(DisabledCache));
        (configure_routes(state), exec)
    }

    fn terms() -> MockExecutor {
        MockExecutor::new(|q| {
            if is_count(q) {
                Ok(total(25))
            } else {
                Ok(rows(vec![
                    json!({"term_id": 11, "name": "NET30", "due_days": "30"}),
                    json!({"term_id": 12, "name": "NET30 EOM", "due_days": 30}),
                ]))
            }
        })
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_list_envelope() {
        let (router, exec) = app(terms());
        let (status, body) = get_json(router, "/api/ap-terms?name=net30&page=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"][0]["due_days"], json!(30));
        assert_eq!(
            body["pagination"],
            json!({"page": 2, "limit": 10, "total": 25, "totalPages": 3})
        );

        let data = exec.calls().into_iter().find(|q| !is_count(q)).unwrap();
        assert!(data.sql.contains("UPPER(name) LIKE UPPER(:1)"));
    }

    #[tokio::test]
    async fn test_count_route_is_not_an_id() {
        let (router, _) = app(terms());
        let (status, body) = get_json(router, "/api/ap-terms/count?enabled_flag=Y").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "data": {"total": 25}}));
    }

    #[tokio::test]
    async fn test_malformed_query_is_400_envelope() {
        let (router, exec) = app(terms());
        let (status, body) = get_json(router, "/api/ap-terms?due_days=thirty").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Invalid AP term query"));
        assert!(exec.calls().is_empty());
    }

    #[tokio::test]
    async fn test_limit_above_max_is_400() {
        let (router, _) = app(terms());
        let (status, body) = get_json(router, "/api/ap-terms?limit=1001").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("1000"));
    }

    #[tokio::test]
    async fn test_page_beyond_offset_range_is_400() {
        let (router, exec) = app(terms());
        let (status, body) =
            get_json(router, "/api/ap-terms?page=9223372036854775807&limit=10").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], json!("Invalid AP term query"));
        assert!(body["error"].as_str().unwrap().contains("out of range"));
        assert!(exec.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_400() {
        let (router, _) = app(terms());
        let (status, _) = get_json(router, "/api/ap-terms/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_record_is_404_envelope() {
        let (router, _) = app(MockExecutor::new(|_| Ok(Vec::new())));
        let (status, body) = get_json(router, "/api/branch/code/B404").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"success": false, "message": "Branch not found", "error": "code=B404"})
        );
    }

    #[tokio::test]
    async fn test_undeclared_lookup_field_is_404() {
        let (router, exec) = app(MockExecutor::new(|_| Ok(Vec::new())));
        let (status, body) = get_json(router, "/api/branch/phone/555").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], json!("Branch lookup not supported"));
        assert!(exec.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500_without_details_beyond_message() {
        let (router, _) = app(MockExecutor::failing("ORA-01017: invalid username/password"));
        let (status, body) = get_json(router, "/api/currency").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], json!("Failed to retrieve Currency records"));
        assert_eq!(body["error"], json!("ORA-01017: invalid username/password"));
    }

    #[tokio::test]
    async fn test_health_lists_entities_and_cache_counters() {
        let (router, _) = app(terms());
        let (status, body) = get_json(router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("ok"));
        assert_eq!(body["entities"].as_array().unwrap().len(), 12);
        assert_eq!(body["cache"], json!({"hits": 0, "misses": 0, "errors": 0}));
    }

    #[tokio::test]
    async fn test_response_carries_request_id() {
        let (router, _) = app(terms());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/ap-terms")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-42");
    }
}
