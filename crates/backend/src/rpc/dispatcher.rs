//! Pattern table of the message listener: `<slug>.<op>` → entity operation

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use contracts::shared::rpc::{RpcRequest, RpcResponse};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;

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
use crate::domain::service;
use crate::shared::error::ApiError;
use crate::shared::query::entity::Entity;
use crate::shared::query::view::ViewDef;
use crate::shared::state::AppState;

pub const NO_HANDLER: &str = "There is no matching message handler";

type HandlerFuture = Pin<Box<dyn Future<Output = Result<Value, ApiError>> + Send>>;
type Handler = Box<dyn Fn(AppState, Value) -> HandlerFuture + Send + Sync>;

static PATTERNS: Lazy<HashMap<String, Handler>> = Lazy::new(|| {
    let mut table = HashMap::new();
    register::<ApTerms>(&mut table);
    register::<Branches>(&mut table);
    register::<Currencies>(&mut table);
    register::<Provinces>(&mut table);
    register::<PurchaseOrders>(&mut table);
    register::<SalesOrders>(&mut table);
    register::<SalesActivities>(&mut table);
    register::<SalesOrderTypes>(&mut table);
    register::<CoaExpenses>(&mut table);
    register::<ZxTaxes>(&mut table);
    register::<UserGrants>(&mut table);
    register::<Applications>(&mut table);
    table
});

fn register<E: Entity>(table: &mut HashMap<String, Handler>) {
    let slug = E::view().slug;

    table.insert(
        format!("{}.findAll", slug),
        Box::new(|state: AppState, data: Value| -> HandlerFuture {
            Box::pin(async move {
                let filter = filter_from::<E>(data)?;
                to_json(E::view(), service::list::<E>(&state, &filter).await?)
            })
        }),
    );
    table.insert(
        format!("{}.getCount", slug),
        Box::new(|state: AppState, data: Value| -> HandlerFuture {
            Box::pin(async move {
                let filter = filter_from::<E>(data)?;
                to_json(E::view(), service::count::<E>(&state, &filter).await?)
            })
        }),
    );
    table.insert(
        format!("{}.findById", slug),
        Box::new(|state: AppState, data: Value| -> HandlerFuture {
            Box::pin(async move {
                let id = scalar_arg(E::view(), &data, &["id"])?;
                to_json(E::view(), service::get_by_id::<E>(&state, &id).await?)
            })
        }),
    );

    for lookup in E::view().lookups {
        let field = lookup.field;
        table.insert(
            format!("{}.{}", slug, lookup.pattern),
            Box::new(move |state: AppState, data: Value| -> HandlerFuture {
                Box::pin(async move {
                    let value = scalar_arg(E::view(), &data, &["value", field])?;
                    to_json(E::view(), service::find_by::<E>(&state, field, &value).await?)
                })
            }),
        );
    }
}

/// Все зарегистрированные паттерны, по алфавиту
pub fn patterns() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = PATTERNS.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

/// Runs one request. Events (no `id`) are handled but never answered.
pub async fn dispatch(state: &AppState, request: RpcRequest) -> Option<RpcResponse> {
    let pattern = request.pattern_name().unwrap_or_default().to_string();
    let span = tracing::info_span!(
        "rpc_request",
        pattern = %pattern,
        id = request.id.as_deref().unwrap_or("-")
    );

    async move {
        let outcome = match PATTERNS.get(&pattern) {
            Some(handler) => handler(state.clone(), request.data).await,
            None => {
                tracing::warn!("no handler for pattern");
                Err(ApiError::not_found(
                    NO_HANDLER,
                    format!("pattern '{}'", pattern),
                ))
            }
        };

        let id = request.id?;
        Some(match outcome {
            Ok(value) => RpcResponse::ok(id, value),
            Err(e) => RpcResponse::err(id, failure_json(&e)),
        })
    }
    .instrument(span)
    .await
}

fn failure_json(e: &ApiError) -> Value {
    serde_json::to_value(e.failure()).unwrap_or_else(|_| Value::String(e.to_string()))
}

fn to_json<T: Serialize>(view: &ViewDef, body: T) -> Result<Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::upstream(format!("Failed to retrieve {} records", view.entity), e))
}

/// `null` → фильтр по умолчанию, объект → фильтр
fn filter_from<E: Entity>(data: Value) -> Result<E::Filter, ApiError> {
    match data {
        Value::Null => Ok(E::Filter::default()),
        Value::Object(_) => serde_json::from_value(data).map_err(|e| {
            ApiError::validation(format!("Invalid {} query", E::view().entity), e)
        }),
        other => Err(ApiError::validation(
            format!("Invalid {} query", E::view().entity),
            format!("expected an object, got {}", other),
        )),
    }
}

/// Bare string/number, or the first of `keys` found in an object
fn scalar_arg(view: &ViewDef, data: &Value, keys: &[&str]) -> Result<String, ApiError> {
    let found = match data {
        Value::Object(map) => keys.iter().find_map(|k| map.get(*k)),
        other => Some(other),
    };
    match found {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(ApiError::validation(
            format!("Invalid {} query", view.entity),
            format!("expected {} as a string or number", keys[0]),
        )),
    }
}
