use axum::body::to_bytes;
use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use tracing::Instrument;
use uuid::Uuid;

use crate::shared::format::format_number;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware для логирования HTTP запросов
///
/// Открывает span `http_request` (method, path, request_id): события
/// сервисов внутри запроса наследуют его поля. Итоговая строка:
/// - Timestamp (MSK, UTC+3)
/// - Длительность (ms)
/// - Размер ответа (форматированный)
/// - Статус код
/// - Метод и путь
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id
    );

    let response = next.run(req).instrument(span.clone()).await;
    let (mut parts, body) = response.into_parts();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        parts.headers.insert(REQUEST_ID_HEADER, value);
    }

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            let timestamp = Utc::now() + chrono::Duration::hours(3);
            span.in_scope(|| {
                tracing::warn!(
                    "{} | {:>5}ms | {:>12} | {} {:>6} {} ({})",
                    timestamp.format("%H:%M:%S"),
                    start.elapsed().as_millis(),
                    "error",
                    parts.status.as_u16(),
                    method,
                    path,
                    e
                )
            });
            return Response::from_parts(parts, Body::default());
        }
    };

    let timestamp = Utc::now() + chrono::Duration::hours(3);
    span.in_scope(|| {
        tracing::info!(
            "{} | {:>5}ms | {:>12} | {} {:>6} {}",
            timestamp.format("%H:%M:%S"),
            start.elapsed().as_millis(),
            format_number(bytes.len()),
            parts.status.as_u16(),
            method,
            path
        )
    });

    // Создаем новый ответ с прочитанным телом
    Response::from_parts(parts, Body::from(bytes))
}
