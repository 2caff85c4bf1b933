//! HTTP adapters - REST API implementations.

pub mod checkout;

use axum::http::HeaderValue;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use checkout::{checkout_router, CheckoutAppState};

/// Build the full application router with tracing and CORS.
///
/// An empty `cors_origins` allows any origin.
pub fn app_router(state: CheckoutAppState, cors_origins: &[String]) -> Router {
    checkout_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origins)),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::chain::MockContractReader;
    use crate::adapters::price_feed::MockExchangeRateProvider;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::application::handlers::pricing::{GetCurrentPriceHandler, PriceConverter};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> CheckoutAppState {
        CheckoutAppState {
            payment_provider: Arc::new(MockPaymentProvider::new()),
            pricing: Arc::new(GetCurrentPriceHandler::new(
                Arc::new(MockContractReader::with_price(0.05)),
                PriceConverter::new(Arc::new(MockExchangeRateProvider::with_rate(3000.0))),
            )),
            publishable_key: "pk_test_x".to_string(),
            static_dir: "./static".into(),
        }
    }

    async fn allow_origin_for(origins: &[String], origin: &str) -> Option<String> {
        let response = app_router(state(), origins)
            .oneshot(
                Request::builder()
                    .uri("/config")
                    .header("origin", origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn cors_allows_any_origin_by_default() {
        let allowed = allow_origin_for(&[], "https://shop.example").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn cors_restricts_to_configured_origins() {
        let origins = vec!["https://genesis.re".to_string()];

        let allowed = allow_origin_for(&origins, "https://genesis.re").await;
        assert_eq!(allowed.as_deref(), Some("https://genesis.re"));

        let denied = allow_origin_for(&origins, "https://evil.example").await;
        assert!(denied.is_none());
    }
}
