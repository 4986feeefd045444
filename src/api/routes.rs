//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::ApiDoc;
use super::handlers::{
    get_contract, get_contracts, get_summary, health, metrics_text, root, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    // Public read-only data proxy: any origin, method and header.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        // Health/metrics endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        // Spending endpoints
        .route("/api/summary", get(get_summary))
        .route("/api/contracts", get(get_contracts))
        .route("/api/contracts/:award_id", get(get_contract))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::spending::mock::{MockSpendingApi, RecordedCall};
    use crate::spending::request::{build_detail_request, build_search_request};

    fn app(mock: &MockSpendingApi) -> Router {
        create_router(AppState::new(Arc::new(mock.clone())))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn root_returns_liveness_message() {
        let (status, body) = get_json(app(&MockSpendingApi::new()), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "DefenseSpend API is live"}));
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let (status, body) = get_json(app(&MockSpendingApi::new()), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn contracts_builds_search_body_from_query() {
        let mock = MockSpendingApi::with_json(json!({"results": []}));

        let (status, _) =
            get_json(app(&mock), "/api/contracts?fiscal_year=2023&limit=10&page=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            mock.calls(),
            vec![RecordedCall::Search(build_search_request(2023, 10, 1, Vec::new()))]
        );
        let calls = mock.calls();
        let RecordedCall::Search(search) = &calls[0] else {
            panic!("expected a search call");
        };
        assert_eq!(
            serde_json::to_value(&search.filters).unwrap()["time_period"],
            json!([{"start_date": "2023-01-01", "end_date": "2023-12-31"}])
        );
        assert_eq!(search.filters.award_type_codes, vec!["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn contracts_passes_upstream_json_through() {
        let upstream = json!({
            "page_metadata": {"page": 1, "hasNext": true},
            "results": [{"Award ID": "W91", "Award Amount": 1250000.5}],
            "limit": 50
        });
        let mock = MockSpendingApi::with_json(upstream.clone());

        let (status, body) = get_json(app(&mock), "/api/contracts").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, upstream);
    }

    #[tokio::test]
    async fn upstream_status_becomes_500_with_code_in_detail() {
        for uri in ["/api/summary", "/api/contracts", "/api/contracts/CONT_AWD_1"] {
            for code in [404u16, 500] {
                let mock = MockSpendingApi::with_status(code, "upstream said no");

                let (status, body) = get_json(app(&mock), uri).await;

                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
                let detail = body["detail"].as_str().unwrap();
                assert!(detail.contains(&code.to_string()), "{uri}: {detail}");
                assert_eq!(mock.call_count(), 1, "{uri}");
            }
        }
    }

    #[tokio::test]
    async fn malformed_numbers_are_422_without_upstream_call() {
        let mock = MockSpendingApi::new();

        for uri in [
            "/api/contracts?fiscal_year=twenty",
            "/api/contracts?limit=abc",
            "/api/summary?fiscal_year=20.5",
            "/api/summary?agency_type=spending",
        ] {
            let (status, body) = get_json(app(&mock), uri).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert!(body["detail"].is_string(), "{uri}: {body}");
        }

        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn dot_award_ids_are_422_without_upstream_call() {
        let mock = MockSpendingApi::new();

        for uri in ["/api/contracts/.", "/api/contracts/%2E%2E", "/api/contracts/%2e"] {
            let (status, body) = get_json(app(&mock), uri).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert!(body["detail"].as_str().unwrap().contains("award_id"), "{uri}");
        }

        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn invalid_fiscal_year_never_reaches_upstream() {
        let mock = MockSpendingApi::new();

        for uri in ["/api/contracts?fiscal_year=1999", "/api/summary?fiscal_year=2101"] {
            let (status, body) = get_json(app(&mock), uri).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(body["detail"].as_str().unwrap().contains("fiscal_year"));
        }

        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn summary_collects_plain_and_bracketed_award_type_codes() {
        let mock = MockSpendingApi::new();

        let (status, _) = get_json(
            app(&mock),
            "/api/summary?toptier_code=097&agency_type=funding&award_type_codes=A&award_type_codes%5B%5D=B",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let calls = mock.calls();
        let RecordedCall::Summary(summary) = &calls[0] else {
            panic!("expected a summary call");
        };
        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            json!({
                "toptier_code": "097",
                "fiscal_year": 2023,
                "agency_type": "funding",
                "award_type_codes": ["A", "B"]
            })
        );
    }

    #[tokio::test]
    async fn contracts_collects_repeated_award_type_codes() {
        let mock = MockSpendingApi::new();

        let (status, _) = get_json(
            app(&mock),
            "/api/contracts?award_type_codes=A&award_type_codes=B&limit=5",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            mock.calls(),
            vec![RecordedCall::Search(build_search_request(
                2023,
                5,
                1,
                vec!["A".into(), "B".into()]
            ))]
        );
    }

    #[tokio::test]
    async fn contract_detail_forwards_award_id() {
        let mock = MockSpendingApi::with_json(json!({"id": 42}));

        let (status, body) = get_json(app(&mock), "/api/contracts/CONT_AWD_123").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 42}));
        assert_eq!(
            mock.calls(),
            vec![RecordedCall::Detail(build_detail_request("CONT_AWD_123"))]
        );
    }

    #[tokio::test]
    async fn metrics_endpoint_is_404_when_disabled() {
        let response = app(&MockSpendingApi::new())
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let response = app(&MockSpendingApi::new())
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("origin", "https://example.org")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn openapi_document_lists_spending_routes() {
        let (status, body) = get_json(app(&MockSpendingApi::new()), "/api-docs/openapi.json").await;

        assert_eq!(status, StatusCode::OK);
        let paths = body["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/summary"));
        assert!(paths.contains_key("/api/contracts"));
        assert!(paths.contains_key("/api/contracts/{award_id}"));
    }
}
