use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::settings::Settings;
use crate::presentation::middleware::cors::apply_cors;
use crate::presentation::middleware::limits::apply_limits;
use crate::presentation::middleware::trace::apply_trace;
use crate::presentation::openapi::ApiDoc;
use crate::presentation::{AppState, routes};

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = apply_limits(
        build_router(state),
        settings.http_request_body_limit_bytes,
        settings.http_concurrency_limit,
    );
    let app = apply_trace(app);
    let app = apply_cors(app, settings)?;

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!(
        addr = %settings.http_addr,
        content_api = %settings.content.api_url,
        "HTTP server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

pub(crate) fn build_router(state: AppState) -> Router {
    routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use blog_content::{ContentService, ContentSettings, StrapiClient, fallback};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn router_for(api_url: String) -> Router {
        let mut settings = ContentSettings::new(api_url);
        settings.connect_timeout = Duration::from_millis(500);
        settings.request_timeout = Duration::from_secs(1);
        let client = StrapiClient::new(&settings).expect("client must build");
        build_router(AppState::new(Arc::new(ContentService::new(client))))
    }

    fn unreachable_router() -> Router {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("must bind");
        let addr = listener.local_addr().expect("must have addr");
        drop(listener);
        router_for(format!("http://{addr}"))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.expect("router must respond");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body must be json")
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request must build")
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let (status, body) = send(unreachable_router(), get("/healthz")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn posts_fall_back_when_content_service_is_down() {
        let (status, body) = send(unreachable_router(), get("/api/posts")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["posts"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["pagination"]["total"], 3);
        assert_eq!(body["pagination"]["page"], 1);
    }

    #[tokio::test]
    async fn fallback_post_is_served_by_slug() {
        let slug = fallback::posts()[0].slug.clone();
        let (status, body) = send(unreachable_router(), get(&format!("/api/posts/{slug}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slug"], slug.as_str());
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let (status, body) = send(unreachable_router(), get("/api/posts/no-such-post")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not found");
    }

    #[tokio::test]
    async fn zero_page_size_is_rejected() {
        let (status, body) = send(unreachable_router(), get("/api/posts?page_size=0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn malformed_query_is_rejected_with_json_error() {
        let (status, body) = send(unreachable_router(), get("/api/posts?page=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = send(unreachable_router(), get("/api/search")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn malformed_comment_body_is_rejected_with_json_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/comments")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"post_id\": \"one\"}"))
            .expect("request must build");

        let (status, body) = send(unreachable_router(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn search_without_matches_never_returns_fallback_posts() {
        let (status, body) = send(unreachable_router(), get("/api/search?q=aws")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["posts"].as_array().map(Vec::len), Some(0));
        assert_eq!(body["pagination"]["total"], 0);
    }

    #[tokio::test]
    async fn tags_are_sorted_by_article_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "id": 1, "attributes": { "name": "ML", "slug": "ml", "articles": { "data": [ { "id": 2 } ] } } },
                    { "id": 2, "attributes": { "name": "AWS", "slug": "aws", "articles": { "data": [ { "id": 1 }, { "id": 3 } ] } } }
                ]
            })))
            .mount(&server)
            .await;

        let (status, body) = send(router_for(server.uri()), get("/api/tags")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["slug"], "aws");
        assert_eq!(body[0]["article_count"], 2);
        assert_eq!(body[1]["slug"], "ml");
    }

    #[tokio::test]
    async fn comment_is_accepted_locally_when_write_fails() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/comments")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "post_id": 1, "author_id": 2, "content": "Great read" }).to_string(),
            ))
            .expect("request must build");

        let (status, body) = send(unreachable_router(), request).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["content"], "Great read");
        assert_eq!(body["author"]["name"], fallback::LOCAL_COMMENT_AUTHOR);
    }

    #[tokio::test]
    async fn blank_comment_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/comments")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "post_id": 1, "author_id": 2, "content": "  " }).to_string(),
            ))
            .expect("request must build");

        let (status, _) = send(unreachable_router(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn openapi_document_lists_content_routes() {
        let (status, body) = send(unreachable_router(), get("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/posts/{slug}"].is_object());
        assert!(body["paths"]["/api/comments"].is_object());
    }
}
