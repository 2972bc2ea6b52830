use axum::Router;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;

/// Лимит тела запроса и лимит одновременных запросов.
///
/// Семафор один на весь роутер, а не на каждый маршрут.
pub(crate) fn apply_limits(router: Router, body_limit: usize, concurrency_limit: usize) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(GlobalConcurrencyLimitLayer::new(concurrency_limit))
}
