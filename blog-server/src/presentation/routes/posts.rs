use axum::Router;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::comments::add_comment;
use crate::presentation::handlers::posts::{get_post, list_posts};
use crate::presentation::handlers::search::search_posts;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{slug}", get(get_post))
        .route("/search", get(search_posts))
        .route("/comments", post(add_comment))
}
