use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::handlers::taxonomy::{
    list_categories, list_category_posts, list_tag_posts, list_tags,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{slug}/posts", get(list_category_posts))
        .route("/tags", get(list_tags))
        .route("/tags/{slug}/posts", get(list_tag_posts))
}
