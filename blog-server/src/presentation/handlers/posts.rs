use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::dto::{PageQuery, PostDto, PostsPageDto};
use crate::presentation::extract::ApiQuery;

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(PageQuery),
    responses(
        (status = 200, description = "Posts listed, newest first", body = PostsPageDto),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<(StatusCode, Json<PostsPageDto>)> {
    query.validate()?;

    let page = state
        .content
        .list_posts(query.page(), query.page_size())
        .await;

    Ok((StatusCode::OK, Json(PostsPageDto::from(page))))
}

#[utoipa::path(
    get,
    path = "/api/posts/{slug}",
    tag = "posts",
    params(
        ("slug" = String, Path, description = "Post slug")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let post = state
        .content
        .get_post_by_slug(&slug)
        .await
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::OK, Json(PostDto::from(post))))
}
