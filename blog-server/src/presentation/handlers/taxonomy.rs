use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use blog_content::sort_by_article_count;
use validator::Validate;

use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::dto::{PageQuery, PostsPageDto, TermSummaryDto};
use crate::presentation::extract::ApiQuery;

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "taxonomy",
    responses(
        (status = 200, description = "Categories, most articles first", body = [TermSummaryDto])
    )
)]
pub(crate) async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<TermSummaryDto>>)> {
    let mut categories = state.content.list_categories().await;
    sort_by_article_count(&mut categories);

    let body = categories.into_iter().map(TermSummaryDto::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "taxonomy",
    responses(
        (status = 200, description = "Tags, most articles first", body = [TermSummaryDto])
    )
)]
pub(crate) async fn list_tags(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<TermSummaryDto>>)> {
    let mut tags = state.content.list_tags().await;
    sort_by_article_count(&mut tags);

    let body = tags.into_iter().map(TermSummaryDto::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

#[utoipa::path(
    get,
    path = "/api/categories/{slug}/posts",
    tag = "taxonomy",
    params(
        ("slug" = String, Path, description = "Category slug"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Posts in category, newest first", body = PostsPageDto),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn list_category_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<(StatusCode, Json<PostsPageDto>)> {
    query.validate()?;

    let page = state
        .content
        .list_posts_by_category(&slug, query.page(), query.page_size())
        .await;

    Ok((StatusCode::OK, Json(PostsPageDto::from(page))))
}

#[utoipa::path(
    get,
    path = "/api/tags/{slug}/posts",
    tag = "taxonomy",
    params(
        ("slug" = String, Path, description = "Tag slug"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Posts with tag, newest first", body = PostsPageDto),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn list_tag_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<(StatusCode, Json<PostsPageDto>)> {
    query.validate()?;

    let page = state
        .content
        .list_posts_by_tag(&slug, query.page(), query.page_size())
        .await;

    Ok((StatusCode::OK, Json(PostsPageDto::from(page))))
}
