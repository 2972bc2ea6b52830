use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::dto::{PostsPageDto, SearchQuery};
use crate::presentation::extract::ApiQuery;

#[utoipa::path(
    get,
    path = "/api/search",
    tag = "posts",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching posts, possibly none", body = PostsPageDto),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn search_posts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<(StatusCode, Json<PostsPageDto>)> {
    query.validate()?;
    let paging = query.paging();

    let page = state
        .content
        .search_posts(&query.q, paging.page(), paging.page_size())
        .await;

    Ok((StatusCode::OK, Json(PostsPageDto::from(page))))
}
