use axum::{Json, extract::State, http::StatusCode};
use tracing::info;
use validator::Validate;

use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::dto::{CommentDto, CreateCommentDto};
use crate::presentation::extract::ApiJson;

#[utoipa::path(
    post,
    path = "/api/comments",
    tag = "comments",
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment accepted", body = CommentDto),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn add_comment(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<CreateCommentDto>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    dto.validate()?;

    let comment = state
        .content
        .add_comment(dto.post_id, dto.author_id, &dto.content)
        .await;
    info!(post_id = dto.post_id, comment_id = comment.id, "comment accepted");

    Ok((StatusCode::CREATED, Json(CommentDto::from(comment))))
}
