use axum::extract::{FromRequest, FromRequestParts};

use crate::presentation::app_error::AppError;

/// `Query`, чьи ошибки разбора отдаются в формате `{ "error": ... }`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub(crate) struct ApiQuery<T>(pub(crate) T);

/// `Json`, чьи ошибки разбора отдаются в формате `{ "error": ... }`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub(crate) struct ApiJson<T>(pub(crate) T);
