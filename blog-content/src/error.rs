use thiserror::Error;

/// Ошибки обращения к CMS.
///
/// Наружу из `ContentService` не выходят: сервис поглощает их и подставляет
/// резервные данные или пустой результат.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Ошибка HTTP-транспорта (`reqwest`): сеть, таймаут, TLS.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// CMS отклонила токен или токен не задан.
    #[error("unauthorized")]
    Unauthorized,

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Прочий не-2xx ответ CMS.
    #[error("unexpected status {status}: {message}")]
    Status {
        /// HTTP-статус ответа.
        status: reqwest::StatusCode,
        /// Сообщение из тела ошибки CMS или текст статуса.
        message: String,
    },

    /// Тело ответа не соответствует ожидаемому конверту.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Результат операций транспорта CMS.
pub type ContentResult<T> = Result<T, ContentError>;

impl ContentError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized
            }
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => {
                let message = message.unwrap_or_else(|| format!("http status {status}"));
                Self::Status { status, message }
            }
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
