use std::future::Future;

use tracing::warn;

use crate::error::ContentResult;

/// Выполняет живой вызов один раз и при неудаче возвращает подмену.
///
/// Подмена используется, если вызов вернул ошибку или если `empty_is_failure`
/// признал успешный результат непригодным. Повторных попыток нет.
pub(crate) async fn resilient<T, Fut, P, F>(
    operation: &'static str,
    live: Fut,
    empty_is_failure: P,
    fallback: F,
) -> T
where
    Fut: Future<Output = ContentResult<T>>,
    P: FnOnce(&T) -> bool,
    F: FnOnce() -> T,
{
    match live.await {
        Ok(value) if empty_is_failure(&value) => {
            warn!(operation, "content service returned no usable data, serving fallback");
            fallback()
        }
        Ok(value) => value,
        Err(err) => {
            warn!(operation, error = %err, "content service unavailable, serving fallback");
            fallback()
        }
    }
}

/// Пустой результат считается нормальным ответом.
pub(crate) fn never<T>(_: &T) -> bool {
    false
}
