use async_trait::async_trait;

use crate::error::ContentResult;
use crate::models::{CategorySummary, Comment, NewComment, PostsPage, TagSummary};
use crate::query::ArticleQuery;

/// Источник контента: живая CMS или подмена в тестах.
///
/// Реализации возвращают ошибки как есть; решение о подстановке резервных
/// данных принимает `ContentService`.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Статьи по запросу, с пагинацией CMS.
    async fn fetch_articles(&self, query: &ArticleQuery) -> ContentResult<PostsPage>;
    /// Все категории с числом статей.
    async fn fetch_categories(&self) -> ContentResult<Vec<CategorySummary>>;
    /// Все теги с числом статей.
    async fn fetch_tags(&self) -> ContentResult<Vec<TagSummary>>;
    /// Создаёт комментарий.
    async fn create_comment(&self, input: &NewComment) -> ContentResult<Comment>;
}
