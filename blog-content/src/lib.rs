//! Слой доступа к контенту блога поверх headless CMS (Strapi).
//!
//! `ContentService` является единственной точкой входа для кода, который
//! рендерит страницы. Он ходит в CMS через `ContentSource` (в проде это
//! `StrapiClient`), разворачивает конверты Strapi в типизированные модели и
//! при сбоях подставляет резервные данные, поэтому его операции не
//! возвращают ошибок:
//! - лента, категории и теги: резервный набор из трёх статей;
//! - статья по slug: только резервная статья с тем же slug;
//! - поиск: пустая выдача;
//! - комментарий: локально собранный комментарий.
#![warn(missing_docs)]

mod error;
pub mod fallback;
mod http_client;
mod models;
mod query;
mod resilient;
mod service;
mod settings;
mod source;
mod strapi;

pub use error::{ContentError, ContentResult};
pub use http_client::StrapiClient;
pub use models::{
    ArticleCount, Author, Category, CategorySummary, Comment, DEFAULT_AUTHOR_NAME,
    DEFAULT_AVATAR_URL, DEFAULT_COVER_URL, NewComment, Pagination, Post, PostsPage, Tag,
    TagSummary, sort_by_article_count,
};
pub use query::{ArticleFilter, ArticleQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest};
pub use service::ContentService;
pub use settings::{ContentSettings, DEFAULT_API_URL};
pub use source::ContentSource;
