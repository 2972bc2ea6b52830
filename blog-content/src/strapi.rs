//! Декодирование конвертов Strapi в доменные модели.
//!
//! Все значения по умолчанию подставляются здесь, один раз на границе:
//! обложка и аватар заменяются заглушками, автор заглушкой, пустые тексты
//! пустой строкой, имя термина без названия берётся из его slug. Один
//! неполный вложенный объект не ломает разбор всего конверта.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::error::ContentResult;
use crate::models::{
    Author, Category, CategorySummary, Comment, DEFAULT_AUTHOR_NAME, DEFAULT_AVATAR_URL,
    DEFAULT_COVER_URL, Pagination, Post, PostsPage, Tag, TagSummary,
};

#[derive(Debug, Deserialize)]
struct EnvelopeDto<T> {
    data: T,
    meta: Option<MetaDto>,
}

#[derive(Debug, Deserialize)]
struct MetaDto {
    pagination: Option<PaginationDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaginationDto {
    page: Option<u32>,
    page_size: Option<u32>,
    total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct EntityDto<A> {
    id: i64,
    attributes: A,
}

/// Связь "к одному": `{ "data": {...} | null }`.
#[derive(Debug, Deserialize)]
struct OneDto<T> {
    data: Option<T>,
}

/// Связь "ко многим": `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
struct ManyDto<T> {
    data: Option<Vec<T>>,
}

impl<T> ManyDto<T> {
    fn into_vec(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct MediaDto {
    #[serde(default)]
    attributes: MediaAttributesDto,
}

#[derive(Debug, Default, Deserialize)]
struct MediaAttributesDto {
    url: Option<String>,
}

impl MediaDto {
    fn into_url(self) -> Option<String> {
        self.attributes.url.filter(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AvatarDto {
    Url(String),
    Media(OneDto<MediaDto>),
}

#[derive(Debug, Deserialize)]
struct AuthorAttributesDto {
    name: Option<String>,
    email: Option<String>,
    avatar: Option<AvatarDto>,
}

#[derive(Debug, Deserialize)]
struct TermAttributesDto {
    name: Option<String>,
    slug: Option<String>,
    articles: Option<ManyDto<IgnoredAny>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentAttributesDto {
    content: Option<String>,
    created_at: Option<DateTime<Utc>>,
    author: Option<OneDto<EntityDto<AuthorAttributesDto>>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticleAttributesDto {
    title: Option<String>,
    slug: Option<String>,
    description: Option<String>,
    content: Option<String>,
    published_at: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    cover: Option<OneDto<MediaDto>>,
    author: Option<OneDto<EntityDto<AuthorAttributesDto>>>,
    category: Option<OneDto<EntityDto<TermAttributesDto>>>,
    tags: Option<ManyDto<EntityDto<TermAttributesDto>>>,
    comments: Option<ManyDto<EntityDto<CommentAttributesDto>>>,
}

impl From<EntityDto<AuthorAttributesDto>> for Author {
    fn from(value: EntityDto<AuthorAttributesDto>) -> Self {
        let avatar_url = match value.attributes.avatar {
            Some(AvatarDto::Url(url)) if !url.is_empty() => url,
            Some(AvatarDto::Media(OneDto { data: Some(media) })) => media
                .into_url()
                .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
            _ => DEFAULT_AVATAR_URL.to_string(),
        };

        Self {
            id: value.id,
            name: value
                .attributes
                .name
                .unwrap_or_else(|| DEFAULT_AUTHOR_NAME.to_string()),
            email: value.attributes.email.unwrap_or_default(),
            avatar_url,
        }
    }
}

impl TermAttributesDto {
    /// Без имени термин показывается по slug.
    fn into_name_and_slug(self) -> (String, String) {
        let slug = self.slug.unwrap_or_default();
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| slug.clone());
        (name, slug)
    }
}

impl From<EntityDto<TermAttributesDto>> for Category {
    fn from(value: EntityDto<TermAttributesDto>) -> Self {
        let (name, slug) = value.attributes.into_name_and_slug();
        Self {
            id: value.id,
            name,
            slug,
        }
    }
}

impl From<EntityDto<TermAttributesDto>> for Tag {
    fn from(value: EntityDto<TermAttributesDto>) -> Self {
        let (name, slug) = value.attributes.into_name_and_slug();
        Self {
            id: value.id,
            name,
            slug,
        }
    }
}

impl From<EntityDto<TermAttributesDto>> for CategorySummary {
    fn from(value: EntityDto<TermAttributesDto>) -> Self {
        let article_count = count_articles(value.attributes.articles.as_ref());
        Self {
            category: Category::from(value),
            article_count,
        }
    }
}

impl From<EntityDto<TermAttributesDto>> for TagSummary {
    fn from(value: EntityDto<TermAttributesDto>) -> Self {
        let article_count = count_articles(value.attributes.articles.as_ref());
        Self {
            tag: Tag::from(value),
            article_count,
        }
    }
}

impl From<EntityDto<CommentAttributesDto>> for Comment {
    fn from(value: EntityDto<CommentAttributesDto>) -> Self {
        Self {
            id: value.id,
            content: value.attributes.content.unwrap_or_default(),
            author: decode_author(value.attributes.author),
            created_at: value.attributes.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        }
    }
}

impl From<EntityDto<ArticleAttributesDto>> for Post {
    fn from(value: EntityDto<ArticleAttributesDto>) -> Self {
        let attrs = value.attributes;
        let published_at = attrs
            .published_at
            .or(attrs.created_at)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let cover_url = attrs
            .cover
            .and_then(|cover| cover.data)
            .and_then(MediaDto::into_url)
            .unwrap_or_else(|| DEFAULT_COVER_URL.to_string());

        Self {
            id: value.id,
            title: attrs.title.unwrap_or_default(),
            slug: attrs.slug.unwrap_or_default(),
            description: attrs.description.unwrap_or_default(),
            content: attrs.content.unwrap_or_default(),
            published_at,
            cover_url,
            author: decode_author(attrs.author),
            category: attrs
                .category
                .and_then(|category| category.data)
                .map(Category::from),
            tags: attrs
                .tags
                .map(ManyDto::into_vec)
                .unwrap_or_default()
                .into_iter()
                .map(Tag::from)
                .collect(),
            comments: attrs
                .comments
                .map(ManyDto::into_vec)
                .unwrap_or_default()
                .into_iter()
                .map(Comment::from)
                .collect(),
        }
    }
}

fn decode_author(author: Option<OneDto<EntityDto<AuthorAttributesDto>>>) -> Author {
    author
        .and_then(|author| author.data)
        .map(Author::from)
        .unwrap_or_else(Author::placeholder)
}

fn count_articles(articles: Option<&ManyDto<IgnoredAny>>) -> u32 {
    articles
        .and_then(|articles| articles.data.as_ref())
        .map_or(0, |data| u32::try_from(data.len()).unwrap_or(u32::MAX))
}

/// Декодирует список статей. Если CMS не вернула `meta.pagination`,
/// пагинация строится по запрошенным параметрам и числу статей.
pub(crate) fn decode_posts_page(body: &str, page: u32, page_size: u32) -> ContentResult<PostsPage> {
    let envelope: EnvelopeDto<Vec<EntityDto<ArticleAttributesDto>>> = serde_json::from_str(body)?;
    let posts: Vec<Post> = envelope.data.into_iter().map(Post::from).collect();

    let meta = envelope.meta.and_then(|meta| meta.pagination);
    let pagination = match meta {
        Some(meta) => Pagination::new(
            meta.page.unwrap_or(page),
            meta.page_size.unwrap_or(page_size),
            meta.total.unwrap_or(posts.len() as u64),
        ),
        None => Pagination::new(page, page_size, posts.len() as u64),
    };

    Ok(PostsPage { posts, pagination })
}

pub(crate) fn decode_categories(body: &str) -> ContentResult<Vec<CategorySummary>> {
    let envelope: EnvelopeDto<Vec<EntityDto<TermAttributesDto>>> = serde_json::from_str(body)?;
    Ok(envelope.data.into_iter().map(CategorySummary::from).collect())
}

pub(crate) fn decode_tags(body: &str) -> ContentResult<Vec<TagSummary>> {
    let envelope: EnvelopeDto<Vec<EntityDto<TermAttributesDto>>> = serde_json::from_str(body)?;
    Ok(envelope.data.into_iter().map(TagSummary::from).collect())
}

pub(crate) fn decode_comment(body: &str) -> ContentResult<Comment> {
    let envelope: EnvelopeDto<EntityDto<CommentAttributesDto>> = serde_json::from_str(body)?;
    Ok(envelope.data.into())
}
