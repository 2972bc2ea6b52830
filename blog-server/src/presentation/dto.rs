use blog_content::{
    Author, Category, CategorySummary, Comment, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Pagination,
    Post, PostsPage, Tag, TagSummary,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

#[derive(Debug, Default, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct PageQuery {
    /// Номер страницы, с 1.
    #[validate(range(min = 1))]
    pub(crate) page: Option<u32>,
    /// Размер страницы (1..=100).
    #[validate(range(min = 1, max = 100))]
    pub(crate) page_size: Option<u32>,
}

impl PageQuery {
    pub(crate) fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub(crate) fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct SearchQuery {
    /// Подстрока для поиска в заголовке или описании.
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub(crate) q: String,
    #[validate(range(min = 1))]
    pub(crate) page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub(crate) page_size: Option<u32>,
}

impl SearchQuery {
    pub(crate) fn paging(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateCommentDto {
    #[validate(range(min = 1))]
    pub(crate) post_id: i64,
    #[validate(range(min = 1))]
    pub(crate) author_id: i64,
    #[validate(length(min = 1, max = 2000), custom(function = "not_blank"))]
    pub(crate) content: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthorDto {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) avatar_url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryDto {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) slug: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TagDto {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) slug: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CommentDto {
    pub(crate) id: i64,
    pub(crate) content: String,
    pub(crate) author: AuthorDto,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) slug: String,
    pub(crate) description: String,
    pub(crate) content: String,
    pub(crate) published_at: DateTime<Utc>,
    pub(crate) cover_url: String,
    pub(crate) author: AuthorDto,
    pub(crate) category: Option<CategoryDto>,
    pub(crate) tags: Vec<TagDto>,
    pub(crate) comments: Vec<CommentDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaginationDto {
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) page_count: u32,
    pub(crate) total: u64,
    pub(crate) has_previous: bool,
    pub(crate) has_next: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PostsPageDto {
    pub(crate) posts: Vec<PostDto>,
    pub(crate) pagination: PaginationDto,
}

/// Категория или тег вместе с числом статей.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TermSummaryDto {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) slug: String,
    pub(crate) article_count: u32,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
            email: author.email,
            avatar_url: author.avatar_url,
        }
    }
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
        }
    }
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
        }
    }
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            author: comment.author.into(),
            created_at: comment.created_at,
        }
    }
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            description: post.description,
            content: post.content,
            published_at: post.published_at,
            cover_url: post.cover_url,
            author: post.author.into(),
            category: post.category.map(CategoryDto::from),
            tags: post.tags.into_iter().map(TagDto::from).collect(),
            comments: post.comments.into_iter().map(CommentDto::from).collect(),
        }
    }
}

impl From<Pagination> for PaginationDto {
    fn from(pagination: Pagination) -> Self {
        Self {
            has_previous: pagination.has_previous(),
            has_next: pagination.has_next(),
            page: pagination.page,
            page_size: pagination.page_size,
            page_count: pagination.page_count,
            total: pagination.total,
        }
    }
}

impl From<PostsPage> for PostsPageDto {
    fn from(page: PostsPage) -> Self {
        Self {
            posts: page.posts.into_iter().map(PostDto::from).collect(),
            pagination: page.pagination.into(),
        }
    }
}

impl From<CategorySummary> for TermSummaryDto {
    fn from(summary: CategorySummary) -> Self {
        Self {
            id: summary.category.id,
            name: summary.category.name,
            slug: summary.category.slug,
            article_count: summary.article_count,
        }
    }
}

impl From<TagSummary> for TermSummaryDto {
    fn from(summary: TagSummary) -> Self {
        Self {
            id: summary.tag.id,
            name: summary.tag.name,
            slug: summary.tag.slug,
            article_count: summary.article_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_applies_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), DEFAULT_PAGE_SIZE);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn page_query_rejects_out_of_range_values() {
        let zero_size = PageQuery {
            page: Some(1),
            page_size: Some(0),
        };
        assert!(zero_size.validate().is_err());

        let too_large = PageQuery {
            page: Some(1),
            page_size: Some(101),
        };
        assert!(too_large.validate().is_err());

        let zero_page = PageQuery {
            page: Some(0),
            page_size: None,
        };
        assert!(zero_page.validate().is_err());
    }

    #[test]
    fn create_comment_rejects_blank_content() {
        let dto = CreateCommentDto {
            post_id: 1,
            author_id: 1,
            content: "   ".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn search_query_rejects_long_queries() {
        let dto = SearchQuery {
            q: "a".repeat(201),
            page: None,
            page_size: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn pagination_dto_carries_navigation_flags() {
        let dto = PaginationDto::from(Pagination::new(2, 10, 25));
        assert_eq!(dto.page_count, 3);
        assert!(dto.has_previous);
        assert!(dto.has_next);
    }
}
