use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Обложка, если у статьи нет изображения.
pub const DEFAULT_COVER_URL: &str = "/placeholder.svg?key=default-post";
/// Аватар, если у автора нет изображения.
pub const DEFAULT_AVATAR_URL: &str = "/diverse-avatars.png";
/// Имя автора, если связь `author` не заполнена.
pub const DEFAULT_AUTHOR_NAME: &str = "Author";

/// Автор статьи или комментария.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Идентификатор автора в CMS.
    pub id: i64,
    /// Отображаемое имя.
    pub name: String,
    /// Email (может быть пустым).
    pub email: String,
    /// URL аватара.
    pub avatar_url: String,
}

impl Author {
    /// Автор-заглушка для статей без связи `author`.
    pub fn placeholder() -> Self {
        Self {
            id: 0,
            name: DEFAULT_AUTHOR_NAME.to_string(),
            email: String::new(),
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
        }
    }
}

/// Категория статьи.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Идентификатор категории.
    pub id: i64,
    /// Название.
    pub name: String,
    /// Уникальный slug.
    pub slug: String,
}

/// Тег статьи.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Идентификатор тега.
    pub id: i64,
    /// Название.
    pub name: String,
    /// Уникальный slug.
    pub slug: String,
}

/// Комментарий к статье.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Идентификатор комментария.
    pub id: i64,
    /// Текст комментария.
    pub content: String,
    /// Автор комментария.
    pub author: Author,
    /// Время создания (UTC).
    pub created_at: DateTime<Utc>,
}

/// Статья блога.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Внутренний идентификатор CMS.
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// Уникальный slug, внешний ключ поиска статьи.
    pub slug: String,
    /// Краткое описание.
    pub description: String,
    /// Готовый HTML-фрагмент содержимого.
    pub content: String,
    /// Время публикации (UTC).
    pub published_at: DateTime<Utc>,
    /// URL обложки.
    pub cover_url: String,
    /// Автор.
    pub author: Author,
    /// Категория, если задана.
    pub category: Option<Category>,
    /// Теги.
    pub tags: Vec<Tag>,
    /// Комментарии (заполняются только при запросе статьи по slug).
    pub comments: Vec<Comment>,
}

impl Post {
    /// Есть ли у статьи тег с указанным slug.
    pub fn has_tag(&self, slug: &str) -> bool {
        self.tags.iter().any(|tag| tag.slug == slug)
    }

    /// Относится ли статья к категории с указанным slug.
    pub fn in_category(&self, slug: &str) -> bool {
        self.category
            .as_ref()
            .is_some_and(|category| category.slug == slug)
    }
}

/// Категория с количеством статей.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Категория.
    pub category: Category,
    /// Количество связанных статей.
    pub article_count: u32,
}

/// Тег с количеством статей.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSummary {
    /// Тег.
    pub tag: Tag,
    /// Количество связанных статей.
    pub article_count: u32,
}

/// Сущность таксономии, для которой известно число статей.
pub trait ArticleCount {
    /// Количество связанных статей.
    fn article_count(&self) -> u32;
}

impl ArticleCount for CategorySummary {
    fn article_count(&self) -> u32 {
        self.article_count
    }
}

impl ArticleCount for TagSummary {
    fn article_count(&self) -> u32 {
        self.article_count
    }
}

/// Сортирует категории/теги по убыванию количества статей.
///
/// Порядок среди равных не гарантируется вызывающим кодом.
pub fn sort_by_article_count<T: ArticleCount>(items: &mut [T]) {
    items.sort_by(|a, b| b.article_count().cmp(&a.article_count()));
}

/// Параметры пагинации выдачи.
///
/// `page_count = ceil(total / page_size)`, для пустой выдачи это `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Номер страницы, начиная с 1.
    pub page: u32,
    /// Размер страницы.
    pub page_size: u32,
    /// Общее количество страниц.
    pub page_count: u32,
    /// Общее количество элементов.
    pub total: u64,
}

impl Pagination {
    /// Строит конверт пагинации по общему числу элементов.
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        let page_count = if page_size == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
        };

        Self {
            page: page.max(1),
            page_size,
            page_count,
            total,
        }
    }

    /// Конверт пустой выдачи.
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self::new(page, page_size, 0)
    }

    /// Есть ли страница перед текущей.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Есть ли страница после текущей.
    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

/// Страница статей вместе с пагинацией.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsPage {
    /// Статьи текущей страницы.
    pub posts: Vec<Post>,
    /// Пагинация.
    pub pagination: Pagination,
}

impl PostsPage {
    /// Пустая страница.
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            posts: Vec::new(),
            pagination: Pagination::empty(page, page_size),
        }
    }

    /// Нарезает уже загруженный в память список на страницу.
    pub fn paginate(posts: Vec<Post>, page: u32, page_size: u32) -> Self {
        let pagination = Pagination::new(page, page_size, posts.len() as u64);
        let skip = (pagination.page as usize - 1).saturating_mul(page_size as usize);
        let posts = posts
            .into_iter()
            .skip(skip)
            .take(page_size as usize)
            .collect();

        Self { posts, pagination }
    }

    /// Сортирует статьи по времени публикации, новые первыми.
    pub(crate) fn sort_newest_first(&mut self) {
        self.posts
            .sort_by(|a, b| b.published_at.cmp(&a.published_at));
    }
}

/// Новый комментарий для отправки в CMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    /// Идентификатор статьи.
    pub post_id: i64,
    /// Идентификатор автора.
    pub author_id: i64,
    /// Текст комментария.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    #[test]
    fn pagination_rounds_page_count_up() {
        let pagination = Pagination::new(1, 10, 21);
        assert_eq!(pagination.page_count, 3);
        assert!(pagination.has_next());
        assert!(!pagination.has_previous());
    }

    #[test]
    fn empty_pagination_has_zero_pages() {
        let pagination = Pagination::empty(1, 10);
        assert_eq!(pagination.total, 0);
        assert_eq!(pagination.page_count, 0);
        assert!(!pagination.has_next());
    }

    #[test]
    fn paginate_slices_requested_page() {
        let posts = (1..=5).map(sample_post).collect::<Vec<_>>();

        let page = PostsPage::paginate(posts, 2, 2);
        assert_eq!(page.pagination.page, 2);
        assert_eq!(page.pagination.total, 5);
        assert_eq!(page.pagination.page_count, 3);
        let ids: Vec<i64> = page.posts.iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn paginate_past_the_end_returns_no_posts() {
        let posts = (1..=3).map(sample_post).collect::<Vec<_>>();

        let page = PostsPage::paginate(posts, 5, 10);
        assert!(page.posts.is_empty());
        assert_eq!(page.pagination.page, 5);
        assert_eq!(page.pagination.total, 3);
    }

    #[test]
    fn sort_newest_first_orders_by_published_at() {
        let mut page = PostsPage::paginate((1..=3).map(sample_post).collect(), 1, 10);
        page.sort_newest_first();
        let ids: Vec<i64> = page.posts.iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn sort_by_article_count_puts_largest_first() {
        let mut tags = vec![summary("a", 1), summary("b", 5), summary("c", 3)];
        sort_by_article_count(&mut tags);
        let counts: Vec<u32> = tags.iter().map(|tag| tag.article_count).collect();
        assert_eq!(counts, vec![5, 3, 1]);
    }

    #[test]
    fn post_membership_checks_use_slugs() {
        let mut post = sample_post(1);
        post.tags.push(Tag {
            id: 1,
            name: "AWS".to_string(),
            slug: "aws".to_string(),
        });
        post.category = Some(Category {
            id: 1,
            name: "AWS-DVA".to_string(),
            slug: "aws-dva".to_string(),
        });

        assert!(post.has_tag("aws"));
        assert!(!post.has_tag("AWS"));
        assert!(post.in_category("aws-dva"));
        assert!(!post.in_category("ml"));
    }

    fn summary(slug: &str, article_count: u32) -> TagSummary {
        TagSummary {
            tag: Tag {
                id: 0,
                name: slug.to_uppercase(),
                slug: slug.to_string(),
            },
            article_count,
        }
    }

    fn sample_post(id: i64) -> Post {
        let base = Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid ts");
        Post {
            id,
            title: format!("post {id}"),
            slug: format!("post-{id}"),
            description: String::new(),
            content: String::new(),
            published_at: base + Duration::days(id),
            cover_url: DEFAULT_COVER_URL.to_string(),
            author: Author::placeholder(),
            category: None,
            tags: Vec::new(),
            comments: Vec::new(),
        }
    }
}
