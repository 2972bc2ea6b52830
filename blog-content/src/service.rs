use chrono::Utc;

use crate::fallback;
use crate::models::{CategorySummary, Comment, NewComment, Post, PostsPage, TagSummary};
use crate::query::{ArticleQuery, PageRequest};
use crate::resilient::{never, resilient};
use crate::source::ContentSource;

/// Слой доступа к контенту для кода, который рендерит страницы.
///
/// Ни одна операция не возвращает ошибку: сбой CMS превращается в резервные
/// данные, пустую выдачу или `None` в зависимости от операции.
pub struct ContentService<S: ContentSource> {
    source: S,
}

impl<S: ContentSource> ContentService<S> {
    /// Создаёт сервис поверх источника контента.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Лента статей, новые первыми.
    ///
    /// При недоступности CMS возвращает резервные статьи, нарезанные на
    /// запрошенную страницу.
    pub async fn list_posts(&self, page: u32, page_size: u32) -> PostsPage {
        let page = PageRequest::new(page, page_size);
        let mut result = resilient(
            "list_posts",
            self.source.fetch_articles(&ArticleQuery::all(page)),
            never,
            || PostsPage::paginate(fallback::posts().to_vec(), page.page, page.page_size),
        )
        .await;
        result.sort_newest_first();
        result
    }

    /// Статья по slug вместе с комментариями.
    ///
    /// Если в CMS статьи нет или CMS недоступна, ищет slug среди резервных
    /// статей; `None` означает "страница не найдена".
    pub async fn get_post_by_slug(&self, slug: &str) -> Option<Post> {
        let slug = slug.trim();
        if slug.is_empty() {
            return None;
        }

        resilient(
            "get_post_by_slug",
            async {
                self.source
                    .fetch_articles(&ArticleQuery::by_slug(slug))
                    .await
                    .map(|page| page.posts.into_iter().next())
            },
            Option::is_none,
            || fallback::post_by_slug(slug),
        )
        .await
    }

    /// Все категории с числом статей.
    pub async fn list_categories(&self) -> Vec<CategorySummary> {
        resilient(
            "list_categories",
            self.source.fetch_categories(),
            never,
            fallback::categories,
        )
        .await
    }

    /// Все теги с числом статей.
    pub async fn list_tags(&self) -> Vec<TagSummary> {
        resilient("list_tags", self.source.fetch_tags(), never, fallback::tags).await
    }

    /// Статьи с тегом, новые первыми.
    ///
    /// Пустая живая выдача тоже заменяется резервными статьями, но только
    /// теми, у которых есть этот тег.
    pub async fn list_posts_by_tag(&self, tag_slug: &str, page: u32, page_size: u32) -> PostsPage {
        let tag_slug = tag_slug.trim();
        let page = PageRequest::new(page, page_size);
        let mut result = resilient(
            "list_posts_by_tag",
            self.source
                .fetch_articles(&ArticleQuery::by_tag(tag_slug, page)),
            has_no_matches,
            || PostsPage::paginate(fallback::posts_with_tag(tag_slug), page.page, page.page_size),
        )
        .await;
        result.sort_newest_first();
        result
    }

    /// Статьи категории, новые первыми.
    pub async fn list_posts_by_category(
        &self,
        category_slug: &str,
        page: u32,
        page_size: u32,
    ) -> PostsPage {
        let category_slug = category_slug.trim();
        let page = PageRequest::new(page, page_size);
        let mut result = resilient(
            "list_posts_by_category",
            self.source
                .fetch_articles(&ArticleQuery::by_category(category_slug, page)),
            never,
            || {
                PostsPage::paginate(
                    fallback::posts_in_category(category_slug),
                    page.page,
                    page.page_size,
                )
            },
        )
        .await;
        result.sort_newest_first();
        result
    }

    /// Поиск по подстроке в заголовке или описании без учёта регистра.
    ///
    /// Ноль совпадений считается нормальным ответом; при сбое CMS тоже возвращается
    /// пустая выдача, резервные статьи в поиск не подмешиваются. Пустой запрос
    /// даёт пустую выдачу без обращения к CMS.
    pub async fn search_posts(&self, query: &str, page: u32, page_size: u32) -> PostsPage {
        let query = query.trim();
        let page = PageRequest::new(page, page_size);
        if query.is_empty() {
            return PostsPage::empty(page.page, page.page_size);
        }

        let mut result = resilient(
            "search_posts",
            self.source
                .fetch_articles(&ArticleQuery::search(query, page)),
            never,
            || PostsPage::empty(page.page, page.page_size),
        )
        .await;
        result.sort_newest_first();
        result
    }

    /// Добавляет комментарий к статье.
    ///
    /// Если запись не удалась, возвращает локально собранный комментарий,
    /// чтобы UI мог сразу его показать. Повторной отправки нет.
    pub async fn add_comment(&self, post_id: i64, author_id: i64, content: &str) -> Comment {
        let input = NewComment {
            post_id,
            author_id,
            content: content.to_string(),
        };

        resilient(
            "add_comment",
            self.source.create_comment(&input),
            never,
            || fallback::local_comment(&input, Utc::now()),
        )
        .await
    }
}

fn has_no_matches(page: &PostsPage) -> bool {
    page.posts.is_empty() && page.pagination.total == 0
}
