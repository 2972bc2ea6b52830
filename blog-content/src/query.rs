/// Максимальный размер страницы, который принимает CMS.
pub const MAX_PAGE_SIZE: u32 = 100;
/// Размер страницы по умолчанию.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const LIST_POPULATE: &str = "cover,author,category,tags";
const DETAIL_POPULATE: &str = "cover,author,category,tags,comments.author";
const SORT_NEWEST_FIRST: &str = "publishedAt:desc";

/// Запрошенная страница выдачи.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Номер страницы, не меньше 1.
    pub page: u32,
    /// Размер страницы, `1..=MAX_PAGE_SIZE`.
    pub page_size: u32,
}

impl PageRequest {
    /// Нормализует параметры: `page >= 1`, `1 <= page_size <= MAX_PAGE_SIZE`.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Фильтр выборки статей.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleFilter {
    /// Все статьи.
    All,
    /// Точное совпадение slug статьи.
    Slug(String),
    /// Статьи категории с указанным slug.
    Category(String),
    /// Статьи с тегом с указанным slug.
    Tag(String),
    /// Подстрока в заголовке или описании без учёта регистра.
    Search(String),
}

/// Запрос статей к CMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    /// Фильтр выборки.
    pub filter: ArticleFilter,
    /// Страница выдачи.
    pub page: PageRequest,
}

impl ArticleQuery {
    /// Лента всех статей.
    pub fn all(page: PageRequest) -> Self {
        Self {
            filter: ArticleFilter::All,
            page,
        }
    }

    /// Статья по slug, вместе с комментариями.
    pub fn by_slug(slug: impl Into<String>) -> Self {
        Self {
            filter: ArticleFilter::Slug(slug.into()),
            page: PageRequest::default(),
        }
    }

    /// Статьи категории.
    pub fn by_category(slug: impl Into<String>, page: PageRequest) -> Self {
        Self {
            filter: ArticleFilter::Category(slug.into()),
            page,
        }
    }

    /// Статьи с тегом.
    pub fn by_tag(slug: impl Into<String>, page: PageRequest) -> Self {
        Self {
            filter: ArticleFilter::Tag(slug.into()),
            page,
        }
    }

    /// Полнотекстовый поиск по заголовку и описанию.
    pub fn search(query: impl Into<String>, page: PageRequest) -> Self {
        Self {
            filter: ArticleFilter::Search(query.into()),
            page,
        }
    }

    /// Параметры query string в формате фильтров Strapi.
    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(6);

        match &self.filter {
            ArticleFilter::All => {}
            ArticleFilter::Slug(slug) => {
                params.push(("filters[slug][$eq]".to_string(), slug.clone()));
                params.push(("populate".to_string(), DETAIL_POPULATE.to_string()));
                return params;
            }
            ArticleFilter::Category(slug) => {
                params.push(("filters[category][slug][$eq]".to_string(), slug.clone()));
            }
            ArticleFilter::Tag(slug) => {
                params.push(("filters[tags][slug][$eq]".to_string(), slug.clone()));
            }
            ArticleFilter::Search(query) => {
                params.push((
                    "filters[$or][0][title][$containsi]".to_string(),
                    query.clone(),
                ));
                params.push((
                    "filters[$or][1][description][$containsi]".to_string(),
                    query.clone(),
                ));
            }
        }

        params.push(("populate".to_string(), LIST_POPULATE.to_string()));
        params.push(("pagination[page]".to_string(), self.page.page.to_string()));
        params.push((
            "pagination[pageSize]".to_string(),
            self.page.page_size.to_string(),
        ));
        params.push(("sort".to_string(), SORT_NEWEST_FIRST.to_string()));
        params
    }
}

/// Параметры выборки всех категорий/тегов вместе со связанными статьями.
pub(crate) fn taxonomy_params() -> Vec<(String, String)> {
    vec![
        ("populate".to_string(), "articles".to_string()),
        ("pagination[pageSize]".to_string(), MAX_PAGE_SIZE.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn page_request_clamps_out_of_range_values() {
        assert_eq!(PageRequest::new(0, 0), PageRequest { page: 1, page_size: 1 });
        assert_eq!(
            PageRequest::new(3, 500),
            PageRequest {
                page: 3,
                page_size: MAX_PAGE_SIZE
            }
        );
    }

    #[test]
    fn list_query_sorts_newest_first_and_paginates() {
        let params = ArticleQuery::all(PageRequest::new(2, 9)).to_params();
        assert_eq!(param(&params, "populate"), Some(LIST_POPULATE));
        assert_eq!(param(&params, "pagination[page]"), Some("2"));
        assert_eq!(param(&params, "pagination[pageSize]"), Some("9"));
        assert_eq!(param(&params, "sort"), Some("publishedAt:desc"));
    }

    #[test]
    fn slug_query_populates_comments_without_pagination() {
        let params = ArticleQuery::by_slug("hello").to_params();
        assert_eq!(param(&params, "filters[slug][$eq]"), Some("hello"));
        assert_eq!(param(&params, "populate"), Some(DETAIL_POPULATE));
        assert!(param(&params, "pagination[page]").is_none());
    }

    #[test]
    fn search_query_matches_title_or_description() {
        let params = ArticleQuery::search("aws", PageRequest::default()).to_params();
        assert_eq!(param(&params, "filters[$or][0][title][$containsi]"), Some("aws"));
        assert_eq!(
            param(&params, "filters[$or][1][description][$containsi]"),
            Some("aws")
        );
    }

    #[test]
    fn taxonomy_queries_use_relation_filters() {
        let by_tag = ArticleQuery::by_tag("aws", PageRequest::default()).to_params();
        assert_eq!(param(&by_tag, "filters[tags][slug][$eq]"), Some("aws"));

        let by_category = ArticleQuery::by_category("ml", PageRequest::default()).to_params();
        assert_eq!(param(&by_category, "filters[category][slug][$eq]"), Some("ml"));
    }
}
