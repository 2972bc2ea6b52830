use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ContentError, ContentResult};
use crate::models::{CategorySummary, Comment, NewComment, PostsPage, TagSummary};
use crate::query::{ArticleQuery, taxonomy_params};
use crate::settings::ContentSettings;
use crate::source::ContentSource;
use crate::strapi;

const CACHE_CAPACITY: u64 = 1_000;

#[derive(Debug, Serialize)]
struct CreateCommentRequestDto<'a> {
    data: CreateCommentDataDto<'a>,
}

#[derive(Debug, Serialize)]
struct CreateCommentDataDto<'a> {
    article: i64,
    author: i64,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<ErrorBodyDto>,
}

#[derive(Debug, Deserialize)]
struct ErrorBodyDto {
    message: Option<String>,
}

/// HTTP-клиент REST API Strapi.
///
/// Успешные GET-ответы переиспользуются в течение `ContentSettings::cache_ttl`
/// (ключом служит полный URL запроса), явной инвалидации нет.
#[derive(Clone)]
pub struct StrapiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
    cache: Cache<String, Arc<str>>,
}

impl fmt::Debug for StrapiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrapiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl StrapiClient {
    /// Создаёт клиент по настройкам CMS.
    pub fn new(settings: &ContentSettings) -> ContentResult<Self> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(ContentError::Http)?;

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(settings.cache_ttl)
            .build();

        Ok(Self {
            base_url: settings.api_url.clone(),
            token: settings.api_token.clone(),
            client,
            cache,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> ContentError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .and_then(|error| error.message)
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        ContentError::from_http_status(status, Some(message))
    }

    /// GET с кэшированием: в кэш попадает только тело, которое удалось декодировать.
    async fn get_cached<T, F>(
        &self,
        path: &str,
        params: &[(String, String)],
        decode: F,
    ) -> ContentResult<T>
    where
        F: Fn(&str) -> ContentResult<T>,
    {
        let mut request = self.client.request(Method::GET, self.endpoint(path)).query(params);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let request = request.build().map_err(ContentError::from_reqwest)?;
        let key = request.url().to_string();

        if let Some(body) = self.cache.get(&key).await {
            debug!(url = %key, "content cache hit");
            return decode(&body);
        }

        debug!(url = %key, "fetching from content service");
        let response = self
            .client
            .execute(request)
            .await
            .map_err(ContentError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let body: Arc<str> = response
            .text()
            .await
            .map_err(ContentError::from_reqwest)?
            .into();
        let decoded = decode(&body)?;
        self.cache.insert(key, body).await;
        Ok(decoded)
    }
}

#[async_trait]
impl ContentSource for StrapiClient {
    async fn fetch_articles(&self, query: &ArticleQuery) -> ContentResult<PostsPage> {
        let page = query.page;
        self.get_cached("/api/articles", &query.to_params(), |body| {
            strapi::decode_posts_page(body, page.page, page.page_size)
        })
        .await
    }

    async fn fetch_categories(&self) -> ContentResult<Vec<CategorySummary>> {
        self.get_cached("/api/categories", &taxonomy_params(), strapi::decode_categories)
            .await
    }

    async fn fetch_tags(&self) -> ContentResult<Vec<TagSummary>> {
        self.get_cached("/api/tags", &taxonomy_params(), strapi::decode_tags)
            .await
    }

    async fn create_comment(&self, input: &NewComment) -> ContentResult<Comment> {
        let payload = CreateCommentRequestDto {
            data: CreateCommentDataDto {
                article: input.post_id,
                author: input.author_id,
                content: &input.content,
            },
        };

        let mut request = self
            .client
            .request(Method::POST, self.endpoint("/api/comments"))
            .json(&payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(ContentError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let body = response.text().await.map_err(ContentError::from_reqwest)?;
        let mut comment = strapi::decode_comment(&body)?;
        // Strapi не раскрывает связи в ответе на создание.
        if comment.author.id == 0 {
            comment.author.id = input.author_id;
        }
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = StrapiClient::new(&ContentSettings::new("http://localhost:1337/"))
            .expect("client must build");
        let full = client.endpoint("/api/articles");
        assert_eq!(full, "http://localhost:1337/api/articles");
    }

    #[test]
    fn comment_payload_wraps_fields_in_data() {
        let payload = CreateCommentRequestDto {
            data: CreateCommentDataDto {
                article: 3,
                author: 9,
                content: "hello",
            },
        };

        let json = serde_json::to_value(&payload).expect("must serialize");
        assert_eq!(
            json,
            serde_json::json!({ "data": { "article": 3, "author": 9, "content": "hello" } })
        );
    }

    #[test]
    fn debug_output_hides_token() {
        let client = StrapiClient::new(
            &ContentSettings::new("http://localhost:1337").with_token("secret-token"),
        )
        .expect("client must build");
        let debug = format!("{client:?}");
        assert!(debug.contains("authenticated: true"));
        assert!(!debug.contains("secret-token"));
    }
}
