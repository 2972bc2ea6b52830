use std::time::Duration;

use anyhow::{Context, Result, anyhow};

/// Адрес CMS по умолчанию (локальный Strapi).
pub const DEFAULT_API_URL: &str = "http://localhost:1337";

/// Настройки доступа к CMS.
///
/// Собираются один раз при старте процесса и передаются в `StrapiClient::new`.
#[derive(Debug, Clone)]
pub struct ContentSettings {
    /// Базовый URL CMS без суффикса `/api`.
    pub api_url: String,
    /// Bearer-токен API; `None` означает анонимный доступ.
    pub api_token: Option<String>,
    /// Окно повторного использования успешных GET-ответов.
    pub cache_ttl: Duration,
    /// Таймаут установки соединения.
    pub connect_timeout: Duration,
    /// Таймаут всего запроса.
    pub request_timeout: Duration,
}

impl ContentSettings {
    /// Настройки по умолчанию для указанного адреса CMS.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_token: None,
            cache_ttl: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }

    /// Задаёт bearer-токен; пустая строка означает анонимный доступ.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = parse_token(token.into());
        self
    }

    /// Задаёт окно кэширования ответов.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Читает настройки из окружения.
    ///
    /// `STRAPI_API_URL`, `STRAPI_API_TOKEN`, `CONTENT_CACHE_TTL_SECS`,
    /// `CONTENT_CONNECT_TIMEOUT_SECS`, `CONTENT_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("STRAPI_API_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(anyhow!("STRAPI_API_URL must start with http:// or https://"));
        }

        let api_token = parse_token(std::env::var("STRAPI_API_TOKEN").unwrap_or_default());
        let cache_ttl = Duration::from_secs(parse_u64_env("CONTENT_CACHE_TTL_SECS", 60)?);
        let connect_timeout =
            Duration::from_secs(parse_u64_env("CONTENT_CONNECT_TIMEOUT_SECS", 5)?);
        let request_timeout =
            Duration::from_secs(parse_u64_env("CONTENT_REQUEST_TIMEOUT_SECS", 15)?);

        Ok(Self {
            api_url,
            api_token,
            cache_ttl,
            connect_timeout,
            request_timeout,
        })
    }
}

fn parse_token(raw: String) -> Option<String> {
    let token = raw.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
