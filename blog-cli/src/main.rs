use std::process;

use anyhow::{Context, Result};
use blog_content::{
    ArticleCount, CategorySummary, Comment, ContentService, ContentSettings, Post, PostsPage,
    StrapiClient, TagSummary, sort_by_article_count,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "blog-cli", version, about = "CLI для чтения контента блога из CMS")]
struct Cli {
    /// Адрес CMS. По умолчанию STRAPI_API_URL или http://localhost:1337.
    #[arg(long, global = true)]
    server: Option<String>,

    /// API-токен CMS. По умолчанию STRAPI_API_TOKEN.
    #[arg(long, global = true)]
    token: Option<String>,

    /// Печатать ответ в JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Показывать предупреждения о переходе на резервные данные.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Лента статей.
    Posts {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    /// Статья по slug вместе с комментариями.
    Post {
        #[arg(long)]
        slug: String,
    },
    /// Категории по убыванию числа статей.
    Categories,
    /// Теги по убыванию числа статей.
    Tags,
    /// Статьи с тегом.
    Tag {
        #[arg(long)]
        slug: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    /// Статьи категории.
    Category {
        #[arg(long)]
        slug: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    /// Поиск по заголовку и описанию.
    Search {
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    /// Добавить комментарий к статье.
    Comment {
        #[arg(long)]
        post_id: i64,
        #[arg(long)]
        author_id: i64,
        #[arg(long)]
        content: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.verbose {
        init_logging();
    }

    let settings = resolve_settings(cli.server, cli.token)?;
    let client = StrapiClient::new(&settings).context("не удалось создать HTTP клиент")?;
    let service = ContentService::new(client);
    let json = cli.json;

    match cli.command {
        Command::Posts { page, page_size } => {
            let posts = service.list_posts(page, page_size).await;
            output(json, &posts, || print_page("Статьи", &posts))?;
        }
        Command::Post { slug } => match service.get_post_by_slug(&slug).await {
            Some(post) => output(json, &post, || print_post(&post))?,
            None => anyhow::bail!("статья не найдена: {slug}"),
        },
        Command::Categories => {
            let mut categories = service.list_categories().await;
            sort_by_article_count(&mut categories);
            output(json, &categories, || print_terms("Категории", &categories))?;
        }
        Command::Tags => {
            let mut tags = service.list_tags().await;
            sort_by_article_count(&mut tags);
            output(json, &tags, || print_terms("Теги", &tags))?;
        }
        Command::Tag {
            slug,
            page,
            page_size,
        } => {
            let posts = service.list_posts_by_tag(&slug, page, page_size).await;
            output(json, &posts, || print_page(&format!("Тег {slug}"), &posts))?;
        }
        Command::Category {
            slug,
            page,
            page_size,
        } => {
            let posts = service.list_posts_by_category(&slug, page, page_size).await;
            output(json, &posts, || {
                print_page(&format!("Категория {slug}"), &posts)
            })?;
        }
        Command::Search {
            query,
            page,
            page_size,
        } => {
            let posts = service.search_posts(&query, page, page_size).await;
            output(json, &posts, || {
                print_page(&format!("Поиск \"{query}\""), &posts)
            })?;
        }
        Command::Comment {
            post_id,
            author_id,
            content,
        } => {
            if content.trim().is_empty() {
                anyhow::bail!("комментарий не может быть пустым");
            }
            let comment = service.add_comment(post_id, author_id, &content).await;
            output(json, &comment, || print_comment(&comment))?;
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn resolve_settings(server: Option<String>, token: Option<String>) -> Result<ContentSettings> {
    let mut settings = ContentSettings::from_env().context("некорректные настройки CMS")?;

    if let Some(server) = server {
        settings.api_url = normalize_server(server);
    }
    if let Some(token) = token {
        settings = settings.with_token(token);
    }
    Ok(settings)
}

fn normalize_server(server: String) -> String {
    let server = server.trim().trim_end_matches('/').to_string();
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn output<T: Serialize>(json: bool, value: &T, print: impl FnOnce()) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(value).context("не удалось сериализовать ответ")?;
        println!("{rendered}");
    } else {
        print();
    }
    Ok(())
}

fn print_page(title: &str, page: &PostsPage) {
    let pagination = &page.pagination;
    println!(
        "{title}: {} (страница {}/{}, всего {})",
        page.posts.len(),
        pagination.page,
        pagination.page_count,
        pagination.total
    );

    for post in &page.posts {
        println!(
            "- {} {} [{}] {}",
            post.published_at.format("%Y-%m-%d"),
            post.title,
            post.slug,
            post.author.name
        );
    }
}

fn print_post(post: &Post) {
    println!("{}", post.title);
    println!("slug: {}", post.slug);
    println!("author: {}", post.author.name);
    println!("published_at: {}", post.published_at);
    if let Some(category) = &post.category {
        println!("category: {}", category.name);
    }
    let tags: Vec<&str> = post.tags.iter().map(|tag| tag.slug.as_str()).collect();
    println!("tags: {}", tags.join(", "));
    println!("cover: {}", post.cover_url);
    println!();
    println!("{}", post.description);
    println!();
    println!("{}", post.content);

    if !post.comments.is_empty() {
        println!();
        println!("Комментарии: {}", post.comments.len());
        for comment in &post.comments {
            println!("- {}: {}", comment.author.name, comment.content);
        }
    }
}

fn print_comment(comment: &Comment) {
    println!("Комментарий принят");
    println!("id: {}", comment.id);
    println!("author: {}", comment.author.name);
    println!("created_at: {}", comment.created_at);
    println!("content: {}", comment.content);
}

trait TermLine {
    fn line(&self) -> String;
}

impl TermLine for CategorySummary {
    fn line(&self) -> String {
        format!("{} [{}]", self.category.name, self.category.slug)
    }
}

impl TermLine for TagSummary {
    fn line(&self) -> String {
        format!("{} [{}]", self.tag.name, self.tag.slug)
    }
}

fn print_terms<T: TermLine + ArticleCount>(title: &str, terms: &[T]) {
    println!("{title}: {}", terms.len());
    for term in terms {
        println!("- {} ({})", term.line(), term.article_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://cms.example.com".to_string());
        assert_eq!(s, "https://cms.example.com");
    }

    #[test]
    fn normalize_server_adds_http_scheme_and_drops_trailing_slash() {
        let s = normalize_server("127.0.0.1:1337/".to_string());
        assert_eq!(s, "http://127.0.0.1:1337");
    }

    #[test]
    fn cli_parses_search_with_paging() {
        let cli = Cli::try_parse_from([
            "blog-cli", "search", "--query", "aws", "--page", "2", "--page-size", "5",
        ])
        .expect("arguments must parse");

        match cli.command {
            Command::Search {
                query,
                page,
                page_size,
            } => {
                assert_eq!(query, "aws");
                assert_eq!(page, 2);
                assert_eq!(page_size, 5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_accepts_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["blog-cli", "tags", "--server", "localhost:1337", "--json"])
            .expect("arguments must parse");
        assert_eq!(cli.server.as_deref(), Some("localhost:1337"));
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Tags));
    }

    #[test]
    fn comment_requires_all_fields() {
        let result = Cli::try_parse_from(["blog-cli", "comment", "--post-id", "1"]);
        assert!(result.is_err());
    }
}
