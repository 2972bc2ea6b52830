//! Резервный набор контента на случай недоступности CMS.
//!
//! Данные неизменяемы и живут всё время работы процесса; в CMS они никогда
//! не записываются.

use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{
    Author, Category, CategorySummary, Comment, DEFAULT_AVATAR_URL, NewComment, Post, Tag,
    TagSummary,
};

/// Имя автора комментария, созданного локально при ошибке записи.
pub const LOCAL_COMMENT_AUTHOR: &str = "You";

const SAMPLE_CONTENT: &str =
    "<p>This is a sample post content. In a real application, this would be fetched from Strapi.</p>";

static POSTS: LazyLock<Vec<Post>> = LazyLock::new(|| {
    vec![
        sample_post(
            1,
            "Secure API Gateway with Cognito Authorizer",
            "secure-api-gateway-cognito",
            "Learn how to secure your API Gateway endpoints using Amazon Cognito as an authorizer.",
            "/placeholder.svg?key=q9ejl",
            published(2025, 4, 18),
            author(1, "John Smith", "john@example.com"),
            category(1, "AWS-DVA", "aws-dva"),
            tag(1, "AWS", "aws"),
        ),
        sample_post(
            2,
            "Low-Code/No-Code End-to-End Machine Learning for Startups",
            "low-code-machine-learning",
            "Discover how to build end-to-end machine learning solutions without writing much code using Amazon SageMaker Canvas.",
            "/placeholder.svg?key=ul8k5",
            published(2025, 4, 6),
            author(2, "Jane Doe", "jane@example.com"),
            category(2, "MACHINE-LEARNING", "machine-learning"),
            tag(2, "ML", "ml"),
        ),
        sample_post(
            3,
            "Using FMs Stable Diffusion in AWS Bedrock to Generate Images",
            "stable-diffusion-aws-bedrock",
            "Learn how to generate high-quality images using Stable Diffusion models in AWS Bedrock.",
            "/placeholder.svg?key=2kr4w",
            published(2025, 3, 26),
            author(3, "Alex Johnson", "alex@example.com"),
            category(3, "GENERATIVE-AI", "generative-ai"),
            tag(3, "AI", "ai"),
        ),
    ]
});

/// Резервные статьи, новые первыми.
pub fn posts() -> &'static [Post] {
    &POSTS
}

/// Резервная статья с указанным slug.
pub fn post_by_slug(slug: &str) -> Option<Post> {
    POSTS.iter().find(|post| post.slug == slug).cloned()
}

/// Резервные статьи с тегом.
pub fn posts_with_tag(slug: &str) -> Vec<Post> {
    POSTS.iter().filter(|post| post.has_tag(slug)).cloned().collect()
}

/// Резервные статьи категории.
pub fn posts_in_category(slug: &str) -> Vec<Post> {
    POSTS
        .iter()
        .filter(|post| post.in_category(slug))
        .cloned()
        .collect()
}

/// Резервные категории; число статей выводится из резервных статей.
pub fn categories() -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = Vec::new();
    for category in POSTS.iter().filter_map(|post| post.category.as_ref()) {
        match summaries.iter_mut().find(|s| s.category.slug == category.slug) {
            Some(summary) => summary.article_count += 1,
            None => summaries.push(CategorySummary {
                category: category.clone(),
                article_count: 1,
            }),
        }
    }
    summaries
}

/// Резервные теги; число статей выводится из резервных статей.
pub fn tags() -> Vec<TagSummary> {
    let mut summaries: Vec<TagSummary> = Vec::new();
    for tag in POSTS.iter().flat_map(|post| post.tags.iter()) {
        match summaries.iter_mut().find(|s| s.tag.slug == tag.slug) {
            Some(summary) => summary.article_count += 1,
            None => summaries.push(TagSummary {
                tag: tag.clone(),
                article_count: 1,
            }),
        }
    }
    summaries
}

/// Комментарий, который UI может сразу показать, если запись в CMS не удалась.
pub fn local_comment(input: &NewComment, now: DateTime<Utc>) -> Comment {
    Comment {
        id: now.timestamp_millis(),
        content: input.content.clone(),
        author: Author {
            id: input.author_id,
            name: LOCAL_COMMENT_AUTHOR.to_string(),
            email: String::new(),
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
        },
        created_at: now,
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_post(
    id: i64,
    title: &str,
    slug: &str,
    description: &str,
    cover_url: &str,
    published_at: DateTime<Utc>,
    author: Author,
    category: Category,
    tag: Tag,
) -> Post {
    Post {
        id,
        title: title.to_string(),
        slug: slug.to_string(),
        description: description.to_string(),
        content: SAMPLE_CONTENT.to_string(),
        published_at,
        cover_url: cover_url.to_string(),
        author,
        category: Some(category),
        tags: vec![tag],
        comments: Vec::new(),
    }
}

fn author(id: i64, name: &str, email: &str) -> Author {
    Author {
        id,
        name: name.to_string(),
        email: email.to_string(),
        avatar_url: DEFAULT_AVATAR_URL.to_string(),
    }
}

fn category(id: i64, name: &str, slug: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        slug: slug.to_string(),
    }
}

fn tag(id: i64, name: &str, slug: &str) -> Tag {
    Tag {
        id,
        name: name.to_string(),
        slug: slug.to_string(),
    }
}

fn published(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 10, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_posts_are_three_and_newest_first() {
        let posts = posts();
        assert_eq!(posts.len(), 3);
        assert!(posts.windows(2).all(|w| w[0].published_at >= w[1].published_at));
        assert_eq!(posts[0].slug, "secure-api-gateway-cognito");
    }

    #[test]
    fn post_by_slug_never_invents_posts() {
        assert!(post_by_slug("low-code-machine-learning").is_some());
        assert!(post_by_slug("no-such-post").is_none());
    }

    #[test]
    fn posts_with_tag_filters_by_slug() {
        let aws = posts_with_tag("aws");
        assert_eq!(aws.len(), 1);
        assert!(aws.iter().all(|post| post.has_tag("aws")));
        assert!(posts_with_tag("rust").is_empty());
    }

    #[test]
    fn categories_and_tags_count_fallback_posts() {
        let categories = categories();
        assert_eq!(categories.len(), 3);
        assert!(categories.iter().all(|c| c.article_count == 1));

        let tags = tags();
        let slugs: Vec<&str> = tags.iter().map(|t| t.tag.slug.as_str()).collect();
        assert_eq!(slugs, vec!["aws", "ml", "ai"]);
    }

    #[test]
    fn local_comment_echoes_text_with_placeholder_author() {
        let input = NewComment {
            post_id: 1,
            author_id: 42,
            content: "Great post".to_string(),
        };
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).single().expect("valid ts");

        let comment = local_comment(&input, now);
        assert_eq!(comment.content, "Great post");
        assert_eq!(comment.author.name, LOCAL_COMMENT_AUTHOR);
        assert_eq!(comment.author.id, 42);
        assert_eq!(comment.id, now.timestamp_millis());
    }
}
