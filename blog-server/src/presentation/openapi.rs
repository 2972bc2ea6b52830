use utoipa::OpenApi;

use crate::presentation::dto::{
    AuthorDto, CategoryDto, CommentDto, CreateCommentDto, PaginationDto, PostDto, PostsPageDto,
    TagDto, TermSummaryDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::search::search_posts,
        crate::presentation::handlers::comments::add_comment,
        crate::presentation::handlers::taxonomy::list_categories,
        crate::presentation::handlers::taxonomy::list_tags,
        crate::presentation::handlers::taxonomy::list_category_posts,
        crate::presentation::handlers::taxonomy::list_tag_posts
    ),
    components(
        schemas(
            AuthorDto,
            CategoryDto,
            TagDto,
            CommentDto,
            PostDto,
            PaginationDto,
            PostsPageDto,
            TermSummaryDto,
            CreateCommentDto
        )
    ),
    tags(
        (name = "posts", description = "Post feed, detail and search"),
        (name = "taxonomy", description = "Categories and tags"),
        (name = "comments", description = "Comment submission")
    )
)]
pub(crate) struct ApiDoc;
