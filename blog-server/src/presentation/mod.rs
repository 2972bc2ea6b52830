use std::sync::Arc;

use blog_content::{ContentService, StrapiClient};

pub(crate) mod app_error;
pub(crate) mod dto;
pub(crate) mod extract;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) content: Arc<ContentService<StrapiClient>>,
}

impl AppState {
    pub(crate) fn new(content: Arc<ContentService<StrapiClient>>) -> Self {
        Self { content }
    }
}
