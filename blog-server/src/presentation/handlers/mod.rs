pub(crate) mod comments;
pub(crate) mod posts;
pub(crate) mod search;
pub(crate) mod taxonomy;
