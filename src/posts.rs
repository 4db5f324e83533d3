//! Posts endpoint: the example call site for [`RequestHandler`].
//!
//! `GET <posts_url>?limit=&page=` returning a JSON array of posts.

use crate::request::{send_json, RequestHandler};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Public endpoint queried when no other URL is configured.
pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One post returned by the endpoint.
pub struct Post {
    /// Author identifier.
    pub user_id: u64,
    /// Post identifier.
    pub id: u64,
    /// Post headline.
    pub title: String,
    /// Post text.
    pub body: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
/// Query parameters for listing posts; unset values are left off the URL.
pub struct GetPostsParams {
    /// Maximum number of posts to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Page number to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

#[must_use]
/// Builds the handler that lists posts from `url` using `client`.
pub fn posts_handler(
    client: reqwest::Client,
    url: impl Into<String>,
) -> RequestHandler<GetPostsParams, Vec<Post>> {
    let url = url.into();
    RequestHandler::new(move |params: GetPostsParams, cancel| {
        debug!(%url, ?params, "fetching posts");
        let request = client.get(&url).query(&params);
        send_json(request, cancel)
    })
}

#[cfg(test)]
#[path = "tests/posts.rs"]
mod tests;
