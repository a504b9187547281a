use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::post::models::Page;
use crate::domain::post::models::PostView;
use crate::domain::post::models::Slug;
use crate::inbound::http::handlers::ApiError;
use crate::post::errors::PostError;

pub mod get_post;
pub mod list_posts;
pub mod related_posts;

pub use get_post::get_post;
pub use list_posts::list_posts;
pub use related_posts::related_posts;

/// `?page=` query shared by both listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> Result<Page, ApiError> {
        Page::parse(self.page.as_deref())
            .map_err(PostError::from)
            .map_err(ApiError::from)
    }
}

/// Parse a slug path segment. A malformed slug cannot name a post.
pub fn parse_slug(raw: String) -> Result<Slug, ApiError> {
    Slug::new(raw.clone()).map_err(|_| ApiError::from(PostError::NotFound(raw)))
}

/// Listing entry; the body is left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummaryData {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub tags: String,
    pub status: String,
    pub cover_url: String,
    pub author_id: String,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PostView> for PostSummaryData {
    fn from(view: &PostView) -> Self {
        let post = &view.post;
        Self {
            id: post.id.to_string(),
            slug: post.slug.to_string(),
            title: post.title.as_str().to_string(),
            tags: post.tags.as_str().to_string(),
            status: post.status.as_str().to_string(),
            cover_url: view.cover_url.clone(),
            author_id: post.author_id.to_string(),
            author_name: view.author_name.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Full post, body included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostData {
    #[serde(flatten)]
    pub summary: PostSummaryData,
    pub body: String,
}

impl From<&PostView> for PostData {
    fn from(view: &PostView) -> Self {
        Self {
            summary: view.into(),
            body: view.post.body.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostListResponseData {
    pub page: u32,
    pub posts: Vec<PostSummaryData>,
}

impl PostListResponseData {
    pub fn new(page: Page, views: &[PostView]) -> Self {
        Self {
            page: page.number(),
            posts: views.iter().map(PostSummaryData::from).collect(),
        }
    }
}
