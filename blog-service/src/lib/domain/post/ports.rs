use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::AuthoredPost;
use crate::domain::post::models::CoverRef;
use crate::domain::post::models::CoverUpload;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Page;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostChanges;
use crate::domain::post::models::PostStatus;
use crate::domain::post::models::PostView;
use crate::domain::post::models::Slug;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::user::models::PublicUser;

/// Port for post lifecycle operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a post authored by `author`.
    ///
    /// The cover is stored first, then a unique slug is claimed from the title.
    ///
    /// # Errors
    /// * `InvalidCover` - Cover storage refused the upload
    /// * `SlugExhausted` - Every slug candidate was taken
    /// * `DatabaseError` / `Storage` - Infrastructure failure
    async fn create(
        &self,
        author: &PublicUser,
        command: CreatePostCommand,
    ) -> Result<PostView, PostError>;

    /// Apply a partial update to the post at `slug`.
    ///
    /// # Errors
    /// * `NothingToUpdate` - Command carries no field and no cover
    /// * `NotFound` - No post at `slug`
    /// * `InvalidCover` - New cover refused; the post is left untouched
    async fn edit(&self, slug: &Slug, command: UpdatePostCommand) -> Result<PostView, PostError>;

    /// Remove the post at `slug` and its cover.
    ///
    /// # Errors
    /// * `NotFound` - No post at `slug`, including one already deleted
    async fn delete(&self, slug: &Slug) -> Result<(), PostError>;

    /// Every post regardless of status, newest first.
    async fn list_for_admin(&self, page: Page) -> Result<Vec<PostView>, PostError>;

    /// Published posts only, newest first.
    async fn list_published(&self, page: Page) -> Result<Vec<PostView>, PostError>;

    /// Fetch a single post.
    ///
    /// # Errors
    /// * `NotFound` - No post at `slug`, or a draft when `include_drafts` is false
    async fn get_by_slug(&self, slug: &Slug, include_drafts: bool) -> Result<PostView, PostError>;
}

/// Persistence operations for the post aggregate.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Insert a post.
    ///
    /// Slug uniqueness is checked atomically by the store.
    ///
    /// # Errors
    /// * `SlugAlreadyExists` - Another post holds this slug
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, post: Post) -> Result<Post, PostError>;

    /// Retrieve a post and its author's name by slug.
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<AuthoredPost>, PostError>;

    /// Retrieve one page of posts, newest first.
    ///
    /// # Arguments
    /// * `status` - Only posts with this status; `None` for all
    /// * `page` - 1-based page number
    /// * `page_size` - Posts per page
    async fn find_page(
        &self,
        status: Option<PostStatus>,
        page: Page,
        page_size: u32,
    ) -> Result<Vec<AuthoredPost>, PostError>;

    /// Apply `changes` to the post at `slug`.
    ///
    /// # Returns
    /// The updated post, `None` if no post has that slug
    async fn update(&self, slug: &Slug, changes: PostChanges) -> Result<Option<Post>, PostError>;

    /// Delete the post at `slug` in a single statement.
    ///
    /// # Returns
    /// The deleted post, `None` if no post had that slug
    async fn delete(&self, slug: &Slug) -> Result<Option<Post>, PostError>;
}

/// Blob store for cover images.
#[async_trait]
pub trait CoverStorage: Send + Sync + 'static {
    /// Persist an uploaded cover under a fresh file name.
    ///
    /// # Errors
    /// * `InvalidCover` - Empty upload or unsupported content type
    /// * `Storage` - Write failed
    async fn store(&self, upload: &CoverUpload) -> Result<CoverRef, PostError>;

    /// Delete a stored cover. Removing a missing file is not an error.
    ///
    /// # Errors
    /// * `Storage` - Delete failed
    async fn remove(&self, cover: &CoverRef) -> Result<(), PostError>;

    /// Public URL under which a stored cover is served.
    fn public_url(&self, cover: &CoverRef) -> String;
}
