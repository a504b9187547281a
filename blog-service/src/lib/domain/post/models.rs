use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::FieldError;
use crate::domain::errors::ValidationErrors;
use crate::domain::post::errors::PageError;
use crate::domain::post::errors::PostBodyError;
use crate::domain::post::errors::PostStatusError;
use crate::domain::post::errors::PostTitleError;
use crate::domain::post::errors::SlugError;
use crate::domain::user::models::UserId;

/// Post unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub Uuid);

impl PostId {
    /// Generate a new random post ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// URL-safe post key.
///
/// Lowercase ASCII letters and digits separated by single dashes. Assigned
/// once at creation and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Parse a slug received from outside, such as a URL path segment.
    ///
    /// # Errors
    /// * `Empty` - Nothing left after trimming
    /// * `InvalidFormat` - Contains characters outside `[a-z0-9-]`, or stray dashes
    pub fn new(slug: String) -> Result<Self, SlugError> {
        let slug = slug.trim();

        if slug.is_empty() {
            return Err(SlugError::Empty);
        }

        let well_formed = slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        });

        if !well_formed {
            return Err(SlugError::InvalidFormat(slug.to_string()));
        }

        Ok(Self(slug.to_string()))
    }

    /// Build a slug already known to be well formed.
    pub(crate) fn from_trusted(slug: String) -> Self {
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post title, trimmed, 5 to 120 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    const MIN_LENGTH: usize = 5;
    const MAX_LENGTH: usize = 120;

    /// # Errors
    /// * `TooShort` - Fewer than 5 characters after trimming
    /// * `TooLong` - More than 120 characters after trimming
    pub fn new(title: String) -> Result<Self, PostTitleError> {
        let title = title.trim();
        let length = title.chars().count();

        if length < Self::MIN_LENGTH {
            return Err(PostTitleError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(PostTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(title.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Post body, trimmed, at least 10 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBody(String);

impl PostBody {
    const MIN_LENGTH: usize = 10;

    /// # Errors
    /// * `TooShort` - Fewer than 10 characters after trimming
    pub fn new(body: String) -> Result<Self, PostBodyError> {
        let body = body.trim();
        let length = body.chars().count();

        if length < Self::MIN_LENGTH {
            return Err(PostBodyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }

        Ok(Self(body.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-text tags, stored trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(String);

impl Tags {
    pub fn new(tags: String) -> Self {
        Self(tags.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// File name of a stored cover image.
///
/// Resolved to a public URL only when a post is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverRef(String);

impl CoverRef {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self(file_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CoverRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Cover image as received, before it reaches cover storage.
#[derive(Clone)]
pub struct CoverUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for CoverUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Publication state. Only published posts appear on the public feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "DRAFT",
            PostStatus::Published => "PUBLISHED",
        }
    }
}

impl FromStr for PostStatus {
    type Err = PostStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "DRAFT" => Ok(PostStatus::Draft),
            "PUBLISHED" => Ok(PostStatus::Published),
            other => Err(PostStatusError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post aggregate entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub slug: Slug,
    pub title: PostTitle,
    pub body: PostBody,
    pub tags: Tags,
    pub cover: CoverRef,
    pub status: PostStatus,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// A stored post joined with its author's display name.
///
/// `author_name` is `None` when the author row is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredPost {
    pub post: Post,
    pub author_name: Option<String>,
}

/// What read operations hand back: a post, its author's name and the
/// public URL of its cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub post: Post,
    pub author_name: Option<String>,
    pub cover_url: String,
}

/// 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(u32);

impl Page {
    pub const FIRST: Page = Page(1);

    /// # Errors
    /// * `DoesNotExist` - Page 0
    pub fn new(number: u32) -> Result<Self, PageError> {
        if number == 0 {
            return Err(PageError::DoesNotExist);
        }
        Ok(Self(number))
    }

    /// Parse an optional query parameter; absent means the first page.
    ///
    /// # Errors
    /// * `DoesNotExist` - Not a positive integer
    pub fn parse(raw: Option<&str>) -> Result<Self, PageError> {
        match raw {
            None => Ok(Self::FIRST),
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| PageError::DoesNotExist)
                .and_then(Self::new),
        }
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    /// Rows to skip for a given page size.
    pub fn offset(&self, page_size: u32) -> u64 {
        u64::from(self.0 - 1) * u64::from(page_size)
    }
}

/// Command to create a post with domain types
#[derive(Debug)]
pub struct CreatePostCommand {
    pub title: PostTitle,
    pub body: PostBody,
    pub tags: Tags,
    pub status: PostStatus,
    pub cover: CoverUpload,
}

impl CreatePostCommand {
    /// Validate raw create input.
    ///
    /// Every field is checked and all failures are reported together. A
    /// missing status means DRAFT.
    ///
    /// # Errors
    /// * `ValidationErrors` - One entry per invalid field (`title`, `body`, `status`, `cover`)
    pub fn new(
        title: Option<String>,
        body: Option<String>,
        tags: Option<String>,
        status: Option<String>,
        cover: Option<CoverUpload>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = errors.check(
            "title",
            required(title).and_then(|t| PostTitle::new(t).map_err(|e| e.to_string())),
        );
        let body = errors.check(
            "body",
            required(body).and_then(|b| PostBody::new(b).map_err(|e| e.to_string())),
        );
        let tags = Tags::new(tags.unwrap_or_default());
        let status = errors.check("status", parse_status(status)).map(Option::unwrap_or_default);
        let cover = match cover {
            Some(cover) => Some(cover),
            None => {
                errors.push(FieldError::new("cover", "Cover image is required"));
                None
            }
        };

        match (title, body, status, cover) {
            (Some(title), Some(body), Some(status), Some(cover)) => Ok(Self {
                title,
                body,
                tags,
                status,
                cover,
            }),
            _ => Err(errors),
        }
    }
}

/// Command to edit a post; every field is optional
#[derive(Debug, Default)]
pub struct UpdatePostCommand {
    pub title: Option<PostTitle>,
    pub body: Option<PostBody>,
    pub tags: Option<Tags>,
    pub status: Option<PostStatus>,
    pub cover: Option<CoverUpload>,
}

impl UpdatePostCommand {
    /// Validate raw edit input. Only supplied fields are checked.
    ///
    /// # Errors
    /// * `ValidationErrors` - One entry per invalid supplied field
    pub fn new(
        title: Option<String>,
        body: Option<String>,
        tags: Option<String>,
        status: Option<String>,
        cover: Option<CoverUpload>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = title.and_then(|t| errors.check("title", PostTitle::new(t)));
        let body = body.and_then(|b| errors.check("body", PostBody::new(b)));
        let status = errors.check("status", parse_status(status)).flatten();
        let tags = tags.map(Tags::new);

        errors.into_result()?;

        Ok(Self {
            title,
            body,
            tags,
            status,
            cover,
        })
    }

    /// True when no field and no cover was supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.tags.is_none()
            && self.status.is_none()
            && self.cover.is_none()
    }
}

/// Partial update handed to the post store.
///
/// `None` fields keep their stored value; `updated_at` is always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<PostTitle>,
    pub body: Option<PostBody>,
    pub tags: Option<Tags>,
    pub status: Option<PostStatus>,
    pub cover: Option<CoverRef>,
    pub updated_at: DateTime<Utc>,
}

fn required(value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| "Field is required".to_string())
}

fn parse_status(status: Option<String>) -> Result<Option<PostStatus>, PostStatusError> {
    status.map(|s| s.parse()).transpose()
}
