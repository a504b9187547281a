use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::post::errors::PageError;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::AuthoredPost;
use crate::domain::post::models::CoverRef;
use crate::domain::post::models::Page;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostBody;
use crate::domain::post::models::PostChanges;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostStatus;
use crate::domain::post::models::PostTitle;
use crate::domain::post::models::Slug;
use crate::domain::post::models::Tags;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;

const POST_COLUMNS: &str =
    "id, slug, title, body, tags, cover, status, author_id, created_at, updated_at";

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_post(r: &PgRow) -> Result<Post, PostError> {
        let status: String = r.get("status");

        Ok(Post {
            id: PostId(r.get("id")),
            slug: Slug::new(r.get("slug"))?,
            title: PostTitle::new(r.get("title"))?,
            body: PostBody::new(r.get("body"))?,
            tags: Tags::new(r.get("tags")),
            cover: CoverRef::new(r.get::<String, _>("cover")),
            status: status.parse()?,
            author_id: UserId(r.get("author_id")),
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
        })
    }

    fn row_to_authored_post(r: &PgRow) -> Result<AuthoredPost, PostError> {
        Ok(AuthoredPost {
            post: Self::row_to_post(r)?,
            author_name: r.get("author_name"),
        })
    }
}

fn database_error(e: sqlx::Error) -> PostError {
    PostError::DatabaseError(e.to_string())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, slug, title, body, tags, cover, status, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(post.id.0)
        .bind(post.slug.as_str())
        .bind(post.title.as_str())
        .bind(post.body.as_str())
        .bind(post.tags.as_str())
        .bind(post.cover.as_str())
        .bind(post.status.as_str())
        .bind(post.author_id.0)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("posts_slug_key") {
                    return PostError::SlugAlreadyExists(post.slug.to_string());
                }
            }
            database_error(e)
        })?;

        Ok(post)
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<AuthoredPost>, PostError> {
        let row = sqlx::query(
            r#"
            SELECT p.id, p.slug, p.title, p.body, p.tags, p.cover, p.status, p.author_id,
                   p.created_at, p.updated_at, u.name AS author_name
            FROM posts p
            LEFT JOIN users u ON u.id = p.author_id
            WHERE p.slug = $1
            "#,
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_authored_post).transpose()
    }

    async fn find_page(
        &self,
        status: Option<PostStatus>,
        page: Page,
        page_size: u32,
    ) -> Result<Vec<AuthoredPost>, PostError> {
        let offset = i64::try_from(page.offset(page_size))
            .map_err(|_| PostError::from(PageError::DoesNotExist))?;

        let rows = sqlx::query(
            r#"
            SELECT p.id, p.slug, p.title, p.body, p.tags, p.cover, p.status, p.author_id,
                   p.created_at, p.updated_at, u.name AS author_name
            FROM posts p
            LEFT JOIN users u ON u.id = p.author_id
            WHERE ($1::text IS NULL OR p.status = $1)
            ORDER BY p.created_at DESC, p.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status.map(|s| s.as_str()))
        .bind(i64::from(page_size))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(Self::row_to_authored_post).collect()
    }

    async fn update(&self, slug: &Slug, changes: PostChanges) -> Result<Option<Post>, PostError> {
        let query = format!(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                body = COALESCE($3, body),
                tags = COALESCE($4, tags),
                status = COALESCE($5, status),
                cover = COALESCE($6, cover),
                updated_at = $7
            WHERE slug = $1
            RETURNING {}
            "#,
            POST_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(slug.as_str())
            .bind(changes.title.as_ref().map(PostTitle::as_str))
            .bind(changes.body.as_ref().map(PostBody::as_str))
            .bind(changes.tags.as_ref().map(Tags::as_str))
            .bind(changes.status.map(|s| s.as_str()))
            .bind(changes.cover.as_ref().map(CoverRef::as_str))
            .bind(changes.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(Self::row_to_post).transpose()
    }

    async fn delete(&self, slug: &Slug) -> Result<Option<Post>, PostError> {
        let query = format!("DELETE FROM posts WHERE slug = $1 RETURNING {}", POST_COLUMNS);

        let row = sqlx::query(&query)
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(Self::row_to_post).transpose()
    }
}
