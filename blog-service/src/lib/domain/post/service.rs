use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::AuthoredPost;
use crate::domain::post::models::CoverRef;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Page;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostChanges;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostStatus;
use crate::domain::post::models::PostView;
use crate::domain::post::models::Slug;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::CoverStorage;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::post::slug::slugify;
use crate::domain::post::slug::SlugGenerator;
use crate::domain::user::models::PublicUser;

/// Concrete implementation of PostServicePort.
///
/// Owns the DRAFT/PUBLISHED visibility rule and the slug claim loop. Generic
/// over the post store and the cover store for testability.
pub struct PostService<PR, CS>
where
    PR: PostRepository,
    CS: CoverStorage,
{
    repository: Arc<PR>,
    covers: Arc<CS>,
    slugs: SlugGenerator,
    page_size: u32,
}

impl<PR, CS> PostService<PR, CS>
where
    PR: PostRepository,
    CS: CoverStorage,
{
    /// # Arguments
    /// * `repository` - Post store implementation
    /// * `covers` - Cover image storage
    /// * `page_size` - Posts per page on both listings
    pub fn new(repository: Arc<PR>, covers: Arc<CS>, page_size: u32) -> Self {
        Self {
            repository,
            covers,
            slugs: SlugGenerator::default(),
            page_size: page_size.max(1),
        }
    }

    pub fn with_slug_generator(mut self, slugs: SlugGenerator) -> Self {
        self.slugs = slugs;
        self
    }

    fn view(&self, post: Post, author_name: Option<String>) -> PostView {
        let cover_url = self.covers.public_url(&post.cover);
        PostView {
            post,
            author_name,
            cover_url,
        }
    }

    fn view_all(&self, posts: Vec<AuthoredPost>) -> Vec<PostView> {
        posts
            .into_iter()
            .map(|authored| self.view(authored.post, authored.author_name))
            .collect()
    }

    /// Remove a cover the caller no longer references. Failures are only logged.
    async fn discard_cover(&self, cover: &CoverRef) {
        if let Err(e) = self.covers.remove(cover).await {
            tracing::warn!(cover = %cover, error = %e, "Failed to remove cover file");
        }
    }

    /// Insert `post` under the first slug candidate the store accepts.
    async fn insert_with_unique_slug(&self, mut post: Post) -> Result<Post, PostError> {
        let base = slugify(post.title.as_str());

        for candidate in self.slugs.candidates(&base) {
            post.slug = candidate;

            match self.repository.create(post.clone()).await {
                Ok(created) => return Ok(created),
                Err(PostError::SlugAlreadyExists(taken)) => {
                    tracing::debug!(slug = %taken, "Slug taken, trying next candidate");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::error!(
            base = %base,
            attempts = self.slugs.attempts(),
            "Every slug candidate was taken"
        );
        Err(PostError::SlugExhausted(base.to_string()))
    }
}

#[async_trait]
impl<PR, CS> PostServicePort for PostService<PR, CS>
where
    PR: PostRepository,
    CS: CoverStorage,
{
    async fn create(
        &self,
        author: &PublicUser,
        command: CreatePostCommand,
    ) -> Result<PostView, PostError> {
        let cover = self.covers.store(&command.cover).await?;

        let now = Utc::now();
        let post = Post {
            id: PostId::new(),
            slug: slugify(command.title.as_str()),
            title: command.title,
            body: command.body,
            tags: command.tags,
            cover: cover.clone(),
            status: command.status,
            author_id: author.id,
            created_at: now,
            updated_at: now,
        };

        let created = match self.insert_with_unique_slug(post).await {
            Ok(created) => created,
            Err(e) => {
                self.discard_cover(&cover).await;
                return Err(e);
            }
        };

        tracing::info!(
            post_id = %created.id,
            slug = %created.slug,
            author_id = %author.id,
            status = %created.status,
            "Post created"
        );

        Ok(self.view(created, Some(author.name.to_string())))
    }

    async fn edit(&self, slug: &Slug, command: UpdatePostCommand) -> Result<PostView, PostError> {
        if command.is_empty() {
            return Err(PostError::NothingToUpdate);
        }

        let existing = self
            .repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| PostError::NotFound(slug.to_string()))?;

        let new_cover = match &command.cover {
            Some(upload) => Some(self.covers.store(upload).await?),
            None => None,
        };

        let changes = PostChanges {
            title: command.title,
            body: command.body,
            tags: command.tags,
            status: command.status,
            cover: new_cover.clone(),
            updated_at: Utc::now(),
        };

        let updated = match self.repository.update(slug, changes).await {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                if let Some(cover) = &new_cover {
                    self.discard_cover(cover).await;
                }
                return Err(PostError::NotFound(slug.to_string()));
            }
            Err(e) => {
                if let Some(cover) = &new_cover {
                    self.discard_cover(cover).await;
                }
                return Err(e);
            }
        };

        if new_cover.is_some() {
            self.discard_cover(&existing.post.cover).await;
        }

        tracing::info!(post_id = %updated.id, slug = %slug, "Post updated");

        Ok(self.view(updated, existing.author_name))
    }

    async fn delete(&self, slug: &Slug) -> Result<(), PostError> {
        let deleted = self
            .repository
            .delete(slug)
            .await?
            .ok_or_else(|| PostError::NotFound(slug.to_string()))?;

        self.discard_cover(&deleted.cover).await;

        tracing::info!(post_id = %deleted.id, slug = %slug, "Post deleted");
        Ok(())
    }

    async fn list_for_admin(&self, page: Page) -> Result<Vec<PostView>, PostError> {
        let posts = self
            .repository
            .find_page(None, page, self.page_size)
            .await?;

        Ok(self.view_all(posts))
    }

    async fn list_published(&self, page: Page) -> Result<Vec<PostView>, PostError> {
        let posts = self
            .repository
            .find_page(Some(PostStatus::Published), page, self.page_size)
            .await?;

        Ok(self.view_all(posts))
    }

    async fn get_by_slug(&self, slug: &Slug, include_drafts: bool) -> Result<PostView, PostError> {
        let authored = self
            .repository
            .find_by_slug(slug)
            .await?
            .filter(|authored| include_drafts || authored.post.is_published())
            .ok_or_else(|| PostError::NotFound(slug.to_string()))?;

        Ok(self.view(authored.post, authored.author_name))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use mockall::mock;

    use super::*;
    use crate::domain::post::models::CoverUpload;
    use crate::domain::post::models::PostBody;
    use crate::domain::post::models::PostTitle;
    use crate::domain::post::models::Tags;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::UserName;
    use crate::domain::user::models::UserStatus;

    mock! {
        pub TestPostRepository {}

        #[async_trait]
        impl PostRepository for TestPostRepository {
            async fn create(&self, post: Post) -> Result<Post, PostError>;
            async fn find_by_slug(&self, slug: &Slug) -> Result<Option<AuthoredPost>, PostError>;
            async fn find_page(
                &self,
                status: Option<PostStatus>,
                page: Page,
                page_size: u32,
            ) -> Result<Vec<AuthoredPost>, PostError>;
            async fn update(&self, slug: &Slug, changes: PostChanges) -> Result<Option<Post>, PostError>;
            async fn delete(&self, slug: &Slug) -> Result<Option<Post>, PostError>;
        }
    }

    mock! {
        pub TestCoverStorage {}

        #[async_trait]
        impl CoverStorage for TestCoverStorage {
            async fn store(&self, upload: &CoverUpload) -> Result<CoverRef, PostError>;
            async fn remove(&self, cover: &CoverRef) -> Result<(), PostError>;
            fn public_url(&self, cover: &CoverRef) -> String;
        }
    }

    fn author() -> PublicUser {
        PublicUser {
            id: UserId::new(),
            name: UserName::new("Ana".to_string()).unwrap(),
            email: EmailAddress::new("ana@x.com".to_string()).unwrap(),
            status: UserStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn upload() -> CoverUpload {
        CoverUpload {
            file_name: "cover.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    fn create_command(title: &str, status: Option<&str>) -> CreatePostCommand {
        CreatePostCommand::new(
            Some(title.to_string()),
            Some("A body long enough".to_string()),
            Some("rust".to_string()),
            status.map(str::to_string),
            Some(upload()),
        )
        .unwrap()
    }

    fn stored_post(slug: &str, status: PostStatus, cover: &str) -> Post {
        let now = Utc::now();
        Post {
            id: PostId::new(),
            slug: Slug::new(slug.to_string()).unwrap(),
            title: PostTitle::new("Hello World".to_string()).unwrap(),
            body: PostBody::new("A body long enough".to_string()).unwrap(),
            tags: Tags::new("rust".to_string()),
            cover: CoverRef::new(cover),
            status,
            author_id: UserId::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn covers_accepting(name: &'static str) -> MockTestCoverStorage {
        let mut covers = MockTestCoverStorage::new();
        covers
            .expect_store()
            .returning(move |_| Ok(CoverRef::new(name)));
        covers
            .expect_public_url()
            .returning(|cover| format!("http://localhost/images/covers/{}", cover));
        covers
    }

    fn slug(s: &str) -> Slug {
        Slug::new(s.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_create_defaults_to_draft_and_base_slug() {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_create()
            .withf(|post| {
                post.slug.as_str() == "hello-world"
                    && post.status == PostStatus::Draft
                    && post.cover.as_str() == "a.png"
            })
            .times(1)
            .returning(|post| Ok(post));

        let service = PostService::new(Arc::new(repository), Arc::new(covers_accepting("a.png")), 10);

        let author = author();
        let view = service
            .create(&author, create_command("Hello World", None))
            .await
            .expect("create failed");

        assert_eq!(view.post.slug.as_str(), "hello-world");
        assert_eq!(view.post.author_id, author.id);
        assert_eq!(view.author_name.as_deref(), Some("Ana"));
        assert_eq!(view.cover_url, "http://localhost/images/covers/a.png");
        assert_eq!(view.post.created_at, view.post.updated_at);
    }

    #[tokio::test]
    async fn test_create_retries_on_slug_conflict() {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_create()
            .withf(|post| post.slug.as_str() == "hello-world")
            .times(1)
            .returning(|post| Err(PostError::SlugAlreadyExists(post.slug.to_string())));
        repository
            .expect_create()
            .withf(|post| post.slug.as_str() == "hello-world-2")
            .times(1)
            .returning(|post| Ok(post));

        let service = PostService::new(Arc::new(repository), Arc::new(covers_accepting("a.png")), 10);

        let view = service
            .create(&author(), create_command("Hello World", Some("PUBLISHED")))
            .await
            .expect("create failed");

        assert_eq!(view.post.slug.as_str(), "hello-world-2");
        assert_eq!(view.post.status, PostStatus::Published);
    }

    #[tokio::test]
    async fn test_create_does_not_retry_other_failures() {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(PostError::DatabaseError("connection reset".to_string())));

        let mut covers = covers_accepting("a.png");
        covers
            .expect_remove()
            .withf(|cover| cover.as_str() == "a.png")
            .times(1)
            .returning(|_| Ok(()));

        let service = PostService::new(Arc::new(repository), Arc::new(covers), 10);

        let result = service.create(&author(), create_command("Hello World", None)).await;
        assert!(matches!(result.unwrap_err(), PostError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_create_fails_when_candidates_run_out() {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_create()
            .times(3)
            .returning(|post| Err(PostError::SlugAlreadyExists(post.slug.to_string())));

        let mut covers = covers_accepting("a.png");
        covers.expect_remove().times(1).returning(|_| Ok(()));

        let service = PostService::new(Arc::new(repository), Arc::new(covers), 10)
            .with_slug_generator(SlugGenerator::new(2, 1));

        let err = service
            .create(&author(), create_command("Hello World", None))
            .await
            .unwrap_err();

        assert!(matches!(err, PostError::SlugExhausted(_)));
        assert_eq!(err.class(), crate::domain::errors::ErrorClass::Fault);
    }

    #[tokio::test]
    async fn test_create_rejected_cover_writes_nothing() {
        let mut repository = MockTestPostRepository::new();
        repository.expect_create().times(0);

        let mut covers = MockTestCoverStorage::new();
        covers
            .expect_store()
            .times(1)
            .returning(|_| Err(PostError::InvalidCover("unsupported type".to_string())));

        let service = PostService::new(Arc::new(repository), Arc::new(covers), 10);

        let err = service
            .create(&author(), create_command("Hello World", None))
            .await
            .unwrap_err();
        assert_eq!(err.class(), crate::domain::errors::ErrorClass::Unprocessable);
    }

    #[tokio::test]
    async fn test_edit_nothing_to_update_skips_store() {
        let mut repository = MockTestPostRepository::new();
        repository.expect_find_by_slug().times(0);
        repository.expect_update().times(0);

        let service = PostService::new(
            Arc::new(repository),
            Arc::new(MockTestCoverStorage::new()),
            10,
        );

        let err = service
            .edit(&slug("hello-world"), UpdatePostCommand::default())
            .await
            .unwrap_err();

        assert!(matches!(err, PostError::NothingToUpdate));
        assert_eq!(err.class(), crate::domain::errors::ErrorClass::Unprocessable);
    }

    #[tokio::test]
    async fn test_edit_unknown_slug() {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_find_by_slug()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = PostService::new(
            Arc::new(repository),
            Arc::new(MockTestCoverStorage::new()),
            10,
        );

        let command = UpdatePostCommand {
            status: Some(PostStatus::Published),
            ..Default::default()
        };
        let err = service.edit(&slug("missing"), command).await.unwrap_err();
        assert!(matches!(err, PostError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_edit_applies_only_supplied_fields() {
        let existing = stored_post("hello-world", PostStatus::Draft, "old.png");
        let found = AuthoredPost {
            post: existing.clone(),
            author_name: Some("Ana".to_string()),
        };

        let mut repository = MockTestPostRepository::new();
        repository
            .expect_find_by_slug()
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        repository
            .expect_update()
            .withf(|slug, changes| {
                slug.as_str() == "hello-world"
                    && changes.status == Some(PostStatus::Published)
                    && changes.title.is_none()
                    && changes.body.is_none()
                    && changes.tags.is_none()
                    && changes.cover.is_none()
            })
            .times(1)
            .returning(move |_, changes| {
                let mut updated = existing.clone();
                updated.status = PostStatus::Published;
                updated.updated_at = changes.updated_at;
                Ok(Some(updated))
            });

        let mut covers = MockTestCoverStorage::new();
        covers.expect_store().times(0);
        covers.expect_remove().times(0);
        covers
            .expect_public_url()
            .returning(|cover| format!("/images/covers/{}", cover));

        let service = PostService::new(Arc::new(repository), Arc::new(covers), 10);

        let command = UpdatePostCommand {
            status: Some(PostStatus::Published),
            ..Default::default()
        };
        let view = service
            .edit(&slug("hello-world"), command)
            .await
            .expect("edit failed");

        assert_eq!(view.post.status, PostStatus::Published);
        assert_eq!(view.post.title.as_str(), "Hello World");
        assert_eq!(view.cover_url, "/images/covers/old.png");
        assert!(view.post.updated_at >= view.post.created_at);
    }

    #[tokio::test]
    async fn test_edit_replaces_cover_and_removes_old_file() {
        let existing = stored_post("hello-world", PostStatus::Draft, "old.png");
        let found = AuthoredPost {
            post: existing.clone(),
            author_name: Some("Ana".to_string()),
        };

        let mut repository = MockTestPostRepository::new();
        repository
            .expect_find_by_slug()
            .returning(move |_| Ok(Some(found.clone())));
        repository
            .expect_update()
            .withf(|_, changes| changes.cover.as_ref().map(CoverRef::as_str) == Some("new.png"))
            .times(1)
            .returning(move |_, changes| {
                let mut updated = existing.clone();
                updated.cover = changes.cover.unwrap();
                Ok(Some(updated))
            });

        let mut covers = covers_accepting("new.png");
        covers
            .expect_remove()
            .withf(|cover| cover.as_str() == "old.png")
            .times(1)
            .returning(|_| Ok(()));

        let service = PostService::new(Arc::new(repository), Arc::new(covers), 10);

        let command = UpdatePostCommand {
            cover: Some(upload()),
            ..Default::default()
        };
        let view = service
            .edit(&slug("hello-world"), command)
            .await
            .expect("edit failed");

        assert_eq!(view.post.cover.as_str(), "new.png");
    }

    #[tokio::test]
    async fn test_edit_rejected_cover_leaves_post_untouched() {
        let found = AuthoredPost {
            post: stored_post("hello-world", PostStatus::Draft, "old.png"),
            author_name: None,
        };

        let mut repository = MockTestPostRepository::new();
        repository
            .expect_find_by_slug()
            .returning(move |_| Ok(Some(found.clone())));
        repository.expect_update().times(0);

        let mut covers = MockTestCoverStorage::new();
        covers
            .expect_store()
            .times(1)
            .returning(|_| Err(PostError::InvalidCover("unsupported type".to_string())));
        covers.expect_remove().times(0);

        let service = PostService::new(Arc::new(repository), Arc::new(covers), 10);

        let command = UpdatePostCommand {
            title: Some(PostTitle::new("New title".to_string()).unwrap()),
            cover: Some(upload()),
            ..Default::default()
        };
        let err = service.edit(&slug("hello-world"), command).await.unwrap_err();
        assert!(matches!(err, PostError::InvalidCover(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_cover() {
        let deleted = stored_post("hello-world", PostStatus::Published, "a.png");

        let mut repository = MockTestPostRepository::new();
        repository
            .expect_delete()
            .times(1)
            .returning(move |_| Ok(Some(deleted.clone())));

        let mut covers = MockTestCoverStorage::new();
        covers
            .expect_remove()
            .withf(|cover| cover.as_str() == "a.png")
            .times(1)
            .returning(|_| Ok(()));

        let service = PostService::new(Arc::new(repository), Arc::new(covers), 10);

        service
            .delete(&slug("hello-world"))
            .await
            .expect("delete failed");
    }

    #[tokio::test]
    async fn test_delete_survives_cover_removal_failure() {
        let deleted = stored_post("hello-world", PostStatus::Published, "a.png");

        let mut repository = MockTestPostRepository::new();
        repository
            .expect_delete()
            .returning(move |_| Ok(Some(deleted.clone())));

        let mut covers = MockTestCoverStorage::new();
        covers
            .expect_remove()
            .returning(|_| Err(PostError::Storage("permission denied".to_string())));

        let service = PostService::new(Arc::new(repository), Arc::new(covers), 10);

        assert!(service.delete(&slug("hello-world")).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut repository = MockTestPostRepository::new();
        repository.expect_delete().times(1).returning(|_| Ok(None));

        let service = PostService::new(
            Arc::new(repository),
            Arc::new(MockTestCoverStorage::new()),
            10,
        );

        let err = service.delete(&slug("hello-world")).await.unwrap_err();
        assert!(matches!(err, PostError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_published_filters_by_status() {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_find_page()
            .withf(|status, page, page_size| {
                *status == Some(PostStatus::Published) && page.number() == 2 && *page_size == 5
            })
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let service = PostService::new(
            Arc::new(repository),
            Arc::new(MockTestCoverStorage::new()),
            5,
        );

        let posts = service
            .list_published(Page::new(2).unwrap())
            .await
            .expect("list failed");
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_list_for_admin_includes_every_status() {
        let draft = AuthoredPost {
            post: stored_post("draft-post", PostStatus::Draft, "d.png"),
            author_name: Some("Ana".to_string()),
        };

        let mut repository = MockTestPostRepository::new();
        repository
            .expect_find_page()
            .withf(|status, _, _| status.is_none())
            .times(1)
            .returning(move |_, _, _| Ok(vec![draft.clone()]));

        let service = PostService::new(Arc::new(repository), Arc::new(covers_accepting("x")), 10);

        let posts = service
            .list_for_admin(Page::FIRST)
            .await
            .expect("list failed");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].cover_url, "http://localhost/images/covers/d.png");
    }

    #[tokio::test]
    async fn test_get_by_slug_hides_drafts_from_public() {
        let found = AuthoredPost {
            post: stored_post("draft-post", PostStatus::Draft, "d.png"),
            author_name: Some("Ana".to_string()),
        };

        let mut repository = MockTestPostRepository::new();
        repository
            .expect_find_by_slug()
            .times(2)
            .returning(move |_| Ok(Some(found.clone())));

        let service = PostService::new(Arc::new(repository), Arc::new(covers_accepting("x")), 10);

        let public = service.get_by_slug(&slug("draft-post"), false).await;
        assert!(matches!(public.unwrap_err(), PostError::NotFound(_)));

        let admin = service
            .get_by_slug(&slug("draft-post"), true)
            .await
            .expect("admin read failed");
        assert_eq!(admin.post.status, PostStatus::Draft);
    }

    /// Post store honoring slug uniqueness atomically, like the database does.
    #[derive(Default)]
    struct InMemoryPostRepository {
        posts: Mutex<HashMap<String, Post>>,
    }

    #[async_trait]
    impl PostRepository for InMemoryPostRepository {
        async fn create(&self, post: Post) -> Result<Post, PostError> {
            let mut posts = self.posts.lock().unwrap();
            if posts.contains_key(post.slug.as_str()) {
                return Err(PostError::SlugAlreadyExists(post.slug.to_string()));
            }
            posts.insert(post.slug.to_string(), post.clone());
            Ok(post)
        }

        async fn find_by_slug(&self, slug: &Slug) -> Result<Option<AuthoredPost>, PostError> {
            Ok(self.posts.lock().unwrap().get(slug.as_str()).map(|post| AuthoredPost {
                post: post.clone(),
                author_name: None,
            }))
        }

        async fn find_page(
            &self,
            _status: Option<PostStatus>,
            _page: Page,
            _page_size: u32,
        ) -> Result<Vec<AuthoredPost>, PostError> {
            Ok(vec![])
        }

        async fn update(&self, _slug: &Slug, _changes: PostChanges) -> Result<Option<Post>, PostError> {
            Ok(None)
        }

        async fn delete(&self, slug: &Slug) -> Result<Option<Post>, PostError> {
            Ok(self.posts.lock().unwrap().remove(slug.as_str()))
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_distinct_slugs() {
        let repository = Arc::new(InMemoryPostRepository::default());
        let service = Arc::new(PostService::new(
            Arc::clone(&repository),
            Arc::new(covers_accepting("a.png")),
            10,
        ));

        let tasks = (0..8).map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .create(&author(), create_command("Hello World", None))
                    .await
            })
        });

        let mut slugs: Vec<String> = futures::future::join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.unwrap().unwrap().post.slug.to_string())
            .collect();
        slugs.sort();
        slugs.dedup();

        assert_eq!(slugs.len(), 8);
        assert!(slugs.contains(&"hello-world".to_string()));
        assert!(slugs.iter().all(|s| s.starts_with("hello-world")));
        assert_eq!(repository.posts.lock().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let repository = Arc::new(InMemoryPostRepository::default());
        let service = PostService::new(
            Arc::clone(&repository),
            Arc::new(covers_accepting("a.png")),
            10,
        );

        let created = service
            .create(&author(), create_command("Hello World", Some("PUBLISHED")))
            .await
            .unwrap();

        let fetched = service
            .get_by_slug(&created.post.slug, false)
            .await
            .unwrap();

        assert_eq!(fetched.post, created.post);
        assert_eq!(fetched.post.title.as_str(), "Hello World");
        assert_eq!(fetched.post.body.as_str(), "A body long enough");
        assert_eq!(fetched.post.tags.as_str(), "rust");
    }
}
