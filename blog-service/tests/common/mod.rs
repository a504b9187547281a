#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenSecret;
use blog_service::domain::identity::resolver::IdentityResolver;
use blog_service::domain::post::service::PostService;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::outbound::storage::LocalCoverStorage;
use blog_service::post::errors::PostError;
use blog_service::post::models::AuthoredPost;
use blog_service::post::models::Page;
use blog_service::post::models::Post;
use blog_service::post::models::PostChanges;
use blog_service::post::models::PostStatus;
use blog_service::post::models::Slug;
use blog_service::post::ports::PostRepository;
use blog_service::user::errors::UserError;
use blog_service::user::models::EmailAddress;
use blog_service::user::models::PublicUser;
use blog_service::user::models::User;
use blog_service::user::models::UserId;
use blog_service::user::ports::UserRepository;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const PAGE_SIZE: u32 = 2;

/// Credential store that enforces email uniqueness like the users table does.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn remove(&self, id: &UserId) {
        self.users.lock().unwrap().remove(id);
    }

    fn name_of(&self, id: &UserId) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .get(id)
            .map(|user| user.name.as_str().to_string())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<PublicUser>, UserError> {
        Ok(self.users.lock().unwrap().get(id).map(User::to_public))
    }
}

/// Post store that enforces slug uniqueness like the posts table does.
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
    users: Arc<InMemoryUserRepository>,
}

impl InMemoryPostRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            users,
        }
    }

    fn authored(&self, post: Post) -> AuthoredPost {
        let author_name = self.users.name_of(&post.author_id);
        AuthoredPost { post, author_name }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        let mut posts = self.posts.lock().unwrap();
        if posts.iter().any(|existing| existing.slug == post.slug) {
            return Err(PostError::SlugAlreadyExists(post.slug.to_string()));
        }
        posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<AuthoredPost>, PostError> {
        let found = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|post| &post.slug == slug)
            .cloned();

        Ok(found.map(|post| self.authored(post)))
    }

    async fn find_page(
        &self,
        status: Option<PostStatus>,
        page: Page,
        page_size: u32,
    ) -> Result<Vec<AuthoredPost>, PostError> {
        let mut matching: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|post| status.map_or(true, |status| post.status == status))
            .cloned()
            .collect();

        // Insertion order breaks ties between equal timestamps, newest first.
        matching.reverse();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching
            .into_iter()
            .skip(page.offset(page_size) as usize)
            .take(page_size as usize)
            .map(|post| self.authored(post))
            .collect())
    }

    async fn update(&self, slug: &Slug, changes: PostChanges) -> Result<Option<Post>, PostError> {
        let mut posts = self.posts.lock().unwrap();
        let Some(post) = posts.iter_mut().find(|post| &post.slug == slug) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(body) = changes.body {
            post.body = body;
        }
        if let Some(tags) = changes.tags {
            post.tags = tags;
        }
        if let Some(status) = changes.status {
            post.status = status;
        }
        if let Some(cover) = changes.cover {
            post.cover = cover;
        }
        post.updated_at = changes.updated_at;

        Ok(Some(post.clone()))
    }

    async fn delete(&self, slug: &Slug) -> Result<Option<Post>, PostError> {
        let mut posts = self.posts.lock().unwrap();
        let index = posts.iter().position(|post| &post.slug == slug);
        Ok(index.map(|index| posts.remove(index)))
    }
}

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub covers_dir: PathBuf,
    pub users: Arc<InMemoryUserRepository>,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let covers_dir =
            std::env::temp_dir().join(format!("blog-service-test-{}", uuid::Uuid::new_v4()));
        let cover_storage = Arc::new(LocalCoverStorage::new(covers_dir.clone(), address.clone()));
        cover_storage
            .init()
            .await
            .expect("Failed to create covers directory");

        let secret = TokenSecret::new(TEST_SECRET).expect("Invalid test secret");
        let authenticator = Arc::new(Authenticator::new(&secret, None));

        let users = Arc::new(InMemoryUserRepository::default());
        let posts = Arc::new(InMemoryPostRepository::new(Arc::clone(&users)));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&users),
            Arc::clone(&authenticator),
        ));
        let identity_resolver = Arc::new(IdentityResolver::new(
            Arc::clone(&users),
            Arc::clone(&authenticator),
        ));
        let post_service = Arc::new(PostService::new(posts, cover_storage, PAGE_SIZE));

        let router = create_router(user_service, post_service, identity_resolver, &covers_dir);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            covers_dir,
            users,
            authenticator,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Sign up a user and return `(user_id, token)`.
    pub async fn signup(&self, name: &str, email: &str) -> (String, String) {
        let response = self
            .post("/api/auth/signup")
            .json(&json!({
                "name": name,
                "email": email,
                "password": "Abcdef1"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        (
            body["data"]["user"]["id"].as_str().unwrap().to_string(),
            body["data"]["token"].as_str().unwrap().to_string(),
        )
    }

    /// Create a post through the admin API and return the response body.
    pub async fn create_post(&self, token: &str, title: &str, status: Option<&str>) -> Value {
        let mut form = post_form(title, "A body long enough to pass").part("cover", png_cover());
        if let Some(status) = status {
            form = form.text("status", status.to_string());
        }

        let response = self
            .post_authenticated("/api/admin/posts", token)
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.covers_dir);
    }
}

pub fn post_form(title: &str, body: &str) -> Form {
    Form::new()
        .text("title", title.to_string())
        .text("body", body.to_string())
        .text("tags", "rust, web".to_string())
}

pub fn png_cover() -> Part {
    Part::bytes(vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a])
        .file_name("cover.png")
        .mime_str("image/png")
        .expect("Valid mime type")
}
