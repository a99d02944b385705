//! # Blogify Client
//!
//! Typed access to the Blogify REST API for front ends and tools.
//! The bearer token returned by [`BlogifyClient::login`] is kept and sent on
//! every later request until [`BlogifyClient::logout`].

mod error;

use std::time::Duration;

use reqwest::{Method, RequestBuilder, multipart};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use blogify_shared::MessageResponse;
use blogify_shared::dto::{
    AuthResponse, CommentResponse, CommentThread, CreateCommentRequest, LikeResponse,
    LoginRequest, NotificationResponse, PostRequest, PostResponse, ReadAllResponse,
    RegisterRequest, RegisterResponse, UpdateCommentRequest, UploadResponse, UserResponse,
};

pub use error::{ClientError, GENERIC_ERROR_MESSAGE};

pub type ClientResult<T> = Result<T, ClientError>;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct BlogifyClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BlogifyClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Use a preconfigured `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn logout(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "API request failed");

        Err(ClientError::Api {
            status: status.as_u16(),
            body: serde_json::from_str(&text).ok(),
        })
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(method, path).json(body)).await
    }

    // ---- accounts ----

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisterResponse> {
        self.send_json(Method::POST, "/auth/register", request).await
    }

    /// Log in and keep the returned token for later calls.
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self.send_json(Method::POST, "/auth/login", &request).await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    pub async fn me(&self) -> ClientResult<UserResponse> {
        self.send(self.request(Method::GET, "/auth/me")).await
    }

    // ---- posts ----

    pub async fn list_posts(&self) -> ClientResult<Vec<PostResponse>> {
        self.send(self.request(Method::GET, "/posts")).await
    }

    pub async fn get_post(&self, id: Uuid) -> ClientResult<PostResponse> {
        self.send(self.request(Method::GET, &format!("/posts/{id}"))).await
    }

    pub async fn create_post(&self, post: &PostRequest) -> ClientResult<PostResponse> {
        self.send_json(Method::POST, "/posts", post).await
    }

    pub async fn update_post(&self, id: Uuid, post: &PostRequest) -> ClientResult<PostResponse> {
        self.send_json(Method::PUT, &format!("/posts/{id}"), post).await
    }

    pub async fn delete_post(&self, id: Uuid) -> ClientResult<MessageResponse> {
        self.send(self.request(Method::DELETE, &format!("/posts/{id}")))
            .await
    }

    // ---- comments ----

    pub async fn list_comments(&self, post_id: Uuid) -> ClientResult<Vec<CommentThread>> {
        self.send(self.request(Method::GET, &format!("/posts/{post_id}/comments")))
            .await
    }

    /// Comment on a post; `parent` makes it a reply to a top-level comment.
    pub async fn create_comment(
        &self,
        post_id: Uuid,
        content: &str,
        parent: Option<Uuid>,
    ) -> ClientResult<CommentResponse> {
        let request = CreateCommentRequest {
            content: Some(content.to_string()),
            parent_comment: parent,
        };
        self.send_json(Method::POST, &format!("/posts/{post_id}/comments"), &request)
            .await
    }

    pub async fn update_comment(&self, id: Uuid, content: &str) -> ClientResult<CommentResponse> {
        let request = UpdateCommentRequest {
            content: Some(content.to_string()),
        };
        self.send_json(Method::PUT, &format!("/comments/{id}"), &request).await
    }

    pub async fn delete_comment(&self, id: Uuid) -> ClientResult<MessageResponse> {
        self.send(self.request(Method::DELETE, &format!("/comments/{id}")))
            .await
    }

    pub async fn toggle_like(&self, id: Uuid) -> ClientResult<LikeResponse> {
        self.send(self.request(Method::POST, &format!("/comments/{id}/like")))
            .await
    }

    // ---- notifications ----

    pub async fn notifications(&self) -> ClientResult<Vec<NotificationResponse>> {
        self.send(self.request(Method::GET, "/notifications")).await
    }

    pub async fn mark_notification_read(&self, id: Uuid) -> ClientResult<NotificationResponse> {
        self.send(self.request(Method::POST, &format!("/notifications/{id}/read")))
            .await
    }

    pub async fn mark_all_notifications_read(&self) -> ClientResult<ReadAllResponse> {
        self.send(self.request(Method::POST, "/notifications/read-all"))
            .await
    }

    // ---- media ----

    pub async fn upload_image(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<UploadResponse> {
        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("image", part);

        self.send(self.request(Method::POST, "/upload").multipart(form))
            .await
    }
}
