//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogify_core::domain::{Post, PostDraft};
use blogify_shared::MessageResponse;
use blogify_shared::dto::{PostRequest, PostResponse};

use super::views::post_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn draft_from(req: PostRequest) -> AppResult<PostDraft> {
    Ok(PostDraft::validate(
        req.title,
        req.summary,
        req.content,
        req.image,
    )?)
}

/// Load a post the caller may modify: 404 if missing, 403 if not theirs.
async fn load_owned_post(state: &AppState, id: Uuid, identity: &Identity) -> AppResult<Post> {
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if !post.is_authored_by(identity.user_id) {
        tracing::debug!(post_id = %id, user_id = %identity.user_id, "Post owned by another user");
        return Err(AppError::Forbidden(
            "You are not the author of this post".to_string(),
        ));
    }

    Ok(post)
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<PostResponse> = state
        .posts
        .list_recent()
        .await?
        .into_iter()
        .map(post_response)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let draft = draft_from(body.into_inner())?;
    let post = state.posts.insert(Post::new(identity.user_id, draft)).await?;

    tracing::info!(post_id = %post.id, author = %identity.user_id, "Post created");

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let mut post = load_owned_post(&state, path.into_inner(), &identity).await?;
    post.replace(draft_from(body.into_inner())?);
    let post = state.posts.update(post).await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = load_owned_post(&state, path.into_inner(), &identity).await?;
    state.posts.delete(post.id).await?;

    tracing::info!(post_id = %post.id, "Post deleted");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted successfully")))
}
