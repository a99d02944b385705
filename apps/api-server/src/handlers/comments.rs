//! Comment handlers: threaded listing, replies, edits and likes.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogify_core::domain::{Comment, Notification, validate_comment_content};
use blogify_shared::MessageResponse;
use blogify_shared::dto::{
    CommentThread, CreateCommentRequest, LikeResponse, UpdateCommentRequest,
};

use super::views::AuthorDirectory;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

async fn find_comment(state: &AppState, id: Uuid) -> AppResult<Comment> {
    state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
}

/// Load a comment the caller may modify: 404 if missing, 403 if not theirs.
async fn load_owned_comment(state: &AppState, id: Uuid, identity: &Identity) -> AppResult<Comment> {
    let comment = find_comment(state, id).await?;

    if !comment.is_authored_by(identity.user_id) {
        return Err(AppError::Forbidden(
            "You are not the author of this comment".to_string(),
        ));
    }

    Ok(comment)
}

/// GET /posts/{id}/comments
///
/// Top-level comments newest first, each with its replies oldest first.
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let mut authors = AuthorDirectory::new(state.users.as_ref());
    let mut threads = Vec::new();

    for top in state.comments.find_top_level(post_id).await? {
        let mut replies = Vec::new();
        for reply in state.comments.find_replies(top.id).await? {
            replies.push(authors.comment(reply).await?);
        }

        threads.push(CommentThread {
            comment: authors.comment(top).await?,
            replies,
        });
    }

    Ok(HttpResponse::Ok().json(threads))
}

/// POST /posts/{id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();
    let content = validate_comment_content(req.content.as_deref())?;

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if let Some(parent_id) = req.parent_comment {
        let parent = state
            .comments
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Parent comment not found".to_string()))?;
        parent.accepts_reply_on(post.id)?;
    }

    let comment = Comment::new(post.id, identity.user_id, content, req.parent_comment);
    let comment = state.comments.insert(comment).await?;

    tracing::info!(comment_id = %comment.id, post_id = %post.id, "Comment created");

    if let Some(notification) = Notification::commented(&post, identity.user_id, &identity.name) {
        state.notifier.dispatch(notification).await;
    }

    let mut authors = AuthorDirectory::new(state.users.as_ref());
    Ok(HttpResponse::Created().json(authors.comment(comment).await?))
}

/// PUT /comments/{id}
pub async fn update_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let mut comment = load_owned_comment(&state, path.into_inner(), &identity).await?;
    let content = validate_comment_content(body.content.as_deref())?;

    comment.edit(content);
    let comment = state.comments.update(comment).await?;

    let mut authors = AuthorDirectory::new(state.users.as_ref());
    Ok(HttpResponse::Ok().json(authors.comment(comment).await?))
}

/// DELETE /comments/{id}
///
/// Removes the comment and its direct replies.
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = load_owned_comment(&state, path.into_inner(), &identity).await?;

    let replies = state.comments.delete_replies(comment.id).await?;
    state.comments.delete(comment.id).await?;

    tracing::info!(comment_id = %comment.id, replies, "Comment deleted");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Comment deleted successfully")))
}

/// POST /comments/{id}/like
///
/// Toggles the caller's like. Only a new like notifies the author.
pub async fn toggle_like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let mut comment = find_comment(&state, path.into_inner()).await?;

    let has_liked = comment.toggle_like(identity.user_id);
    let comment = state.comments.update(comment).await?;

    if has_liked {
        if let Some(notification) = Notification::liked(&comment, identity.user_id, &identity.name) {
            state.notifier.dispatch(notification).await;
        }
    }

    Ok(HttpResponse::Ok().json(LikeResponse {
        likes: comment.like_count(),
        has_liked,
    }))
}
