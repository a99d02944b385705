use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};
use uuid::Uuid;

use blogify_core::domain::{Comment, Post, PostDraft};
use blogify_core::error::RepoError;
use blogify_core::ports::{BaseRepository, CommentRepository, NotificationRepository, PostRepository};

use super::entity::{comment, notification, post};
use super::postgres_repo::{
    PostgresCommentRepository, PostgresNotificationRepository, PostgresPostRepository, mask_email,
};

fn post_model(id: Uuid, author: &str, title: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: title.to_owned(),
        summary: "Summary".to_owned(),
        author: author.to_owned(),
        content: "Content".to_owned(),
        image: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn comment_model(post_id: Uuid, parent_id: Option<Uuid>, likes: Vec<Uuid>) -> comment::Model {
    let now = Utc::now();
    comment::Model {
        id: Uuid::new_v4(),
        post_id,
        author_id: Uuid::new_v4(),
        content: "Nice post".to_owned(),
        parent_id,
        likes,
        is_edited: false,
        edited_at: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let author = Uuid::new_v4().to_string();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, &author, "Test Post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post: Post = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.author, author);
}

#[tokio::test]
async fn test_list_recent_orders_by_creation_desc() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            post_model(Uuid::new_v4(), "a", "second"),
            post_model(Uuid::new_v4(), "a", "first"),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo.list_recent().await.unwrap();
    assert_eq!(posts.len(), 2);

    let log = repo.db.into_transaction_log();
    let sql = &log[0].statements()[0].sql;
    assert!(sql.contains(r#"ORDER BY "posts"."created_at" DESC"#), "{sql}");
}

#[tokio::test]
async fn test_update_of_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let draft = PostDraft::validate(Some("T".into()), None, Some("C".into()), None).unwrap();

    let result = repo.update(Post::new(Uuid::new_v4(), draft)).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_comment_likes_survive_the_mapping() {
    let post_id = Uuid::new_v4();
    let likers = vec![Uuid::new_v4(), Uuid::new_v4()];

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![comment_model(post_id, None, likers.clone())]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let top: Vec<Comment> = repo.find_top_level(post_id).await.unwrap();

    assert_eq!(top.len(), 1);
    assert_eq!(top[0].likes, likers);
    assert!(top[0].is_top_level());
}

#[tokio::test]
async fn test_delete_replies_reports_rows() {
    let parent = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 3,
        }])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    assert_eq!(repo.delete_replies(parent).await.unwrap(), 3);

    assert_eq!(
        repo.db.into_transaction_log(),
        [Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"DELETE FROM "comments" WHERE "comments"."parent_id" = $1"#,
            [parent.into()],
        )]
    );
}

#[tokio::test]
async fn test_notifications_sort_unread_first() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![notification::Model {
            id: Uuid::new_v4(),
            user_id,
            kind: notification::Kind::Like,
            message: "Bob liked your comment".to_owned(),
            link: "/post/1#comment-2".to_owned(),
            is_read: false,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresNotificationRepository::new(db);
    let notes = repo.list_for_user(user_id, 50).await.unwrap();
    assert_eq!(notes[0].kind.as_str(), "like");

    let log = repo.db.into_transaction_log();
    let sql = &log[0].statements()[0].sql;
    assert!(
        sql.contains(
            r#"ORDER BY "notifications"."is_read" ASC, "notifications"."created_at" DESC LIMIT"#
        ),
        "{sql}"
    );
}

#[test]
fn test_mask_email() {
    assert_eq!(mask_email("alice@example.com"), "a***@example.com");
    assert_eq!(mask_email("a@example.com"), "***@example.com");
    assert_eq!(mask_email("not-an-email"), "***");
}
