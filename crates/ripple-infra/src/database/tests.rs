use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use ripple_core::domain::{Like, Post};
use ripple_core::ports::{BaseRepository, LikeRepository, UserRepository};

use crate::database::entity::{like, post, user};
use crate::database::postgres_repo::{
    PostgresLikeRepository, PostgresPostRepository, PostgresUserRepository,
};

fn post_model(id: Uuid, user_id: Uuid, like_count: i32) -> post::Model {
    let now = chrono::Utc::now();
    post::Model {
        id,
        user_id,
        title: "Test Post".to_owned(),
        content: "Content".to_owned(),
        like_count,
        comment_count: 0,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    // Mock the query expectation
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(post_id, user_id, 3)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    assert!(result.is_some());
    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.like_count, 3);
}

#[tokio::test]
async fn test_find_user_by_email() {
    let user_id = Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: user_id,
            email: "test@example.com".to_owned(),
            username: "test".to_owned(),
            name: "Test Name".to_owned(),
            password_hash: "hash".to_owned(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user = repo.find_by_email("test@example.com").await.unwrap();

    assert!(user.is_some());
    let user = user.unwrap();
    assert_eq!(user.id, user_id);
    assert_eq!(user.username, "test");
}

#[tokio::test]
async fn test_create_like_bumps_counter_in_same_transaction() {
    let user_id = Uuid::new_v4();
    let post_id = Uuid::new_v4();

    // One query result for the INSERT .. RETURNING, one exec result for the
    // counter UPDATE.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![like::Model {
            id: 7,
            user_id,
            post_id,
        }]])
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresLikeRepository::new(db);

    let like: Like = repo.create(user_id, post_id).await.unwrap();

    assert_eq!(like.id, 7);
    assert_eq!(like.post_id, post_id);
}

#[tokio::test]
async fn test_delete_like_clamps_counter_at_zero() {
    let user_id = Uuid::new_v4();
    let post_id = Uuid::new_v4();

    // The decrement UPDATE matches no row (counter already at zero); the
    // engine then confirms the post still exists and clamps instead of
    // failing the delete.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![like::Model {
            id: 7,
            user_id,
            post_id,
        }]])
        .append_query_results(vec![vec![post_model(post_id, user_id, 0)]])
        .append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = PostgresLikeRepository::new(db);

    repo.delete(7).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_like_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<like::Model>::new()])
        .into_connection();

    let repo = PostgresLikeRepository::new(db);

    let result = repo.delete(42).await;

    assert!(matches!(
        result,
        Err(ripple_core::error::RepoError::NotFound)
    ));
}
