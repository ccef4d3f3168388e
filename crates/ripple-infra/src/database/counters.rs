//! Counter maintenance for the denormalized post counters.
//!
//! Every function here takes an open [`DatabaseTransaction`], so a counter
//! can only move inside the same unit of work as the child-row mutation that
//! justifies it. The arithmetic is a single UPDATE statement evaluated at
//! the store, which serializes concurrent adjustments to the same post: N
//! concurrent creates always net exactly +N.

use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter};
use uuid::Uuid;

use ripple_core::error::RepoError;

use super::entity::post;

/// Adjust a post's `like_count` by `delta` (+1 or -1).
pub(crate) async fn bump_like_count(
    txn: &DatabaseTransaction,
    post_id: Uuid,
    delta: i32,
) -> Result<(), RepoError> {
    bump(txn, post_id, post::Column::LikeCount, delta).await
}

/// Adjust a post's `comment_count` by `delta` (+1 or -1).
pub(crate) async fn bump_comment_count(
    txn: &DatabaseTransaction,
    post_id: Uuid,
    delta: i32,
) -> Result<(), RepoError> {
    bump(txn, post_id, post::Column::CommentCount, delta).await
}

async fn bump(
    txn: &DatabaseTransaction,
    post_id: Uuid,
    column: post::Column,
    delta: i32,
) -> Result<(), RepoError> {
    let mut update = post::Entity::update_many()
        .col_expr(column, Expr::col(column).add(delta))
        .filter(post::Column::Id.eq(post_id));
    if delta < 0 {
        // A decrement must never drive the counter below zero.
        update = update.filter(column.gt(0));
    }

    let result = update
        .exec(txn)
        .await
        .map_err(|e| RepoError::Query(e.to_string()))?;

    if result.rows_affected == 0 {
        let exists = post::Entity::find_by_id(post_id)
            .one(txn)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .is_some();

        if !exists {
            // The post vanished mid-flight; fail the whole unit of work so
            // the child-row mutation rolls back with us.
            return Err(RepoError::NotFound);
        }
        if delta >= 0 {
            return Err(RepoError::Query(format!(
                "counter update matched no row for existing post {post_id}"
            )));
        }
        // Decrement against an already-zero counter: clamp and carry on.
        tracing::warn!(%post_id, "counter decrement clamped at zero");
    }

    Ok(())
}
