//! PostgreSQL repository implementations.
//!
//! Like and comment writes wrap the row mutation and the counter adjustment
//! in one transaction: either both commit or neither does.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, FromQueryResult, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set, TransactionError, TransactionTrait,
};
use uuid::Uuid;

use ripple_core::domain::{Comment, Like, PostWithAuthor, User};
use ripple_core::error::RepoError;
use ripple_core::pagination::{Page, PageRequest};
use ripple_core::ports::{
    CommentRepository, LikeRepository, PostOrdering, PostQuery, PostRepository, UserRepository,
};

use super::counters;
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::like::{self, Entity as LikeEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

fn with_author((model, author): (post::Model, Option<user::Model>)) -> PostWithAuthor {
    PostWithAuthor {
        username: author.map(|u| u.username).unwrap_or_default(),
        post: model.into(),
    }
}

/// Escape LIKE wildcards in a user-supplied search term.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(with_author))
    }

    async fn list(
        &self,
        query: PostQuery,
        page: PageRequest,
    ) -> Result<Page<PostWithAuthor>, RepoError> {
        let mut select = PostEntity::find().find_also_related(UserEntity);

        if let Some(term) = query.search.as_deref().filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", escape_like(term));
            select = select.filter(
                Condition::any()
                    .add(Expr::col((post::Entity, post::Column::Title)).ilike(pattern.clone()))
                    .add(Expr::col((user::Entity, user::Column::Username)).ilike(pattern)),
            );
        }

        let order = match query.ordering {
            PostOrdering::CreatedAtAsc => Order::Asc,
            PostOrdering::CreatedAtDesc => Order::Desc,
        };
        let select = select.order_by(post::Column::CreatedAt, order);

        let paginator = select.paginate(&self.db, page.page_size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        let rows = paginator
            .fetch_page(page.index())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(Page {
            items: rows.into_iter().map(with_author).collect(),
            total,
        })
    }
}

fn flatten_txn_err(err: TransactionError<RepoError>) -> RepoError {
    match err {
        TransactionError::Connection(e) => RepoError::Connection(e.to_string()),
        TransactionError::Transaction(e) => e,
    }
}

async fn page_of<E, T>(
    select: Select<E>,
    db: &DbConn,
    page: PageRequest,
) -> Result<Page<T>, RepoError>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync,
    T: From<E::Model>,
{
    let paginator = select.paginate(db, page.page_size);
    let total = paginator
        .num_items()
        .await
        .map_err(|e| RepoError::Query(e.to_string()))?;
    let rows = paginator
        .fetch_page(page.index())
        .await
        .map_err(|e| RepoError::Query(e.to_string()))?;

    Ok(Page {
        items: rows.into_iter().map(Into::into).collect(),
        total,
    })
}

/// PostgreSQL like repository.
pub struct PostgresLikeRepository {
    db: DbConn,
}

impl PostgresLikeRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn create(&self, user_id: Uuid, post_id: Uuid) -> Result<Like, RepoError> {
        let model = self
            .db
            .transaction::<_, like::Model, RepoError>(move |txn| {
                Box::pin(async move {
                    let row = like::ActiveModel {
                        user_id: Set(user_id),
                        post_id: Set(post_id),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(map_db_err)?;

                    counters::bump_like_count(txn, post_id, 1).await?;

                    Ok(row)
                })
            })
            .await
            .map_err(flatten_txn_err)?;

        tracing::debug!(like_id = model.id, %post_id, "like created");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Like>, RepoError> {
        let result = LikeEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.db
            .transaction::<_, (), RepoError>(move |txn| {
                Box::pin(async move {
                    let row = LikeEntity::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(|e| RepoError::Query(e.to_string()))?
                        .ok_or(RepoError::NotFound)?;

                    LikeEntity::delete_by_id(id)
                        .exec(txn)
                        .await
                        .map_err(map_db_err)?;

                    counters::bump_like_count(txn, row.post_id, -1).await?;

                    Ok(())
                })
            })
            .await
            .map_err(flatten_txn_err)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Like>, RepoError> {
        page_of(
            LikeEntity::find().order_by_desc(like::Column::Id),
            &self.db,
            page,
        )
        .await
    }

    async fn list_by_post(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Like>, RepoError> {
        page_of(
            LikeEntity::find()
                .filter(like::Column::PostId.eq(post_id))
                .order_by_desc(like::Column::Id),
            &self.db,
            page,
        )
        .await
    }
}

/// PostgreSQL comment repository.
pub struct PostgresCommentRepository {
    db: DbConn,
}

impl PostgresCommentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        content: String,
    ) -> Result<Comment, RepoError> {
        let model = self
            .db
            .transaction::<_, comment::Model, RepoError>(move |txn| {
                Box::pin(async move {
                    let row = comment::ActiveModel {
                        user_id: Set(user_id),
                        post_id: Set(post_id),
                        content: Set(content),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(map_db_err)?;

                    counters::bump_comment_count(txn, post_id, 1).await?;

                    Ok(row)
                })
            })
            .await
            .map_err(flatten_txn_err)?;

        tracing::debug!(comment_id = model.id, %post_id, "comment created");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        let result = CommentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.db
            .transaction::<_, (), RepoError>(move |txn| {
                Box::pin(async move {
                    let row = CommentEntity::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(|e| RepoError::Query(e.to_string()))?
                        .ok_or(RepoError::NotFound)?;

                    CommentEntity::delete_by_id(id)
                        .exec(txn)
                        .await
                        .map_err(map_db_err)?;

                    counters::bump_comment_count(txn, row.post_id, -1).await?;

                    Ok(())
                })
            })
            .await
            .map_err(flatten_txn_err)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Comment>, RepoError> {
        page_of(
            CommentEntity::find().order_by_desc(comment::Column::Id),
            &self.db,
            page,
        )
        .await
    }

    async fn list_by_post(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Comment>, RepoError> {
        page_of(
            CommentEntity::find()
                .filter(comment::Column::PostId.eq(post_id))
                .order_by_desc(comment::Column::Id),
            &self.db,
            page,
        )
        .await
    }
}
