//! PostgreSQL-backed post store.

use async_trait::async_trait;
use bitacora_core::{NewPost, PageRequest, Post, PostId, PostPatch};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use time::OffsetDateTime;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::PostStore;

const POST_COLUMNS: &str = "id, title, description, created_at, updated_at";

/// Row as read from the `posts` table.
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    description: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: PostId::from(row.id),
            title: row.title,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Post store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    /// Wraps an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool with at most `max_connections` connections.
    pub async fn connect(
        options: PgConnectOptions,
        max_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!(max_connections, "PostgreSQL pool initialized");

        Ok(Self::new(pool))
    }

    /// Applies the embedded migrations.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    #[instrument(skip_all)]
    async fn create(&self, new_post: NewPost) -> Result<Post, StoreError> {
        let sql = format!(
            "INSERT INTO posts (id, title, description, created_at, updated_at) \
             VALUES ($1, $2, $3, now(), now()) RETURNING {POST_COLUMNS}"
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(Uuid::from(PostId::generate()))
            .bind(new_post.title)
            .bind(new_post.description)
            .fetch_one(&self.pool)
            .await?;

        debug!(id = %row.id, "Post inserted");
        Ok(row.into())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, StoreError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Post::from))
    }

    #[instrument(skip(self), fields(page = page.page(), step = page.step()))]
    async fn find_page(&self, page: &PageRequest) -> Result<Vec<Post>, StoreError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );

        let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
        let offset = i64::try_from(page.skip()).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        debug!(rows = rows.len(), "Page fetched");
        Ok(rows.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn update(&self, id: &PostId, patch: PostPatch) -> Result<Post, StoreError> {
        let sql = format!(
            "UPDATE posts SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 updated_at = GREATEST(now(), created_at) \
             WHERE id = $1 RETURNING {POST_COLUMNS}"
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(*id.as_uuid())
            .bind(patch.title)
            .bind(patch.description)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Post::from)
            .ok_or(StoreError::MissingAfterWrite(*id))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &PostId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await?;

        debug!(rows = result.rows_affected(), "Post deleted");
        Ok(())
    }

    fn name(&self) -> &str {
        "postgres"
    }
}

impl std::fmt::Debug for PgPostStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPostStore")
            .field("pool_size", &self.pool.size())
            .field("idle", &self.pool.num_idle())
            .finish()
    }
}
