use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::resources::models::{Resource, ResourceFilter, ResourceType};

/// Row to insert after the file has been stored
#[derive(Debug, Clone)]
pub struct NewResource {
    pub title: String,
    pub branch: String,
    pub semester: i32,
    pub subject_code: String,
    pub resource_type: ResourceType,
    pub file_url: String,
    pub uploaded_by: Uuid,
    pub folder_id: Option<Uuid>,
}

#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// All matching resources, newest first
    async fn list(&self, filter: &ResourceFilter) -> Result<Vec<Resource>>;

    async fn page(&self, filter: &ResourceFilter, limit: i64, offset: i64)
        -> Result<Vec<Resource>>;

    async fn count(&self, filter: &ResourceFilter) -> Result<i64>;

    async fn find(&self, id: Uuid) -> Result<Option<Resource>>;

    async fn insert(&self, resource: NewResource) -> Result<Resource>;

    async fn update_details(
        &self,
        id: Uuid,
        title: &str,
        subject_code: &str,
    ) -> Result<Option<Resource>>;

    async fn set_folder(&self, id: Uuid, folder_id: Option<Uuid>) -> Result<Option<Resource>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn recent(&self, limit: i64) -> Result<Vec<Resource>>;

    async fn uploaded_by(&self, user_id: Uuid) -> Result<Vec<Resource>>;
}

pub struct PgResourceRepository {
    pool: PgPool,
}

impl PgResourceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select(filter: &ResourceFilter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM resources", RESOURCE_COLUMNS));
        filter.push_conditions(&mut qb);
        qb.push(" ORDER BY created_at DESC, id");
        qb
    }
}

const RESOURCE_COLUMNS: &str =
    "id, title, branch, semester, subject_code, type, file_url, uploaded_by, folder_id, created_at";

fn db_error(context: &str) -> impl FnOnce(sqlx::Error) -> AppError + '_ {
    move |e| {
        tracing::error!("Failed to {}: {:?}", context, e);
        AppError::Database(e)
    }
}

#[async_trait]
impl ResourceRepository for PgResourceRepository {
    async fn list(&self, filter: &ResourceFilter) -> Result<Vec<Resource>> {
        Self::select(filter)
            .build_query_as::<Resource>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list resources"))
    }

    async fn page(
        &self,
        filter: &ResourceFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Resource>> {
        let mut qb = Self::select(filter);
        qb.push(" LIMIT ").push_bind(limit);
        qb.push(" OFFSET ").push_bind(offset);

        qb.build_query_as::<Resource>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("page resources"))
    }

    async fn count(&self, filter: &ResourceFilter) -> Result<i64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM resources");
        filter.push_conditions(&mut qb);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count resources"))
    }

    async fn find(&self, id: Uuid) -> Result<Option<Resource>> {
        sqlx::query_as::<_, Resource>(&format!(
            "SELECT {} FROM resources WHERE id = $1",
            RESOURCE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("get resource"))
    }

    async fn insert(&self, resource: NewResource) -> Result<Resource> {
        sqlx::query_as::<_, Resource>(&format!(
            r#"
            INSERT INTO resources (title, branch, semester, subject_code, type, file_url, uploaded_by, folder_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            RESOURCE_COLUMNS
        ))
        .bind(&resource.title)
        .bind(&resource.branch)
        .bind(resource.semester)
        .bind(&resource.subject_code)
        .bind(resource.resource_type.as_str())
        .bind(&resource.file_url)
        .bind(resource.uploaded_by)
        .bind(resource.folder_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("insert resource"))
    }

    async fn update_details(
        &self,
        id: Uuid,
        title: &str,
        subject_code: &str,
    ) -> Result<Option<Resource>> {
        sqlx::query_as::<_, Resource>(&format!(
            "UPDATE resources SET title = $2, subject_code = $3 WHERE id = $1 RETURNING {}",
            RESOURCE_COLUMNS
        ))
        .bind(id)
        .bind(title)
        .bind(subject_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("update resource"))
    }

    async fn set_folder(&self, id: Uuid, folder_id: Option<Uuid>) -> Result<Option<Resource>> {
        sqlx::query_as::<_, Resource>(&format!(
            "UPDATE resources SET folder_id = $2 WHERE id = $1 RETURNING {}",
            RESOURCE_COLUMNS
        ))
        .bind(id)
        .bind(folder_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("move resource"))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete resource"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Resource>> {
        sqlx::query_as::<_, Resource>(&format!(
            "SELECT {} FROM resources ORDER BY created_at DESC, id LIMIT $1",
            RESOURCE_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list recent resources"))
    }

    async fn uploaded_by(&self, user_id: Uuid) -> Result<Vec<Resource>> {
        sqlx::query_as::<_, Resource>(&format!(
            "SELECT {} FROM resources WHERE uploaded_by = $1 ORDER BY created_at DESC, id",
            RESOURCE_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list uploads"))
    }
}
