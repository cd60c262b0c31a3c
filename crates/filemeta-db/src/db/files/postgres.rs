use filemeta_core::models::{FileRecord, FileRecordUpdate};
use filemeta_core::AppError;
use sqlx::{PgPool, Postgres};

use super::FileRecordStore;

/// `files` repository over a direct Postgres connection pool
#[derive(Clone)]
pub struct PostgresFileRepository {
    pool: PgPool,
}

impl PostgresFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FileRecordStore for PostgresFileRepository {
    #[tracing::instrument(skip(self, update), fields(
        db.system = "postgresql",
        db.table = "files",
        db.operation = "update",
        db.record_id = %storage_object_id
    ))]
    async fn update_file_metadata(
        &self,
        storage_object_id: &str,
        update: &FileRecordUpdate,
    ) -> Result<FileRecord, AppError> {
        // A NULL mime_type keeps whatever the row already holds
        let record = sqlx::query_as::<Postgres, FileRecord>(
            r#"
            UPDATE files
            SET name = $2, mime_type = COALESCE($3, mime_type)
            WHERE storage_object_id = $1::uuid
            RETURNING storage_object_id::text AS storage_object_id, name, mime_type
            "#,
        )
        .bind(storage_object_id)
        .bind(&update.name)
        .bind(update.mime_type.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        record.ok_or_else(|| {
            AppError::NotFound(format!(
                "no files row with storage_object_id {}",
                storage_object_id
            ))
        })
    }

    #[tracing::instrument(skip(self), fields(db.system = "postgresql", db.operation = "select"))]
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<Postgres, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
