use crate::domain::{
    models::field::{attach_options, Field, FieldOption},
    ports::FieldRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresFieldRepo {
    pool: PgPool,
}

impl PostgresFieldRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FieldRepository for PostgresFieldRepo {
    async fn create(&self, field: &Field, options: &[FieldOption]) -> Result<Field, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let mut created = sqlx::query_as::<_, Field>(
            "INSERT INTO fields (id, name, field_type, category, visibility, user_id, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id, name, field_type, category, visibility, user_id, created_at",
        )
            .bind(&field.id)
            .bind(&field.name)
            .bind(&field.field_type)
            .bind(&field.category)
            .bind(&field.visibility)
            .bind(&field.user_id)
            .bind(field.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        for option in options {
            sqlx::query("INSERT INTO field_options (id, field_id, label, value, sequence) VALUES ($1, $2, $3, $4, $5)")
                .bind(&option.id)
                .bind(&option.field_id)
                .bind(&option.label)
                .bind(&option.value)
                .bind(option.sequence)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        created.options = options.to_vec();
        Ok(created)
    }

    async fn list_visible(&self, user_id: &str) -> Result<Vec<Field>, AppError> {
        let mut fields = sqlx::query_as::<_, Field>(
            "SELECT id, name, field_type, category, visibility, user_id, created_at FROM fields
             WHERE visibility = 'PUBLIC' OR user_id = $1
             ORDER BY created_at ASC, id ASC",
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let options = sqlx::query_as::<_, FieldOption>(
            "SELECT o.id, o.field_id, o.label, o.value, o.sequence FROM field_options o
             JOIN fields f ON f.id = o.field_id
             WHERE f.visibility = 'PUBLIC' OR f.user_id = $1
             ORDER BY o.field_id, o.sequence",
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        attach_options(&mut fields, options);
        Ok(fields)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Field>, AppError> {
        let mut fields = sqlx::query_as::<_, Field>(
            "SELECT f.id, f.name, f.field_type, f.category, f.visibility, f.user_id, f.created_at FROM fields f
             JOIN event_fields ef ON ef.field_id = f.id
             WHERE ef.event_id = $1
             ORDER BY ef.sequence ASC",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let options = sqlx::query_as::<_, FieldOption>(
            "SELECT o.id, o.field_id, o.label, o.value, o.sequence FROM field_options o
             JOIN event_fields ef ON ef.field_id = o.field_id
             WHERE ef.event_id = $1
             ORDER BY o.field_id, o.sequence",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        attach_options(&mut fields, options);
        Ok(fields)
    }
}
