use crate::domain::{
    models::guest::{assemble_records, Guest, GuestRecord, GuestValue, NewGuestValue},
    ports::GuestRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteGuestRepo {
    pool: SqlitePool,
}

impl SqliteGuestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestRepository for SqliteGuestRepo {
    async fn create(&self, guest: &Guest, values: &[NewGuestValue]) -> Result<GuestRecord, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Guest>(
            "INSERT INTO guests (id, event_id, created_at) VALUES (?, ?, ?) RETURNING id, event_id, created_at",
        )
            .bind(&guest.id)
            .bind(&guest.event_id)
            .bind(guest.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        for (sequence, value) in values.iter().enumerate() {
            sqlx::query("INSERT INTO guest_values (guest_id, field_id, value, sequence) VALUES (?, ?, ?, ?)")
                .bind(&created.id)
                .bind(&value.field_id)
                .bind(&value.value)
                .bind(sequence as i32)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        let stored = sqlx::query_as::<_, GuestValue>(
            "SELECT gv.guest_id, gv.field_id, f.name AS field_name, f.field_type, gv.value FROM guest_values gv
             JOIN fields f ON f.id = gv.field_id
             WHERE gv.guest_id = ?
             ORDER BY gv.sequence ASC",
        )
            .bind(&created.id)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(GuestRecord { guest: created, values: stored })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>("SELECT id, event_id, created_at FROM guests WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<GuestRecord>, AppError> {
        let guests = sqlx::query_as::<_, Guest>(
            "SELECT id, event_id, created_at FROM guests WHERE event_id = ? ORDER BY created_at DESC, rowid DESC",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let values = sqlx::query_as::<_, GuestValue>(
            "SELECT gv.guest_id, gv.field_id, f.name AS field_name, f.field_type, gv.value FROM guest_values gv
             JOIN guests g ON g.id = gv.guest_id
             JOIN fields f ON f.id = gv.field_id
             WHERE g.event_id = ?
             ORDER BY gv.guest_id, gv.sequence ASC",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(assemble_records(guests, values))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM guests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Guest not found".into()));
        }
        Ok(())
    }
}
