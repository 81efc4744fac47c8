//! Book instances repository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use super::InstanceStore;
use crate::{
    error::AppResult,
    models::{BookTitle, Instance, InstanceData, InstanceDetails, InstanceStatus},
};

const DETAILS_SELECT: &str = r#"
    SELECT i.id, i.imprint, i.status, i.due_back,
           b.id AS book_id, b.title AS book_title
    FROM book_instances i
    JOIN books b ON b.id = i.book_id
"#;

#[derive(Clone)]
pub struct InstancesRepository {
    pool: Pool<Postgres>,
}

impl InstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn details_from_row(row: &PgRow) -> InstanceDetails {
    InstanceDetails {
        id: row.get("id"),
        book: BookTitle {
            id: row.get("book_id"),
            title: row.get("book_title"),
        },
        imprint: row.get("imprint"),
        status: row.get::<InstanceStatus, _>("status"),
        due_back: row.get::<Option<NaiveDate>, _>("due_back"),
    }
}

fn instance_from_row(row: &PgRow) -> Instance {
    Instance {
        id: row.get("id"),
        book_id: row.get("book_id"),
        imprint: row.get("imprint"),
        status: row.get("status"),
        due_back: row.get("due_back"),
    }
}

#[async_trait]
impl InstanceStore for InstancesRepository {
    async fn list(&self) -> AppResult<Vec<InstanceDetails>> {
        let rows = sqlx::query(&format!("{} ORDER BY i.id", DETAILS_SELECT))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(details_from_row).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<InstanceDetails>> {
        let row = sqlx::query(&format!("{} WHERE i.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(details_from_row))
    }

    async fn create(&self, data: &InstanceData) -> AppResult<Instance> {
        let row = sqlx::query(
            r#"
            INSERT INTO book_instances (book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4)
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status)
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(instance_from_row(&row))
    }

    async fn update(&self, id: i32, data: &InstanceData) -> AppResult<Option<Instance>> {
        let row = sqlx::query(
            r#"
            UPDATE book_instances
            SET book_id = $1, imprint = $2, status = $3, due_back = $4
            WHERE id = $5
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status)
        .bind(data.due_back)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(instance_from_row))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
