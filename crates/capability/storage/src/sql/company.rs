//! SQL 公司存储
//!
//! 通过 `PoolManager` 对 `company` 表做增删改查。

use crate::connection::PoolManager;
use crate::error::StorageError;
use crate::models::{CompanyInput, CompanyRecord};
use crate::schema::Backend;
use crate::traits::CompanyStore;
use sqlx::Row;
use sqlx::any::AnyRow;
use std::sync::Arc;

pub struct SqlCompanyStore {
    pool: Arc<PoolManager>,
}

impl SqlCompanyStore {
    pub fn new(pool: Arc<PoolManager>) -> Self {
        Self { pool }
    }
}

fn company_from_row(row: &AnyRow) -> Result<CompanyRecord, StorageError> {
    Ok(CompanyRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        location: row.try_get("location")?,
    })
}

#[async_trait::async_trait]
impl CompanyStore for SqlCompanyStore {
    async fn list_companies(&self) -> Result<Vec<CompanyRecord>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query("SELECT id, name, location FROM company ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;
        conn.release();
        rows.iter().map(company_from_row).collect()
    }

    async fn find_company(&self, company_id: i64) -> Result<Option<CompanyRecord>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query("SELECT id, name, location FROM company WHERE id = ?")
            .bind(company_id)
            .fetch_optional(&mut *conn)
            .await?;
        conn.release();
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(company_from_row(&row)?))
    }

    /// 插入公司
    ///
    /// Any 驱动在 SQLite 上不上报 `last_insert_id`，所以 SQLite 用
    /// `RETURNING id` 取回主键，MySQL 用 `last_insert_id`。
    async fn create_company(&self, input: CompanyInput) -> Result<CompanyRecord, StorageError> {
        let backend = self.pool.backend()?;
        let mut conn = self.pool.acquire().await?;
        let id = match backend {
            Backend::Sqlite => {
                let row = sqlx::query(
                    "INSERT INTO company (name, location) VALUES (?, ?) RETURNING id",
                )
                .bind(input.name.as_str())
                .bind(input.location.as_str())
                .fetch_one(&mut *conn)
                .await?;
                conn.release();
                row.try_get::<i64, _>("id")?
            }
            Backend::MySql => {
                let result = sqlx::query("INSERT INTO company (name, location) VALUES (?, ?)")
                    .bind(input.name.as_str())
                    .bind(input.location.as_str())
                    .execute(&mut *conn)
                    .await?;
                conn.release();
                result
                    .last_insert_id()
                    .ok_or_else(|| StorageError::execution("insert did not report a company id"))?
            }
        };
        Ok(input.into_record(id))
    }

    async fn update_company(
        &self,
        company_id: i64,
        input: CompanyInput,
    ) -> Result<Option<CompanyRecord>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("UPDATE company SET name = ?, location = ? WHERE id = ?")
            .bind(input.name.as_str())
            .bind(input.location.as_str())
            .bind(company_id)
            .execute(&mut *conn)
            .await?;
        conn.release();
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(input.into_record(company_id)))
    }

    async fn delete_company(&self, company_id: i64) -> Result<bool, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("DELETE FROM company WHERE id = ?")
            .bind(company_id)
            .execute(&mut *conn)
            .await?;
        conn.release();
        Ok(result.rows_affected() > 0)
    }
}
