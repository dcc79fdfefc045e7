use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{OptsBuilder, Pool};
use tracing::{debug, info};

use super::{BugReport, BugStore, NewBugReport};
use crate::config::DatabaseConfig;
use crate::constants::{MAX_RESOLUTION_LEN, TABLE_BUG_REPORTS};
use crate::error::StoreError;

type BugRow = (u64, Option<String>, Option<String>, Option<String>);

#[derive(Clone)]
pub struct MysqlStore {
    pool: Pool,
}

impl MysqlStore {
    pub fn new(config: &DatabaseConfig) -> Self {
        let pool = Pool::new(
            OptsBuilder::default()
                .user(Some(config.user.clone()))
                .db_name(Some(config.name.clone()))
                .ip_or_hostname(config.server.clone())
                .pass(Some(config.password.clone()))
                .tcp_port(config.port),
        );
        Self { pool }
    }

    pub async fn create_table(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.get_conn().await?;

        conn.query_drop(format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
                title TEXT NULL,
                description TEXT NULL,
                resolution VARCHAR({}) NULL
            ) DEFAULT CHARSET = utf8mb4",
            TABLE_BUG_REPORTS, MAX_RESOLUTION_LEN
        ))
        .await?;
        info!("Table `{}` is ready", TABLE_BUG_REPORTS);

        Ok(())
    }

    pub async fn disconnect(self) -> Result<(), StoreError> {
        self.pool.disconnect().await?;
        Ok(())
    }
}

#[async_trait]
impl BugStore for MysqlStore {
    async fn create(&self, report: NewBugReport) -> Result<BugReport, StoreError> {
        let mut conn = self.pool.get_conn().await?;

        conn.exec_drop(
            format!(
                "INSERT INTO {} (title, description, resolution) VALUES (:title, :description, :resolution)",
                TABLE_BUG_REPORTS
            ),
            params! {
                "title" => &report.title,
                "description" => &report.description,
                "resolution" => &report.resolution,
            },
        )
        .await?;

        let id = conn.last_insert_id().ok_or(StoreError::NoInsertId)?;
        debug!("Inserted bug report {}", id);

        Ok(report.with_id(id))
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<BugReport>, StoreError> {
        let mut conn = self.pool.get_conn().await?;

        let row: Option<BugRow> = conn
            .exec_first(
                format!(
                    "SELECT id, title, description, resolution FROM {} WHERE id = :id",
                    TABLE_BUG_REPORTS
                ),
                params! {
                    "id" => id,
                },
            )
            .await?;

        Ok(row.map(BugReport::from_row))
    }

    async fn find_all(&self) -> Result<Vec<BugReport>, StoreError> {
        let mut conn = self.pool.get_conn().await?;

        let rows: Vec<BugRow> = conn
            .query(format!(
                "SELECT id, title, description, resolution FROM {} ORDER BY id ASC",
                TABLE_BUG_REPORTS
            ))
            .await?;

        Ok(rows.into_iter().map(BugReport::from_row).collect())
    }

    async fn save(&self, report: &BugReport) -> Result<BugReport, StoreError> {
        let mut conn = self.pool.get_conn().await?;

        let exists: Option<u64> = conn
            .exec_first(
                format!("SELECT id FROM {} WHERE id = :id", TABLE_BUG_REPORTS),
                params! {
                    "id" => report.id,
                },
            )
            .await?;
        if exists.is_none() {
            return Err(StoreError::Missing(report.id));
        }

        conn.exec_drop(
            format!(
                "UPDATE {} SET title = :title, description = :description, resolution = :resolution WHERE id = :id",
                TABLE_BUG_REPORTS
            ),
            params! {
                "id" => report.id,
                "title" => &report.title,
                "description" => &report.description,
                "resolution" => &report.resolution,
            },
        )
        .await?;

        Ok(report.clone())
    }
}
