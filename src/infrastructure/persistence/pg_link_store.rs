//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use tracing::info;

use crate::config::LinkSchema;
use crate::domain::entities::LinkRecord;
use crate::domain::repositories::LinkStore;
use crate::error::{Error, Result};
use crate::utils::db_error::unique_violation;
use crate::utils::token_generator::generate_auto_token;

/// PostgreSQL store for link records.
///
/// All statements are rendered once at construction from the configured
/// [`LinkSchema`]; at call time only values are bound. Uniqueness is enforced
/// by the `url` and `resolved_token` constraints, whose violations map to
/// [`Error::DuplicateUrl`] and [`Error::TokenCollision`] by constraint name.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
    table: String,
    url_constraint: String,
    token_constraint: String,
    find_by_url_sql: String,
    find_by_token_sql: String,
    count_by_token_sql: String,
    insert_placeholder_sql: String,
    set_resolved_token_sql: String,
    increment_referral_sql: String,
    create_table_sql: String,
}

impl PgLinkStore {
    /// Creates a store over a connection pool and schema mapping.
    pub fn new(pool: Arc<PgPool>, schema: &LinkSchema) -> Self {
        // Constraint names follow the PostgreSQL default ("{table}_{column}_key")
        // so violations map identically on tables created here or by hand.
        let url_constraint = format!("{}_{}_key", schema.table, schema.url);
        let token_constraint = format!("{}_{}_key", schema.table, schema.resolved_token);

        let select = format!(
            "SELECT {id} AS id, {url} AS url, {auto} AS auto_token, \
             {token} AS resolved_token, {referrals} AS referral_count, \
             {created} AS created_at FROM {table}",
            id = schema.id,
            url = schema.url,
            auto = schema.auto_token,
            token = schema.resolved_token,
            referrals = schema.referral_count,
            created = schema.created_at,
            table = schema.table,
        );

        Self {
            pool,
            table: schema.table.clone(),
            find_by_url_sql: format!("{select} WHERE {} = $1", schema.url),
            find_by_token_sql: format!("{select} WHERE {} = $1", schema.resolved_token),
            count_by_token_sql: format!(
                "SELECT COUNT(*) FROM {} WHERE {} = $1",
                schema.table, schema.resolved_token
            ),
            insert_placeholder_sql: format!(
                "INSERT INTO {table} ({url}, {auto}, {referrals}, {created}) \
                 VALUES ($1, $2, 0, $3) \
                 RETURNING {id} AS id, {url} AS url, {auto} AS auto_token, \
                 {token} AS resolved_token, {referrals} AS referral_count, \
                 {created} AS created_at",
                table = schema.table,
                id = schema.id,
                url = schema.url,
                auto = schema.auto_token,
                token = schema.resolved_token,
                referrals = schema.referral_count,
                created = schema.created_at,
            ),
            set_resolved_token_sql: format!(
                "UPDATE {table} SET {token} = $2 WHERE {id} = $1 AND {token} IS NULL",
                table = schema.table,
                token = schema.resolved_token,
                id = schema.id,
            ),
            increment_referral_sql: format!(
                "UPDATE {table} SET {referrals} = {referrals} + 1 WHERE {id} = $1",
                table = schema.table,
                referrals = schema.referral_count,
                id = schema.id,
            ),
            create_table_sql: format!(
                "CREATE TABLE IF NOT EXISTS {table} (\
                 {id} BIGSERIAL PRIMARY KEY, \
                 {url} TEXT NOT NULL, \
                 {auto} TEXT NOT NULL, \
                 {token} TEXT, \
                 {referrals} BIGINT NOT NULL DEFAULT 0, \
                 {created} TIMESTAMPTZ NOT NULL DEFAULT now(), \
                 CONSTRAINT {url_constraint} UNIQUE ({url}), \
                 CONSTRAINT {token_constraint} UNIQUE ({token}))",
                table = schema.table,
                id = schema.id,
                url = schema.url,
                auto = schema.auto_token,
                token = schema.resolved_token,
                referrals = schema.referral_count,
                created = schema.created_at,
            ),
            url_constraint,
            token_constraint,
        }
    }

    /// Creates the link table and its unique constraints if missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] when the DDL fails.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(&self.create_table_sql)
            .execute(self.pool.as_ref())
            .await?;

        info!(table = %self.table, "link table ready");
        Ok(())
    }
}

fn record_from_row(row: &PgRow) -> Result<LinkRecord> {
    Ok(LinkRecord {
        id: row.try_get("id")?,
        url: row.try_get("url")?,
        auto_token: row.try_get("auto_token")?,
        resolved_token: row.try_get("resolved_token")?,
        referral_count: row.try_get("referral_count")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn find_by_url(&self, url: &str) -> Result<Option<LinkRecord>> {
        let row = sqlx::query(&self.find_by_url_sql)
            .bind(url)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<LinkRecord>> {
        let row = sqlx::query(&self.find_by_token_sql)
            .bind(token)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn count_by_token(&self, token: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(&self.count_by_token_sql)
            .bind(token)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn insert_placeholder(&self, url: &str) -> Result<LinkRecord> {
        let auto_token = generate_auto_token();

        let result = sqlx::query(&self.insert_placeholder_sql)
            .bind(url)
            .bind(&auto_token)
            .bind(Utc::now())
            .fetch_one(self.pool.as_ref())
            .await;

        match result {
            Ok(row) => record_from_row(&row),
            Err(e) => {
                if let Some(db) = unique_violation(&e)
                    && db.constraint() == Some(self.url_constraint.as_str())
                {
                    return Err(Error::DuplicateUrl);
                }
                Err(e.into())
            }
        }
    }

    async fn set_resolved_token(&self, id: i64, token: &str) -> Result<bool> {
        let result = sqlx::query(&self.set_resolved_token_sql)
            .bind(id)
            .bind(token)
            .execute(self.pool.as_ref())
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(e) => {
                if let Some(db) = unique_violation(&e)
                    && db.constraint() == Some(self.token_constraint.as_str())
                {
                    return Err(Error::token_collision(token));
                }
                Err(e.into())
            }
        }
    }

    async fn increment_referral(&self, id: i64) -> Result<()> {
        sqlx::query(&self.increment_referral_sql)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
