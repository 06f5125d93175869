//! 数据库基础设施

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use super::config::DatabaseConfig;
use super::repository::{Repository, StoreError, StoreResult};
use crate::app::products::model::{NewProduct, Product, ProductChanges, ProductWithUserRow};
use crate::app::users::model::{NewUser, User, UserProductRow};

pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// 建立连接池，整个建立过程受 connect_timeout_secs 限制
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let timeout = Duration::from_secs(config.connect_timeout_secs);
        info!(
            "Connecting to database: {}",
            redact_password(&config.url)
        );

        let connect = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(timeout)
            .connect(&config.url);

        let pool = tokio::time::timeout(timeout, connect)
            .await
            .map_err(|_| StoreError::Database(sqlx::Error::PoolTimedOut))??;

        Ok(Self { pool })
    }

    pub fn into_repository(self) -> PgRepository {
        PgRepository::new(self.pool)
    }
}

/// 日志里隐藏连接串中的密码
pub fn redact_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((credentials, host)) => match credentials.split_once(':') {
            Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}

const USER_COLUMNS: &str = "id, name, phone, email, created_at";
const PRODUCT_COLUMNS: &str = "id, name, description, price, user_id, created_at, updated_at";

/// PostgreSQL 实现
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users (name, phone, email) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(&user.name)
            .bind(&user.phone)
            .bind(&user.email)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn get_user(&self, id: i32) -> StoreResult<User> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_users_with_products(&self) -> StoreResult<Vec<UserProductRow>> {
        let rows = sqlx::query_as::<_, UserProductRow>(
            r#"
            SELECT
                u.id          AS user_id,
                u.name        AS user_name,
                u.phone       AS user_phone,
                u.email       AS user_email,
                u.created_at  AS user_created_at,
                p.id          AS product_id,
                p.name        AS product_name,
                p.description AS product_description,
                p.price       AS product_price,
                p.created_at  AS product_created_at,
                p.updated_at  AS product_updated_at
            FROM users u
            LEFT JOIN products p ON p.user_id = u.id
            ORDER BY u.id, p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn products_by_user(&self, user_id: i32) -> StoreResult<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE user_id = $1 ORDER BY id",
            PRODUCT_COLUMNS
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn create_product(&self, product: NewProduct) -> StoreResult<Product> {
        let sql = format!(
            "INSERT INTO products (name, description, price, user_id) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            PRODUCT_COLUMNS
        );
        let created = sqlx::query_as::<_, Product>(&sql)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn list_products_with_users(&self) -> StoreResult<Vec<ProductWithUserRow>> {
        let rows = sqlx::query_as::<_, ProductWithUserRow>(
            r#"
            SELECT
                p.id, p.name, p.description, p.price, p.user_id,
                p.created_at, p.updated_at,
                u.name  AS user_name,
                u.email AS user_email,
                u.phone AS user_phone
            FROM products p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_product_with_user(&self, id: i32) -> StoreResult<ProductWithUserRow> {
        let row = sqlx::query_as::<_, ProductWithUserRow>(
            r#"
            SELECT
                p.id, p.name, p.description, p.price, p.user_id,
                p.created_at, p.updated_at,
                u.name  AS user_name,
                u.email AS user_email,
                u.phone AS user_phone
            FROM products p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_product(&self, changes: ProductChanges) -> StoreResult<Product> {
        let sql = format!(
            "UPDATE products \
             SET name = $2, description = $3, price = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        );
        let updated = sqlx::query_as::<_, Product>(&sql)
            .bind(changes.id)
            .bind(&changes.name)
            .bind(&changes.description)
            .bind(changes.price)
            .fetch_one(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete_product(&self, id: i32) -> StoreResult<()> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
