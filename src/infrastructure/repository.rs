//! 存储访问接口
//!
//! 每个方法对应一条单语句查询，自动提交。

use async_trait::async_trait;

use crate::app::products::model::{NewProduct, Product, ProductChanges, ProductWithUserRow};
use crate::app::users::model::{NewUser, User, UserProductRow};

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Repository: Send + Sync {
    /// 后端名称，用于日志和健康检查
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> StoreResult<()>;

    /// 关闭底层连接，进程退出前调用
    async fn close(&self) {}

    async fn create_user(&self, user: NewUser) -> StoreResult<User>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn get_user(&self, id: i32) -> StoreResult<User>;

    /// users LEFT JOIN products，按用户 ID、产品 ID 排序
    async fn list_users_with_products(&self) -> StoreResult<Vec<UserProductRow>>;

    async fn products_by_user(&self, user_id: i32) -> StoreResult<Vec<Product>>;

    async fn create_product(&self, product: NewProduct) -> StoreResult<Product>;

    async fn list_products_with_users(&self) -> StoreResult<Vec<ProductWithUserRow>>;

    async fn get_product_with_user(&self, id: i32) -> StoreResult<ProductWithUserRow>;

    async fn update_product(&self, changes: ProductChanges) -> StoreResult<Product>;

    /// 删除不存在的 ID 不报错
    async fn delete_product(&self, id: i32) -> StoreResult<()>;
}
