//! 用户业务服务

use std::sync::Arc;
use tracing::info;

use super::model::{NewUser, User, UserWithProducts};
use crate::app::products::model::Product;
use crate::app::projection::group_users_with_products;
use crate::core::error::ApiError;
use crate::infrastructure::repository::Repository;

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn Repository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    pub async fn create_user(&self, user: NewUser) -> Result<User, ApiError> {
        let user = self.repo.create_user(user).await?;
        info!("Created user: {} ({})", user.name, user.id);
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.repo.list_users().await?)
    }

    pub async fn list_users_with_products(&self) -> Result<Vec<UserWithProducts>, ApiError> {
        let rows = self.repo.list_users_with_products().await?;
        Ok(group_users_with_products(rows))
    }

    pub async fn get_user(&self, id: i32) -> Result<User, ApiError> {
        Ok(self.repo.get_user(id).await?)
    }

    pub async fn products_of(&self, user_id: i32) -> Result<Vec<Product>, ApiError> {
        Ok(self.repo.products_by_user(user_id).await?)
    }
}
