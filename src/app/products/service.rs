//! 产品业务服务

use std::sync::Arc;
use tracing::info;

use super::model::{NewProduct, Product, ProductChanges, ProductDetail, ProductWithUserRow};
use crate::core::error::ApiError;
use crate::infrastructure::repository::Repository;

#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn Repository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    pub async fn create_product(&self, product: NewProduct) -> Result<Product, ApiError> {
        let product = self.repo.create_product(product).await?;
        info!(
            "Created product: {} ({}) for user {}",
            product.name, product.id, product.user_id
        );
        Ok(product)
    }

    pub async fn list_products(&self) -> Result<Vec<ProductWithUserRow>, ApiError> {
        Ok(self.repo.list_products_with_users().await?)
    }

    pub async fn get_product(&self, id: i32) -> Result<ProductDetail, ApiError> {
        let row = self.repo.get_product_with_user(id).await?;
        Ok(ProductDetail::from(row))
    }

    pub async fn update_product(&self, changes: ProductChanges) -> Result<Product, ApiError> {
        let product = self.repo.update_product(changes).await?;
        info!("Updated product: {} ({})", product.name, product.id);
        Ok(product)
    }

    pub async fn delete_product(&self, id: i32) -> Result<(), ApiError> {
        self.repo.delete_product(id).await?;
        info!("Deleted product: {}", id);
        Ok(())
    }
}
