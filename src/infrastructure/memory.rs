//! 内存存储实现
//!
//! 行为与 PostgreSQL 实现保持一致：自增 ID、外键检查、
//! 查询不到行时报错、删除不存在的 ID 不报错，价格按 NUMERIC(12,2) 舍入。

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::repository::{Repository, StoreError, StoreResult};
use crate::app::products::model::{NewProduct, Product, ProductChanges, ProductWithUserRow};
use crate::app::users::model::{NewUser, User, UserProductRow};

/// products.price 的小数位数
const PRICE_SCALE: u32 = 2;
/// NUMERIC(12,2) 整数部分最多 10 位
const PRICE_INTEGER_DIGITS: u32 = 10;

/// 按 NUMERIC(12,2) 列的规则存储价格：四舍五入到两位小数，整数位超出时报错
fn numeric_price(price: Decimal) -> StoreResult<Decimal> {
    let mut stored =
        price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    stored.rescale(PRICE_SCALE);
    if stored.abs() >= Decimal::from(10_i64.pow(PRICE_INTEGER_DIGITS)) {
        return Err(StoreError::Constraint(format!(
            "numeric field overflow: price {} exceeds NUMERIC(12,2)",
            price
        )));
    }
    Ok(stored)
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    products: BTreeMap<i32, Product>,
    user_seq: i32,
    product_seq: i32,
}

impl Tables {
    fn joined(&self, product: &Product) -> StoreResult<ProductWithUserRow> {
        let owner = self
            .users
            .get(&product.user_id)
            .ok_or(StoreError::NotFound("user"))?;
        Ok(ProductWithUserRow {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            user_id: product.user_id,
            created_at: product.created_at,
            updated_at: product.updated_at,
            user_name: owner.name.clone(),
            user_email: owner.email.clone(),
            user_phone: owner.phone.clone(),
        })
    }
}

#[derive(Clone, Default)]
pub struct MemoryRepository {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables();
        tables.user_seq += 1;
        let created = User {
            id: tables.user_seq,
            name: user.name,
            phone: user.phone,
            email: user.email,
            created_at: Some(Utc::now()),
        };
        tables.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables().users.values().cloned().collect())
    }

    async fn get_user(&self, id: i32) -> StoreResult<User> {
        self.tables()
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("user"))
    }

    async fn list_users_with_products(&self) -> StoreResult<Vec<UserProductRow>> {
        let tables = self.tables();
        let mut rows = Vec::new();

        for user in tables.users.values() {
            let base = UserProductRow {
                user_id: user.id,
                user_name: user.name.clone(),
                user_phone: user.phone.clone(),
                user_email: user.email.clone(),
                user_created_at: user.created_at,
                product_id: None,
                product_name: None,
                product_description: None,
                product_price: None,
                product_created_at: None,
                product_updated_at: None,
            };

            let owned: Vec<&Product> = tables
                .products
                .values()
                .filter(|p| p.user_id == user.id)
                .collect();

            if owned.is_empty() {
                rows.push(base);
                continue;
            }
            for product in owned {
                rows.push(UserProductRow {
                    product_id: Some(product.id),
                    product_name: Some(product.name.clone()),
                    product_description: product.description.clone(),
                    product_price: Some(product.price),
                    product_created_at: product.created_at,
                    product_updated_at: product.updated_at,
                    ..base.clone()
                });
            }
        }

        Ok(rows)
    }

    async fn products_by_user(&self, user_id: i32) -> StoreResult<Vec<Product>> {
        Ok(self
            .tables()
            .products
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_product(&self, product: NewProduct) -> StoreResult<Product> {
        let price = numeric_price(product.price)?;
        let mut tables = self.tables();
        if !tables.users.contains_key(&product.user_id) {
            return Err(StoreError::Constraint(format!(
                "user {} referenced by products.user_id does not exist",
                product.user_id
            )));
        }

        tables.product_seq += 1;
        let now = Utc::now();
        let created = Product {
            id: tables.product_seq,
            name: product.name,
            description: product.description,
            price,
            user_id: product.user_id,
            created_at: Some(now),
            updated_at: Some(now),
        };
        tables.products.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_products_with_users(&self) -> StoreResult<Vec<ProductWithUserRow>> {
        let tables = self.tables();
        tables
            .products
            .values()
            .map(|p| tables.joined(p))
            .collect()
    }

    async fn get_product_with_user(&self, id: i32) -> StoreResult<ProductWithUserRow> {
        let tables = self.tables();
        let product = tables
            .products
            .get(&id)
            .ok_or(StoreError::NotFound("product"))?;
        tables.joined(product)
    }

    async fn update_product(&self, changes: ProductChanges) -> StoreResult<Product> {
        let price = numeric_price(changes.price)?;
        let mut tables = self.tables();
        let product = tables
            .products
            .get_mut(&changes.id)
            .ok_or(StoreError::NotFound("product"))?;

        product.name = changes.name;
        product.description = changes.description;
        product.price = price;
        product.updated_at = Some(Utc::now());
        Ok(product.clone())
    }

    async fn delete_product(&self, id: i32) -> StoreResult<()> {
        self.tables().products.remove(&id);
        Ok(())
    }
}
