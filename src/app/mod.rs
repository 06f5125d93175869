//! 应用层：用户、产品两个模块及路由

pub mod products;
pub mod projection;
pub mod users;

use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::core::{error::ApiError, response::HealthResponse};
use crate::infrastructure::repository::Repository;
use products::{handler as product_handler, service::ProductService};
use users::{handler as user_handler, service::UserService};

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub products: ProductService,
    repo: Arc<dyn Repository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self {
            users: UserService::new(repo.clone()),
            products: ProductService::new(repo.clone()),
            repo,
        }
    }
}

/// 健康检查，存储不可达时返回 500
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    state.repo.ping().await?;
    Ok(Json(HealthResponse::healthy(state.repo.backend())))
}

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        // 用户
        .route(
            "/users",
            post(user_handler::create_user).get(user_handler::list_users),
        )
        .route(
            "/users/with-products",
            get(user_handler::list_users_with_products),
        )
        .route("/users/:id", get(user_handler::get_user))
        .route("/users/:id/products", get(user_handler::get_user_products))
        // 产品
        .route(
            "/products",
            post(product_handler::create_product).get(product_handler::list_products),
        )
        .route(
            "/products/:id",
            get(product_handler::get_product)
                .put(product_handler::update_product)
                .delete(product_handler::delete_product),
        )
}
