//! 产品处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};

use super::model::{
    CreateProductRequest, NewProduct, Product, ProductChanges, ProductDetail, ProductWithUserRow,
    UpdateProductRequest,
};
use crate::app::AppState;
use crate::core::{
    decode::{json_body, parse_id, IdField},
    error::ApiError,
    response::MessageResponse,
};

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let product = NewProduct::try_from(json_body(payload)?)?;
    Ok(Json(state.products.create_product(product).await?))
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductWithUserRow>>, ApiError> {
    Ok(Json(state.products.list_products().await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetail>, ApiError> {
    let id = parse_id(&id, IdField::Product)?;
    Ok(Json(state.products.get_product(id).await?))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id, IdField::Product)?;
    let changes = ProductChanges::from_request(id, json_body(payload)?)?;
    Ok(Json(state.products.update_product(changes).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, IdField::Product)?;
    state.products.delete_product(id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
