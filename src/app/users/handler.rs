//! 用户处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};

use super::model::{CreateUserRequest, NewUser, User, UserWithProducts};
use crate::app::{products::model::Product, AppState};
use crate::core::{
    decode::{json_body, parse_id, IdField},
    error::ApiError,
};

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let req = json_body(payload)?;
    let user = state.users.create_user(NewUser::from(req)).await?;
    Ok(Json(user))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.list_users().await?))
}

pub async fn list_users_with_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserWithProducts>>, ApiError> {
    Ok(Json(state.users.list_users_with_products().await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id, IdField::User)?;
    Ok(Json(state.users.get_user(id).await?))
}

pub async fn get_user_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let user_id = parse_id(&id, IdField::User)?;
    Ok(Json(state.users.products_of(user_id).await?))
}
