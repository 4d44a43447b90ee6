//! User routes: listing and creation from form input.

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::AppError;

/// Form body for creating a user.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateUserForm {
    pub name: String,
}

/// User representation returned by the API.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl UserResponse {
    fn from_model(user: &moviweb_db::models::User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            created_at: user.created_at.clone(),
        }
    }
}

/// GET /users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "List all users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let conn = moviweb_db::pool::get_conn(&ctx.db)?;
    let users = moviweb_db::queries::users::list_users(&conn)?;
    let responses: Vec<UserResponse> = users.iter().map(UserResponse::from_model).collect();
    Ok(Json(responses))
}

/// POST /users
#[utoipa::path(
    post,
    path = "/users",
    request_body(content = CreateUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Empty name")
    )
)]
pub async fn create_user(
    State(ctx): State<AppContext>,
    Form(payload): Form<CreateUserForm>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(moviweb_core::Error::validation("name is required").into());
    }

    let conn = moviweb_db::pool::get_conn(&ctx.db)?;
    let user = moviweb_db::queries::users::create_user(&conn, name)?;

    tracing::info!(user_id = %user.id, name, "Created user");

    Ok((StatusCode::CREATED, Json(UserResponse::from_model(&user))))
}
