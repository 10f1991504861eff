use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::TokenType;
use crate::types::user::{DBUserCreate, RUserCreate, UserCreateRes};
use crate::utils::token::{construct_token, encrypt, new_token};

// Admin-key gated provisioning. The bearer token is returned exactly once;
// only its hash is stored.
#[post("")]
pub async fn create(
    _req: actix_web::HttpRequest,
    _auth: BearerAuth,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RUserCreate>,
) -> ApiResult<UserCreateRes> {
    let token = new_token(TokenType::User);
    let encrypted =
        encrypt(&token).map_err(|e| AppError::Internal(format!("hashing failed: {e}")))?;

    let user_id = db
        .create_user(DBUserCreate {
            name: body.name.clone(),
            email: body.email.clone(),
            auth_hash: encrypted,
            role: entity::user::roles::PLAYER,
            verified: true,
        })
        .await?;

    let access_token = construct_token(&user_id, &token);

    Ok(ApiResponse::Created(UserCreateRes {
        id: user_id.to_string(),
        token: access_token,
    }))
}
