use actix_web::{delete, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::validate;

#[derive(Serialize, Deserialize)]
pub struct Response {}

/// Either end of a pending invitation may withdraw it: the sender to cancel,
/// the recipient to clear it without the decline semantics.
#[delete("/{id}")]
pub async fn delete_invitation(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let caller = db.resolve_caller(auth.token()).await?;

    let code = path.into_inner();
    if !validate::is_valid_invite_code(&code) {
        return Err(AppError::BadFormat("Invalid invitation id".into()));
    }
    let invitation = db.get_invitation(&code).await?;
    if invitation.from_user != caller.id && invitation.to_user != caller.id {
        return Err(AppError::Forbidden);
    }

    db.delete_invitation(&invitation.id).await?;

    Ok(ApiResponse::NoContent)
}
