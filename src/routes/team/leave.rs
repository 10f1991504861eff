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

#[delete("/{id}/leave")]
pub async fn leave_team(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let caller = db.resolve_caller(auth.token()).await?;

    let id = validate::parse_id(&path.into_inner())
        .ok_or_else(|| AppError::BadFormat("Invalid team id".into()))?;
    let team = db.get_team(id).await?;

    // the captain deletes or hands over the team instead
    if team.captain == caller.id {
        return Err(AppError::CannotLeaveOwnTeam);
    }

    match db.remove_member(team.id, caller.id).await {
        Err(AppError::PlayerNotFound) => Err(AppError::NotInTeam),
        Err(e) => Err(e),
        Ok(()) => Ok(ApiResponse::NoContent),
    }
}
