use actix_web::{delete, get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{format_users, PublicUser};
use crate::utils::validate;

#[get("/{id}/members")]
pub async fn list_members(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    auth: BearerAuth,
) -> ApiResult<Vec<PublicUser>> {
    db.resolve_caller(auth.token()).await?;

    let id = validate::parse_id(&path.into_inner())
        .ok_or_else(|| AppError::BadFormat("Invalid team id".into()))?;
    let team = db.get_team(id).await?;

    let member_ids = db.list_member_ids(team.id).await?;
    let members = db.list_users_by_ids(&member_ids).await?;

    Ok(ApiResponse::Ok(format_users(members)))
}

#[derive(Serialize, Deserialize)]
pub struct Response {}

#[delete("/{id}/members/{member_id}")]
pub async fn remove_member(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<(String, String)>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let caller = db.resolve_caller(auth.token()).await?;

    let (team_id, member_id) = path.into_inner();
    let team_id = validate::parse_id(&team_id)
        .ok_or_else(|| AppError::BadFormat("Invalid team id".into()))?;
    let member_id = validate::parse_id(&member_id)
        .ok_or_else(|| AppError::BadFormat("Invalid member id".into()))?;

    let team = db.get_team(team_id).await?;
    if team.captain != caller.id {
        return Err(AppError::Forbidden);
    }
    // compare against this team's captain, nothing else
    if member_id == team.captain {
        return Err(AppError::CannotRemoveCaptain);
    }

    db.remove_member(team.id, member_id).await?;

    Ok(ApiResponse::NoContent)
}
