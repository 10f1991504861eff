use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::invitation::{InvitationKind, Model as InvitationModel};
use entity::team::Model as TeamModel;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};

#[get("/@me")]
pub async fn my_team(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<TeamModel> {
    let caller = db.resolve_caller(auth.token()).await?;

    let team = db
        .find_team_for_player(caller.id)
        .await?
        .ok_or(AppError::TeamNotFound)?;

    Ok(ApiResponse::Ok(team))
}

#[get("/@me/invitations")]
pub async fn my_invitations(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<Vec<InvitationModel>> {
    let caller = db.resolve_caller(auth.token()).await?;

    let invitations = db
        .list_invitations_for_user(caller.id, InvitationKind::Invitation)
        .await?;

    Ok(ApiResponse::Ok(invitations))
}

#[get("/@me/requests")]
pub async fn my_requests(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<Vec<InvitationModel>> {
    let caller = db.resolve_caller(auth.token()).await?;

    let requests = db
        .list_invitations_for_user(caller.id, InvitationKind::Request)
        .await?;

    Ok(ApiResponse::Ok(requests))
}
