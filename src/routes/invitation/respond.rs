use actix_web::{patch, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::invitation::InvitationKind;
use entity::team::Model as TeamModel;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::validate;

/// The player named by an invitation, or the requester behind a join request.
/// Accepting always adds the non-captain party.
fn joiner(invitation: &entity::invitation::Model) -> uuid::Uuid {
    match invitation.kind {
        InvitationKind::Invitation => invitation.to_user,
        InvitationKind::Request => invitation.from_user,
    }
}

#[patch("/{id}/accept")]
pub async fn accept_invitation(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    auth: BearerAuth,
) -> ApiResult<TeamModel> {
    let caller = db.resolve_caller(auth.token()).await?;

    let code = path.into_inner();
    if !validate::is_valid_invite_code(&code) {
        return Err(AppError::BadFormat("Invalid invitation id".into()));
    }
    let invitation = db.get_invitation(&code).await?;
    if invitation.to_user != caller.id {
        return Err(AppError::Forbidden);
    }

    // join + consume the record in one transaction; capacity is re-checked
    // under the team row lock in there
    let team = db.accept_invitation(&invitation, joiner(&invitation)).await?;
    info!(
        "Invitation {} accepted, user {} joined team {}",
        invitation.id,
        joiner(&invitation),
        team.id
    );

    Ok(ApiResponse::Ok(team))
}

#[derive(Serialize, Deserialize)]
pub struct Response {}

#[patch("/{id}/decline")]
pub async fn decline_invitation(
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
    if invitation.to_user != caller.id {
        return Err(AppError::Forbidden);
    }

    db.delete_invitation(&invitation.id).await?;

    Ok(ApiResponse::NoContent)
}
