use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::invitation::InvitationKind;
use std::sync::Arc;
use tracing::info;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::invitation::InvitationRes;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::RTeamInvite;
use crate::utils::validate;

#[post("/{id}/invite")]
pub async fn invite(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    data: web::Json<RTeamInvite>,
    auth: BearerAuth,
) -> ApiResult<InvitationRes> {
    let caller = db.resolve_caller(auth.token()).await?;

    let id = validate::parse_id(&path.into_inner())
        .ok_or_else(|| AppError::BadFormat("Invalid team id".into()))?;
    let team = db.get_team(id).await?;

    if db.member_count(team.id).await? >= team.max_players as u64 {
        return Err(AppError::TeamFull);
    }
    if !team.invitations_open && team.captain != caller.id {
        return Err(AppError::InvitationsClosed);
    }

    let target = db.get_user_by_id(&data.user_id).await?;
    if db.is_in_any_team(target.id).await? {
        return Err(AppError::AlreadyInTeam);
    }

    let invitation = db
        .create_invitation(team.id, caller.id, target.id, InvitationKind::Invitation)
        .await?;
    info!(
        "User {} invited {} to team {}",
        caller.id, target.id, team.id
    );

    Ok(ApiResponse::Created(InvitationRes {
        id: invitation.id,
        message: "Invitation sent.".to_string(),
    }))
}
