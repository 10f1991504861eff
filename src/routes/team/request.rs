use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::invitation::InvitationKind;
use std::sync::Arc;
use tracing::info;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::invitation::InvitationRes;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::validate;

// The request lands in the captain's inbox; accepting it pulls the requester
// onto the roster.
#[post("/{id}/request")]
pub async fn request_join(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    auth: BearerAuth,
) -> ApiResult<InvitationRes> {
    let caller = db.resolve_caller(auth.token()).await?;

    if db.is_in_any_team(caller.id).await? {
        return Err(AppError::AlreadyInTeam);
    }

    let id = validate::parse_id(&path.into_inner())
        .ok_or_else(|| AppError::BadFormat("Invalid team id".into()))?;
    let team = db.get_team(id).await?;

    if db.member_count(team.id).await? >= team.max_players as u64 {
        return Err(AppError::TeamFull);
    }

    let request = db
        .create_invitation(team.id, caller.id, team.captain, InvitationKind::Request)
        .await?;
    info!("User {} requested to join team {}", caller.id, team.id);

    Ok(ApiResponse::Created(InvitationRes {
        id: request.id,
        message: "Join request sent.".to_string(),
    }))
}
