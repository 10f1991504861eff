use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::team::Model as TeamModel;
use std::sync::Arc;
use tracing::info;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::RTeamTransfer;
use crate::utils::validate;

/// Hand the captaincy to another player on the roster. The old captain stays
/// on the team as a regular player and becomes free to leave.
#[post("/{id}/transfer")]
pub async fn transfer_captain(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    data: web::Json<RTeamTransfer>,
    auth: BearerAuth,
) -> ApiResult<TeamModel> {
    let caller = db.resolve_caller(auth.token()).await?;

    let id = validate::parse_id(&path.into_inner())
        .ok_or_else(|| AppError::BadFormat("Invalid team id".into()))?;
    let team = db.get_team(id).await?;
    if team.captain != caller.id {
        return Err(AppError::Forbidden);
    }

    let team = db.transfer_captain(team, data.user_id).await?;
    info!(
        "Team {} captaincy transferred from {} to {}",
        team.id, caller.id, data.user_id
    );

    Ok(ApiResponse::Ok(team))
}
