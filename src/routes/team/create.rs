use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::team::Model as TeamModel;
use std::sync::Arc;
use tracing::info;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::RTeamCreate;
use crate::utils::validate;

#[post("")]
pub async fn create_team(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    data: web::Json<RTeamCreate>,
    auth: BearerAuth,
) -> ApiResult<TeamModel> {
    let caller = db.resolve_caller(auth.token()).await?;

    // one team per user, whether as captain or player
    if db.find_team_by_captain(caller.id).await?.is_some() {
        return Err(AppError::AlreadyHasTeam);
    }
    if db.is_in_any_team(caller.id).await? {
        return Err(AppError::AlreadyInTeam);
    }

    if !validate::is_valid_team_name(&data.name) {
        return Err(AppError::BadFormat("Invalid team name".into()));
    }
    if db.team_name_taken(&data.name, None).await? {
        return Err(AppError::NameTaken);
    }

    let team = db
        .create_team(caller.id, data.name.clone(), data.invitations_open)
        .await?;
    info!("Team {} created by {}", team.id, caller.id);

    Ok(ApiResponse::Created(team))
}
