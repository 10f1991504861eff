use actix_web::{put, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::team::Model as TeamModel;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::RTeamUpdate;
use crate::utils::validate;

#[put("/{id}")]
pub async fn update_team(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    data: web::Json<RTeamUpdate>,
    auth: BearerAuth,
) -> ApiResult<TeamModel> {
    let caller = db.resolve_caller(auth.token()).await?;

    let id = validate::parse_id(&path.into_inner())
        .ok_or_else(|| AppError::BadFormat("Invalid team id".into()))?;
    let team = db.get_team(id).await?;
    if team.captain != caller.id {
        return Err(AppError::Forbidden);
    }

    if let Some(name) = &data.name {
        if !validate::is_valid_team_name(name) {
            return Err(AppError::BadFormat("Invalid team name".into()));
        }
    }

    let team = db
        .update_team(team, data.name.clone(), data.invitations_open)
        .await?;

    Ok(ApiResponse::Ok(team))
}
