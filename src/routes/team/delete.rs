use actix_web::{delete, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::validate;

#[derive(Serialize, Deserialize)]
pub struct Response {}

// Deleting the team is the captain's exit; tournament locks are the
// scheduler's concern, not checked here.
#[delete("/{id}")]
pub async fn delete_team(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let caller = db.resolve_caller(auth.token()).await?;

    let id = validate::parse_id(&path.into_inner())
        .ok_or_else(|| AppError::BadFormat("Invalid team id".into()))?;
    let team = db.get_team(id).await?;
    if team.captain != caller.id {
        return Err(AppError::Forbidden);
    }

    db.delete_team(team.id).await?;
    info!("Team {} deleted by captain {}", team.id, caller.id);

    Ok(ApiResponse::NoContent)
}
