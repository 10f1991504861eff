use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::team::Model as TeamModel;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::validate;

#[get("/{id}")]
pub async fn get_team(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    auth: BearerAuth,
) -> ApiResult<TeamModel> {
    db.resolve_caller(auth.token()).await?;

    let id = validate::parse_id(&path.into_inner())
        .ok_or_else(|| AppError::BadFormat("Invalid team id".into()))?;

    Ok(ApiResponse::Ok(db.get_team(id).await?))
}
