use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::team::Model as TeamModel;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};

#[get("")]
pub async fn list_teams(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<Vec<TeamModel>> {
    db.resolve_caller(auth.token()).await?;

    Ok(ApiResponse::Ok(db.list_teams().await?))
}
