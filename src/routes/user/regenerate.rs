use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::TokenRes;
use crate::utils::token::construct_token;

#[post("")]
pub async fn regenerate(
    _req: actix_web::HttpRequest,
    auth: BearerAuth,
    db: web::Data<Arc<PostgresService>>,
) -> ApiResult<TokenRes> {
    let caller = db.resolve_caller(auth.token()).await?;

    let key = db.regenerate_user_token(&caller.id).await?;

    Ok(ApiResponse::Ok(TokenRes {
        token: construct_token(&caller.id, &key),
    }))
}
