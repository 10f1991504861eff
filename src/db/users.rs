use crate::db::postgres_service::PostgresService;
use crate::types::token::TokenType;
use crate::types::{error::AppError, user::DBUserCreate};
use crate::utils::token::{encrypt, extract_token_parts, new_id, new_token, verify};
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Entity as User, Model as UserModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, SqlErr};
use uuid::Uuid;

impl PostgresService {
    pub async fn user_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        User::find_by_id(*id)
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<UserModel, AppError> {
        User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn list_users_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserModel>, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.database_connection)
            .await?)
    }

    /// Identity Resolver: opaque bearer token in, verified user out.
    /// Fails closed: any decode/lookup/hash mismatch is Unauthorized, and an
    /// existing-but-unverified account is rejected before anything else runs.
    pub async fn resolve_caller(&self, token: &str) -> Result<UserModel, AppError> {
        let (uid, key) = extract_token_parts(token).ok_or(AppError::Unauthorized)?;
        let user = match self.get_user_by_id(&uid).await {
            Ok(u) => u,
            Err(AppError::UserNotFound) => return Err(AppError::Unauthorized),
            Err(e) => return Err(e),
        };
        match verify(&key, &user.auth_hash) {
            Ok(true) => {}
            _ => return Err(AppError::Unauthorized),
        }
        if !user.verified {
            return Err(AppError::NotVerified);
        }
        Ok(user)
    }

    pub async fn create_user(&self, payload: DBUserCreate) -> Result<Uuid, AppError> {
        if self.user_exists_by_email(&payload.email).await? {
            return Err(AppError::EmailTaken);
        }
        let uid = new_id();
        let now = Utc::now();
        match User::insert(UserActive {
            id: Set(uid),
            name: Set(payload.name),
            email: Set(payload.email),
            auth_hash: Set(payload.auth_hash),
            role: Set(payload.role),
            verified: Set(payload.verified),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(&self.database_connection)
        .await
        {
            Ok(_) => Ok(uid),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::EmailTaken),
                _ => Err(err.into()),
            },
        }
    }

    /// Rotate the caller's API key; the old token stops working immediately.
    pub async fn regenerate_user_token(&self, user_id: &Uuid) -> Result<String, AppError> {
        let user = self.get_user_by_id(user_id).await?;
        let token = new_token(TokenType::User);
        let encrypted =
            encrypt(&token).map_err(|e| AppError::Internal(format!("hashing failed: {e}")))?;
        let mut am: UserActive = user.into();
        am.auth_hash = Set(encrypted);
        am.updated_at = Set(Utc::now());
        am.update(&self.database_connection).await?;
        Ok(token)
    }
}
