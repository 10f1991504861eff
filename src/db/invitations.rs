use crate::db::postgres_service::PostgresService;
use crate::db::teams::join_team_locked;
use crate::types::error::AppError;
use crate::utils::token::new_invite_code;
use chrono::Utc;
use entity::invitation::{
    ActiveModel as InvitationActive, Entity as Invitation, InvitationKind,
    Model as InvitationModel,
};
use entity::team::Model as TeamModel;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

impl PostgresService {
    /// One pending record per (invitee, team) for invitations and per
    /// (requester, team) for requests. The partial unique indexes are the
    /// authority; the explicit existence query just produces the friendly
    /// error in the common case.
    pub async fn create_invitation(
        &self,
        team_id: Uuid,
        from_user: Uuid,
        to_user: Uuid,
        kind: InvitationKind,
    ) -> Result<InvitationModel, AppError> {
        let dup_err = match kind {
            InvitationKind::Invitation => AppError::AlreadyInvited,
            InvitationKind::Request => AppError::AlreadyRequested,
        };
        if self.has_pending(team_id, from_user, to_user, kind).await? {
            return Err(dup_err);
        }

        let record = InvitationActive {
            id: Set(new_invite_code()),
            team_id: Set(team_id),
            from_user: Set(from_user),
            to_user: Set(to_user),
            kind: Set(kind),
            created_at: Set(Utc::now()),
        };
        match Invitation::insert(record)
            .exec_with_returning(&self.database_connection)
            .await
        {
            Ok(inv) => Ok(inv),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(dup_err),
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => Err(AppError::TeamNotFound),
                _ => Err(err.into()),
            },
        }
    }

    /// Explicit existence query, never a fetch-list-and-check.
    pub async fn has_pending(
        &self,
        team_id: Uuid,
        from_user: Uuid,
        to_user: Uuid,
        kind: InvitationKind,
    ) -> Result<bool, AppError> {
        let finder = Invitation::find()
            .filter(entity::invitation::Column::TeamId.eq(team_id))
            .filter(entity::invitation::Column::Kind.eq(kind));
        let finder = match kind {
            InvitationKind::Invitation => {
                finder.filter(entity::invitation::Column::ToUser.eq(to_user))
            }
            InvitationKind::Request => {
                finder.filter(entity::invitation::Column::FromUser.eq(from_user))
            }
        };
        Ok(finder.count(&self.database_connection).await? > 0)
    }

    pub async fn get_invitation(&self, id: &str) -> Result<InvitationModel, AppError> {
        Invitation::find_by_id(id.to_string())
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::InvitationNotFound)
    }

    pub async fn list_invitations_for_user(
        &self,
        user_id: Uuid,
        kind: InvitationKind,
    ) -> Result<Vec<InvitationModel>, AppError> {
        Ok(Invitation::find()
            .filter(entity::invitation::Column::ToUser.eq(user_id))
            .filter(entity::invitation::Column::Kind.eq(kind))
            .all(&self.database_connection)
            .await?)
    }

    /// Accept = join + consume the record, one transaction. The team row lock
    /// in join_team_locked makes the capacity re-check race-safe; losing the
    /// last slot surfaces as TeamFull, and a concurrent double-respond loses
    /// at the delete (the record is already gone).
    pub async fn accept_invitation(
        &self,
        invitation: &InvitationModel,
        joiner: Uuid,
    ) -> Result<TeamModel, AppError> {
        let txn = self.database_connection.begin().await?;

        let team = match join_team_locked(&txn, invitation.team_id, joiner).await {
            Ok(t) => t,
            Err(e) => {
                txn.rollback().await?;
                return Err(e);
            }
        };

        let res = Invitation::delete_by_id(invitation.id.clone())
            .exec(&txn)
            .await?;
        if res.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::InvitationNotFound);
        }

        txn.commit().await?;
        Ok(team)
    }

    pub async fn delete_invitation(&self, id: &str) -> Result<(), AppError> {
        let res = Invitation::delete_by_id(id.to_string())
            .exec(&self.database_connection)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::InvitationNotFound);
        }
        Ok(())
    }
}
