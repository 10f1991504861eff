use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::utils::token::new_id;
use chrono::Utc;
use entity::team::{ActiveModel as TeamActive, Entity as Team, Model as TeamModel};
use entity::team_member::{ActiveModel as MemberActive, Entity as TeamMember};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

/// Capacity-checked membership insert. Takes a row lock on the team so two
/// concurrent joins re-count against each other instead of both passing the
/// capacity check. The user_id primary key turns a double-join into a unique
/// violation.
pub(crate) async fn join_team_locked<C: ConnectionTrait>(
    conn: &C,
    team_id: Uuid,
    user_id: Uuid,
) -> Result<TeamModel, AppError> {
    let team = Team::find_by_id(team_id)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or(AppError::TeamNotFound)?;

    let count = TeamMember::find()
        .filter(entity::team_member::Column::TeamId.eq(team_id))
        .count(conn)
        .await?;
    if count >= team.max_players as u64 {
        return Err(AppError::TeamFull);
    }

    match TeamMember::insert(MemberActive {
        user_id: Set(user_id),
        team_id: Set(team_id),
        created_at: Set(Utc::now()),
    })
    .exec(conn)
    .await
    {
        Ok(_) => Ok(team),
        Err(err) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::AlreadyInTeam),
            _ => Err(err.into()),
        },
    }
}

impl PostgresService {
    pub async fn team_name_taken(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let mut finder = Team::find().filter(entity::team::Column::Name.eq(name));
        if let Some(id) = exclude {
            finder = finder.filter(entity::team::Column::Id.ne(id));
        }
        Ok(finder.count(&self.database_connection).await? > 0)
    }

    /// Create a team with the captain as its first player, atomically. The
    /// unique name index and the membership primary key decide concurrent
    /// races; pre-checks in the route layer only shape friendlier errors.
    pub async fn create_team(
        &self,
        captain: Uuid,
        name: String,
        invitations_open: bool,
    ) -> Result<TeamModel, AppError> {
        let tid = new_id();
        let now = Utc::now();
        let txn = self.database_connection.begin().await?;

        let team = TeamActive {
            id: Set(tid),
            name: Set(name),
            captain: Set(captain),
            invitations_open: Set(invitations_open),
            max_players: Set(entity::team::DEFAULT_MAX_PLAYERS),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let team = match team.insert(&txn).await {
            Ok(t) => t,
            Err(err) => {
                txn.rollback().await?;
                return match err.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::NameTaken),
                    _ => Err(err.into()),
                };
            }
        };

        let member = TeamMember::insert(MemberActive {
            user_id: Set(captain),
            team_id: Set(tid),
            created_at: Set(now),
        });
        if let Err(err) = member.exec(&txn).await {
            txn.rollback().await?;
            return match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::AlreadyInTeam),
                _ => Err(err.into()),
            };
        }

        txn.commit().await?;
        Ok(team)
    }

    pub async fn get_team(&self, id: Uuid) -> Result<TeamModel, AppError> {
        Team::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::TeamNotFound)
    }

    pub async fn list_teams(&self) -> Result<Vec<TeamModel>, AppError> {
        Ok(Team::find().all(&self.database_connection).await?)
    }

    pub async fn find_team_by_captain(&self, user_id: Uuid) -> Result<Option<TeamModel>, AppError> {
        Ok(Team::find()
            .filter(entity::team::Column::Captain.eq(user_id))
            .one(&self.database_connection)
            .await?)
    }

    /// Team the user currently plays in, via the membership index.
    pub async fn find_team_for_player(&self, user_id: Uuid) -> Result<Option<TeamModel>, AppError> {
        let membership = TeamMember::find_by_id(user_id)
            .one(&self.database_connection)
            .await?;
        match membership {
            Some(m) => Ok(Some(self.get_team(m.team_id).await?)),
            None => Ok(None),
        }
    }

    pub async fn is_in_any_team(&self, user_id: Uuid) -> Result<bool, AppError> {
        Ok(TeamMember::find_by_id(user_id)
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn is_member_of(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        Ok(TeamMember::find_by_id(user_id)
            .filter(entity::team_member::Column::TeamId.eq(team_id))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn member_count(&self, team_id: Uuid) -> Result<u64, AppError> {
        Ok(TeamMember::find()
            .filter(entity::team_member::Column::TeamId.eq(team_id))
            .count(&self.database_connection)
            .await?)
    }

    pub async fn list_member_ids(&self, team_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        Ok(TeamMember::find()
            .filter(entity::team_member::Column::TeamId.eq(team_id))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|m| m.user_id)
            .collect())
    }

    /// Partial update; name uniqueness is re-checked against everyone else.
    pub async fn update_team(
        &self,
        team: TeamModel,
        name: Option<String>,
        invitations_open: Option<bool>,
    ) -> Result<TeamModel, AppError> {
        let team_id = team.id;
        let mut am: TeamActive = team.into();
        if let Some(name) = name {
            if self.team_name_taken(&name, Some(team_id)).await? {
                return Err(AppError::NameTaken);
            }
            am.name = Set(name);
        }
        if let Some(open) = invitations_open {
            am.invitations_open = Set(open);
        }
        am.updated_at = Set(Utc::now());
        match am.update(&self.database_connection).await {
            Ok(t) => Ok(t),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::NameTaken),
                _ => Err(err.into()),
            },
        }
    }

    /// Memberships and pending invitations go with the team (FK cascade).
    pub async fn delete_team(&self, id: Uuid) -> Result<(), AppError> {
        let res = Team::delete_by_id(id)
            .exec(&self.database_connection)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::TeamNotFound);
        }
        Ok(())
    }

    pub async fn add_member(&self, team_id: Uuid, user_id: Uuid) -> Result<TeamModel, AppError> {
        let txn = self.database_connection.begin().await?;
        let team = match join_team_locked(&txn, team_id, user_id).await {
            Ok(t) => t,
            Err(e) => {
                txn.rollback().await?;
                return Err(e);
            }
        };
        txn.commit().await?;
        Ok(team)
    }

    pub async fn remove_member(&self, team_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let res = TeamMember::delete_many()
            .filter(entity::team_member::Column::UserId.eq(user_id))
            .filter(entity::team_member::Column::TeamId.eq(team_id))
            .exec(&self.database_connection)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::PlayerNotFound);
        }
        Ok(())
    }

    /// Reassign the captaincy to a current player.
    pub async fn transfer_captain(
        &self,
        team: TeamModel,
        new_captain: Uuid,
    ) -> Result<TeamModel, AppError> {
        let txn = self.database_connection.begin().await?;
        let member = TeamMember::find_by_id(new_captain)
            .filter(entity::team_member::Column::TeamId.eq(team.id))
            .count(&txn)
            .await?;
        if member == 0 {
            txn.rollback().await?;
            return Err(AppError::PlayerNotFound);
        }
        let mut am: TeamActive = team.into();
        am.captain = Set(new_captain);
        am.updated_at = Set(Utc::now());
        let team = am.update(&txn).await?;
        txn.commit().await?;
        Ok(team)
    }
}
