use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Team {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Invitation {
    Table,
    Id,
    TeamId,
    FromUser,
    ToUser,
    Kind,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Invitation::Table)
                .col(
                    ColumnDef::new(Invitation::Id)
                        .string()
                        .not_null()
                        .primary_key(),
                )
                .col(ColumnDef::new(Invitation::TeamId).uuid().not_null())
                .col(ColumnDef::new(Invitation::FromUser).uuid().not_null())
                .col(ColumnDef::new(Invitation::ToUser).uuid().not_null())
                .col(
                    ColumnDef::new(Invitation::Kind)
                        .string_len(16)
                        .not_null(),
                )
                .col(
                    ColumnDef::new(Invitation::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .to_owned(),
        )
        .await?;

        m.alter_table(
            Table::alter()
                .table(Invitation::Table)
                .add_foreign_key(
                    TableForeignKey::new()
                        .name("fk_invitation_team")
                        .from_tbl(Invitation::Table)
                        .from_col(Invitation::TeamId)
                        .to_tbl(Team::Table)
                        .to_col(Team::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

        m.create_index(
            Index::create()
                .name("idx_invitation_to_user")
                .table(Invitation::Table)
                .col(Invitation::ToUser)
                .to_owned(),
        )
        .await?;

        // Dedup lives in the store, not in a pre-check. Invitations are keyed
        // by the invitee; requests by the requester (every request addresses
        // the captain, so to_user would collapse them to one per team).
        m.get_connection()
            .execute_unprepared(
                r#"
            CREATE UNIQUE INDEX idx_invitation_pending_invite
                ON invitation (to_user, team_id) WHERE kind = 'invitation'
            "#,
            )
            .await?;
        m.get_connection()
            .execute_unprepared(
                r#"
            CREATE UNIQUE INDEX idx_invitation_pending_request
                ON invitation (from_user, team_id) WHERE kind = 'request'
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Invitation::Table).to_owned())
            .await
    }
}
