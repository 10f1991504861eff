use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Team {
    Table,
    Id,
    Name,
    Captain,
    InvitationsOpen,
    MaxPlayers,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeamMember {
    Table,
    UserId,
    TeamId,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Team::Table)
                .col(ColumnDef::new(Team::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Team::Name).string().not_null())
                .col(ColumnDef::new(Team::Captain).uuid().not_null())
                .col(
                    ColumnDef::new(Team::InvitationsOpen)
                        .boolean()
                        .not_null()
                        .default(true),
                )
                .col(
                    ColumnDef::new(Team::MaxPlayers)
                        .integer()
                        .not_null()
                        .default(5),
                )
                .col(
                    ColumnDef::new(Team::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(Team::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .to_owned(),
        )
        .await?;

        // Global name uniqueness: the losing concurrent create hits this index.
        m.create_index(
            Index::create()
                .name("idx_team_name_unique")
                .table(Team::Table)
                .col(Team::Name)
                .unique()
                .to_owned(),
        )
        .await?;

        m.alter_table(
            Table::alter()
                .table(Team::Table)
                .add_foreign_key(
                    TableForeignKey::new()
                        .name("fk_team_captain")
                        .from_tbl(Team::Table)
                        .from_col(Team::Captain)
                        .to_tbl(User::Table)
                        .to_col(User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

        // Membership index keyed by user alone: one team per user, everywhere.
        m.create_table(
            Table::create()
                .table(TeamMember::Table)
                .col(ColumnDef::new(TeamMember::UserId).uuid().not_null())
                .col(ColumnDef::new(TeamMember::TeamId).uuid().not_null())
                .col(
                    ColumnDef::new(TeamMember::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .primary_key(
                    Index::create()
                        .name("pk_team_member")
                        .col(TeamMember::UserId),
                )
                .to_owned(),
        )
        .await?;

        m.alter_table(
            Table::alter()
                .table(TeamMember::Table)
                .add_foreign_key(
                    TableForeignKey::new()
                        .name("fk_team_member_user")
                        .from_tbl(TeamMember::Table)
                        .from_col(TeamMember::UserId)
                        .to_tbl(User::Table)
                        .to_col(User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .add_foreign_key(
                    TableForeignKey::new()
                        .name("fk_team_member_team")
                        .from_tbl(TeamMember::Table)
                        .from_col(TeamMember::TeamId)
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
                .name("idx_team_member_team")
                .table(TeamMember::Table)
                .col(TeamMember::TeamId)
                .to_owned(),
        )
        .await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(TeamMember::Table).to_owned())
            .await?;
        m.drop_table(Table::drop().table(Team::Table).to_owned()).await
    }
}
