use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Username,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Clubs {
    Table,
    Id,
    Name,
    Description,
    OwnerId,
    CreatedAt,
}

/// 会员表: 一个用户在一个俱乐部中的角色/余额/积分记录
#[derive(DeriveIden)]
enum ClubMembers {
    Table,
    Id,
    UserId,
    ClubId,
    Role,
    Balance,
    Points,
    Status,
    CreatedAt,
    UpdatedAt,
}

/// 账本流水表 (append-only)
#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    UserId,
    ClubId,
    TransactionType,
    Amount,
    BalanceBefore,
    BalanceAfter,
    Description,
    ReferenceId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Tournaments {
    Table,
    Id,
    ClubId,
    Name,
    BuyIn,
    Fee,
    Status,
    StartsAt,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TournamentRegistrations {
    Table,
    Id,
    TournamentId,
    UserId,
    ClubId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StoreItems {
    Table,
    Id,
    ClubId,
    Name,
    Description,
    PointsRequired,
    Stock,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Redemptions {
    Table,
    Id,
    UserId,
    ClubId,
    ItemId,
    PointsSpent,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 角色/状态/流水类型等枚举列统一使用 TEXT 存储 (string enum)
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp())
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Clubs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clubs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clubs::Name).string().not_null())
                    .col(ColumnDef::new(Clubs::Description).string().null())
                    .col(ColumnDef::new(Clubs::OwnerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Clubs::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp())
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClubMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClubMembers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClubMembers::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ClubMembers::ClubId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ClubMembers::Role)
                            .string()
                            .not_null()
                            .default("member"),
                    )
                    .col(
                        ColumnDef::new(ClubMembers::Balance)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ClubMembers::Points)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ClubMembers::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(ClubMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp())
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ClubMembers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 一个用户在一个俱乐部只能有一条会员记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_club_members_user_club")
                    .table(ClubMembers::Table)
                    .col(ClubMembers::UserId)
                    .col(ClubMembers::ClubId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_club_members_club")
                    .table(ClubMembers::Table)
                    .col(ClubMembers::ClubId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transactions::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::ClubId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::TransactionType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Transactions::BalanceBefore)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::BalanceAfter)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Description).string().null())
                    .col(
                        ColumnDef::new(Transactions::ReferenceId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp())
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_transactions_reference")
                    .table(Transactions::Table)
                    .col(Transactions::ReferenceId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transactions_user_club")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .col(Transactions::ClubId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tournaments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tournaments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tournaments::ClubId).big_integer().not_null())
                    .col(ColumnDef::new(Tournaments::Name).string().not_null())
                    .col(ColumnDef::new(Tournaments::BuyIn).big_integer().not_null())
                    .col(
                        ColumnDef::new(Tournaments::Fee)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tournaments::Status)
                            .string()
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(
                        ColumnDef::new(Tournaments::StartsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tournaments::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tournaments::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp())
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Tournaments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tournaments_club")
                    .table(Tournaments::Table)
                    .col(Tournaments::ClubId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TournamentRegistrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TournamentRegistrations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TournamentRegistrations::TournamentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TournamentRegistrations::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TournamentRegistrations::ClubId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TournamentRegistrations::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp())
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一赛事同一用户只能报名一次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_tournament_registrations_tournament_user")
                    .table(TournamentRegistrations::Table)
                    .col(TournamentRegistrations::TournamentId)
                    .col(TournamentRegistrations::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StoreItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StoreItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StoreItems::ClubId).big_integer().not_null())
                    .col(ColumnDef::new(StoreItems::Name).string().not_null())
                    .col(ColumnDef::new(StoreItems::Description).string().null())
                    .col(
                        ColumnDef::new(StoreItems::PointsRequired)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StoreItems::Stock)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StoreItems::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(StoreItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp())
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StoreItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_store_items_club")
                    .table(StoreItems::Table)
                    .col(StoreItems::ClubId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Redemptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Redemptions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Redemptions::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Redemptions::ClubId).big_integer().not_null())
                    .col(ColumnDef::new(Redemptions::ItemId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Redemptions::PointsSpent)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Redemptions::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Redemptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp())
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Redemptions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_redemptions_user_club")
                    .table(Redemptions::Table)
                    .col(Redemptions::UserId)
                    .col(Redemptions::ClubId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Redemptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StoreItems::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(TournamentRegistrations::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Tournaments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClubMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clubs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
