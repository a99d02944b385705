use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Summary,
    Author,
    Content,
    Image,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    PostId,
    AuthorId,
    Content,
    ParentId,
    Likes,
    IsEdited,
    EditedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    UserId,
    Kind,
    Message,
    Link,
    IsRead,
    CreatedAt,
    UpdatedAt,
}

fn timestamps(table: &mut TableCreateStatement, created: impl IntoIden, updated: impl IntoIden) {
    table
        .col(
            ColumnDef::new(created)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(updated)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        );
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut users = Table::create();
        users
            .table(Users::Table)
            .if_not_exists()
            .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Users::Name).string().not_null())
            .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
            .col(ColumnDef::new(Users::PasswordHash).string().not_null());
        timestamps(&mut users, Users::CreatedAt, Users::UpdatedAt);
        manager.create_table(users).await?;

        // `author` holds the creator's id as text, without a foreign key.
        let mut posts = Table::create();
        posts
            .table(Posts::Table)
            .if_not_exists()
            .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Posts::Title).string().not_null())
            .col(ColumnDef::new(Posts::Summary).text().not_null().default(""))
            .col(ColumnDef::new(Posts::Author).string().not_null())
            .col(ColumnDef::new(Posts::Content).text().not_null())
            .col(ColumnDef::new(Posts::Image).string().null());
        timestamps(&mut posts, Posts::CreatedAt, Posts::UpdatedAt);
        manager.create_table(posts).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_created_at")
                    .table(Posts::Table)
                    .col(Posts::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        let mut comments = Table::create();
        comments
            .table(Comments::Table)
            .if_not_exists()
            .col(ColumnDef::new(Comments::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Comments::PostId).uuid().not_null())
            .col(ColumnDef::new(Comments::AuthorId).uuid().not_null())
            .col(ColumnDef::new(Comments::Content).text().not_null())
            .col(ColumnDef::new(Comments::ParentId).uuid().null())
            .col(
                ColumnDef::new(Comments::Likes)
                    .array(ColumnType::Uuid)
                    .not_null()
                    .default(Expr::cust("'{}'")),
            )
            .col(
                ColumnDef::new(Comments::IsEdited)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(
                ColumnDef::new(Comments::EditedAt)
                    .timestamp_with_time_zone()
                    .null(),
            );
        timestamps(&mut comments, Comments::CreatedAt, Comments::UpdatedAt);
        manager.create_table(comments).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_post_id")
                    .table(Comments::Table)
                    .col(Comments::PostId)
                    .col(Comments::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_comments_parent_id")
                    .table(Comments::Table)
                    .col(Comments::ParentId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        let mut notifications = Table::create();
        notifications
            .table(Notifications::Table)
            .if_not_exists()
            .col(ColumnDef::new(Notifications::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Notifications::UserId).uuid().not_null())
            .col(ColumnDef::new(Notifications::Kind).text().not_null())
            .col(ColumnDef::new(Notifications::Message).string().not_null())
            .col(ColumnDef::new(Notifications::Link).string().not_null())
            .col(
                ColumnDef::new(Notifications::IsRead)
                    .boolean()
                    .not_null()
                    .default(false),
            );
        timestamps(&mut notifications, Notifications::CreatedAt, Notifications::UpdatedAt);
        manager.create_table(notifications).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user_unread")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .col(Notifications::IsRead)
                    .col(Notifications::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Comments::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await
    }
}
