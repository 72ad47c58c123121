use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::Title).string().not_null())
                    .col(ColumnDef::new(Posts::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Posts::Excerpt).text().not_null())
                    .col(ColumnDef::new(Posts::Content).text().not_null())
                    .col(ColumnDef::new(Posts::Image).string().null())
                    .col(ColumnDef::new(Posts::Category).string().not_null())
                    .col(
                        ColumnDef::new(Posts::Tags)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(Posts::Author).string().not_null())
                    .col(
                        ColumnDef::new(Posts::PublishedDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Comments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Comments::PostId).uuid().not_null())
                    .col(ColumnDef::new(Comments::ParentId).uuid().null())
                    .col(ColumnDef::new(Comments::Name).string().not_null())
                    .col(ColumnDef::new(Comments::Content).text().not_null())
                    .col(
                        ColumnDef::new(Comments::Date)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Comments::Likes).integer().not_null().default(0))
                    .col(ColumnDef::new(Comments::Dislikes).integer().not_null().default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_post")
                            .from(Comments::Table, Comments::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_post_id")
                    .table(Comments::Table)
                    .col(Comments::PostId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reactions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reactions::PostId).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reactions::LikeCount).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Reactions::LoveCount).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Reactions::ClapCount).big_integer().not_null().default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reactions_post")
                            .from(Reactions::Table, Reactions::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Podcasts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Podcasts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Podcasts::Title).string().not_null())
                    .col(ColumnDef::new(Podcasts::Description).text().not_null())
                    .col(ColumnDef::new(Podcasts::AudioUrl).string().not_null())
                    .col(
                        ColumnDef::new(Podcasts::EpisodeNumber)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Podcasts::Duration).string().not_null())
                    .col(
                        ColumnDef::new(Podcasts::Guests)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Podcasts::Timestamps)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(Podcasts::Image).string().null())
                    .col(
                        ColumnDef::new(Podcasts::PublishedDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PodcastComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PodcastComments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PodcastComments::EpisodeId).uuid().not_null())
                    .col(ColumnDef::new(PodcastComments::Name).string().not_null())
                    .col(ColumnDef::new(PodcastComments::Content).text().not_null())
                    .col(
                        ColumnDef::new(PodcastComments::Date)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_podcast_comments_episode")
                            .from(PodcastComments::Table, PodcastComments::EpisodeId)
                            .to(Podcasts::Table, Podcasts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_podcast_comments_episode_id")
                    .table(PodcastComments::Table)
                    .col(PodcastComments::EpisodeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Polls::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Polls::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Polls::Question).string().not_null())
                    .col(ColumnDef::new(Polls::Options).json_binary().not_null())
                    .col(ColumnDef::new(Polls::EndDate).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Polls::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Messages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Messages::Name).string().not_null())
                    .col(ColumnDef::new(Messages::Email).string().not_null())
                    .col(ColumnDef::new(Messages::Subject).string().null())
                    .col(ColumnDef::new(Messages::Content).text().not_null())
                    .col(
                        ColumnDef::new(Messages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Messages::Read).boolean().not_null().default(false))
                    .col(ColumnDef::new(Messages::Reply).text().null())
                    .col(ColumnDef::new(Messages::RepliedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            Messages::Table.into_iden(),
            Polls::Table.into_iden(),
            PodcastComments::Table.into_iden(),
            Podcasts::Table.into_iden(),
            Reactions::Table.into_iden(),
            Comments::Table.into_iden(),
            Posts::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Slug,
    Excerpt,
    Content,
    Image,
    Category,
    Tags,
    Author,
    PublishedDate,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    PostId,
    ParentId,
    Name,
    Content,
    Date,
    Likes,
    Dislikes,
}

#[derive(DeriveIden)]
enum Reactions {
    Table,
    PostId,
    LikeCount,
    LoveCount,
    ClapCount,
}

#[derive(DeriveIden)]
enum Podcasts {
    Table,
    Id,
    Title,
    Description,
    AudioUrl,
    EpisodeNumber,
    Duration,
    Guests,
    Timestamps,
    Image,
    PublishedDate,
}

#[derive(DeriveIden)]
enum PodcastComments {
    Table,
    Id,
    EpisodeId,
    Name,
    Content,
    Date,
}

#[derive(DeriveIden)]
enum Polls {
    Table,
    Id,
    Question,
    Options,
    EndDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    Name,
    Email,
    Subject,
    Content,
    CreatedAt,
    Read,
    Reply,
    RepliedAt,
}
