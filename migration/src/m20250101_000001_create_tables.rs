use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Titles::Table)
                    .if_not_exists()
                    .col(pk_auto(Titles::Id))
                    .col(string(Titles::Name))
                    .col(string(Titles::Status).default("incomplete"))
                    .col(big_integer(Titles::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TitleProfiles::Table)
                    .if_not_exists()
                    .col(integer(TitleProfiles::TitleId).primary_key())
                    .col(string_null(TitleProfiles::SalesTitle))
                    .col(string_null(TitleProfiles::Synopsis))
                    .col(string_null(TitleProfiles::Genres))
                    .col(string_null(TitleProfiles::Keywords))
                    .col(string_null(TitleProfiles::Format))
                    .col(string_null(TitleProfiles::SpokenLanguage))
                    .col(string_null(TitleProfiles::DubbedLanguages))
                    .col(string_null(TitleProfiles::CaptionLanguages))
                    .col(string_null(TitleProfiles::OriginCountry))
                    .col(integer_null(TitleProfiles::RuntimeMinutes))
                    .col(string_null(TitleProfiles::ReleaseDate))
                    .col(string_null(TitleProfiles::RatingSystem))
                    .col(string_null(TitleProfiles::Rating))
                    .col(string_null(TitleProfiles::ProductionCompany))
                    .col(string_null(TitleProfiles::Website))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Artworks::Table)
                    .if_not_exists()
                    .col(pk_auto(Artworks::Id))
                    .col(integer(Artworks::TitleId))
                    .col(string(Artworks::Kind))
                    .col(string_null(Artworks::StorageKey))
                    .col(string(Artworks::Status).default("uploaded"))
                    .col(big_integer(Artworks::SizeBytes).default(0))
                    .col(string_null(Artworks::ContentType))
                    .col(big_integer(Artworks::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_artworks_title_kind")
                    .table(Artworks::Table)
                    .col(Artworks::TitleId)
                    .col(Artworks::Kind)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Captions::Table)
                    .if_not_exists()
                    .col(pk_auto(Captions::Id))
                    .col(integer(Captions::TitleId))
                    .col(string(Captions::Language))
                    .col(string(Captions::Kind))
                    .col(string_null(Captions::StorageKey))
                    .col(string(Captions::Status).default("uploaded"))
                    .col(big_integer(Captions::SizeBytes).default(0))
                    .col(string_null(Captions::ContentType))
                    .col(big_integer(Captions::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_captions_title_language_kind")
                    .table(Captions::Table)
                    .col(Captions::TitleId)
                    .col(Captions::Language)
                    .col(Captions::Kind)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(pk_auto(Documents::Id))
                    .col(integer(Documents::TitleId))
                    .col(string(Documents::DocType))
                    .col(string_null(Documents::StorageKey))
                    .col(string(Documents::Status).default("uploaded"))
                    .col(big_integer(Documents::SizeBytes).default(0))
                    .col(string_null(Documents::ContentType))
                    .col(big_integer(Documents::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_documents_title_doc_type")
                    .table(Documents::Table)
                    .col(Documents::TitleId)
                    .col(Documents::DocType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Avails::Table)
                    .if_not_exists()
                    .col(pk_auto(Avails::Id))
                    .col(integer(Avails::TitleId))
                    .col(string(Avails::LicenseType))
                    .col(string(Avails::Territories))
                    .col(string_null(Avails::StartDate))
                    .col(string_null(Avails::EndDate))
                    .col(boolean(Avails::Exclusive).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_avails_title")
                    .table(Avails::Table)
                    .col(Avails::TitleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CastMembers::Table)
                    .if_not_exists()
                    .col(pk_auto(CastMembers::Id))
                    .col(integer(CastMembers::TitleId))
                    .col(string(CastMembers::Name))
                    .col(string_null(CastMembers::Role))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CrewMembers::Table)
                    .if_not_exists()
                    .col(pk_auto(CrewMembers::Id))
                    .col(integer(CrewMembers::TitleId))
                    .col(string(CrewMembers::Name))
                    .col(string_null(CrewMembers::Department))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Festivals::Table)
                    .if_not_exists()
                    .col(pk_auto(Festivals::Id))
                    .col(integer(Festivals::TitleId))
                    .col(string(Festivals::FestivalName))
                    .col(string_null(Festivals::Award))
                    .col(integer_null(Festivals::Year))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Licenses::Table)
                    .if_not_exists()
                    .col(pk_auto(Licenses::Id))
                    .col(integer(Licenses::TitleId))
                    .col(string_null(Licenses::Channel))
                    .col(string_null(Licenses::RightsGranted))
                    .col(string_null(Licenses::RevenueTerms))
                    .col(string_null(Licenses::StartDate))
                    .col(string_null(Licenses::EndDate))
                    .col(string_null(Licenses::AgreementUrl))
                    .col(string(Licenses::Status).default("draft"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Updates::Table)
                    .if_not_exists()
                    .col(pk_auto(Updates::Id))
                    .col(integer(Updates::TitleId))
                    .col(string(Updates::EventType))
                    .col(string_null(Updates::Info))
                    .col(big_integer(Updates::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_updates_title")
                    .table(Updates::Table)
                    .col(Updates::TitleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Updates::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Licenses::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Festivals::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(CrewMembers::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(CastMembers::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Avails::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Documents::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Captions::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Artworks::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(TitleProfiles::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Titles::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Titles {
    Table,
    Id,
    Name,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TitleProfiles {
    Table,
    TitleId,
    SalesTitle,
    Synopsis,
    Genres,
    Keywords,
    Format,
    SpokenLanguage,
    DubbedLanguages,
    CaptionLanguages,
    OriginCountry,
    RuntimeMinutes,
    ReleaseDate,
    RatingSystem,
    Rating,
    ProductionCompany,
    Website,
}

#[derive(DeriveIden)]
enum Artworks {
    Table,
    Id,
    TitleId,
    Kind,
    StorageKey,
    Status,
    SizeBytes,
    ContentType,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Captions {
    Table,
    Id,
    TitleId,
    Language,
    Kind,
    StorageKey,
    Status,
    SizeBytes,
    ContentType,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Documents {
    Table,
    Id,
    TitleId,
    DocType,
    StorageKey,
    Status,
    SizeBytes,
    ContentType,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Avails {
    Table,
    Id,
    TitleId,
    LicenseType,
    Territories,
    StartDate,
    EndDate,
    Exclusive,
}

#[derive(DeriveIden)]
enum CastMembers {
    Table,
    Id,
    TitleId,
    Name,
    Role,
}

#[derive(DeriveIden)]
enum CrewMembers {
    Table,
    Id,
    TitleId,
    Name,
    Department,
}

#[derive(DeriveIden)]
enum Festivals {
    Table,
    Id,
    TitleId,
    FestivalName,
    Award,
    Year,
}

#[derive(DeriveIden)]
enum Licenses {
    Table,
    Id,
    TitleId,
    Channel,
    RightsGranted,
    RevenueTerms,
    StartDate,
    EndDate,
    AgreementUrl,
    Status,
}

#[derive(DeriveIden)]
enum Updates {
    Table,
    Id,
    TitleId,
    EventType,
    Info,
    CreatedAt,
}
