//! Create vehicles table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicles::Model).string().not_null())
                    .col(ColumnDef::new(Vehicles::BrandId).integer().not_null())
                    .col(ColumnDef::new(Vehicles::BrandName).string().not_null())
                    .col(ColumnDef::new(Vehicles::TypeId).integer().not_null())
                    .col(ColumnDef::new(Vehicles::TypeName).string().not_null())
                    .col(
                        ColumnDef::new(Vehicles::Plate)
                            .string_len(7)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Vehicles::Color).string().not_null())
                    .col(ColumnDef::new(Vehicles::OwnerName).string().not_null())
                    .col(ColumnDef::new(Vehicles::OwnerContact).string().not_null())
                    .col(
                        ColumnDef::new(Vehicles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Vehicles {
    Table,
    Id,
    Model,
    BrandId,
    BrandName,
    TypeId,
    TypeName,
    Plate,
    Color,
    OwnerName,
    OwnerContact,
    CreatedAt,
    UpdatedAt,
}
