//! Database migrations for the back office

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_site_settings::Migration),
            Box::new(m20250301_000002_create_creators::Migration),
            Box::new(m20250301_000003_create_creator_contracts::Migration),
            Box::new(m20250301_000004_create_sales::Migration),
            Box::new(m20250301_000005_create_payment_notices::Migration),
            Box::new(m20250301_000006_create_catalog_entries::Migration),
        ]
    }
}

fn created_at<T: IntoIden + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
enum Creators {
    Table,
    Id,
}

mod m20250301_000001_create_site_settings {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_site_settings"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SiteSettings::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SiteSettings::Key)
                                .string()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(SiteSettings::Value).text().not_null())
                        .col(created_at(SiteSettings::UpdatedAt))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SiteSettings::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum SiteSettings {
        Table,
        Key,
        Value,
        UpdatedAt,
    }
}

mod m20250301_000002_create_creators {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_creators"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Creators::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Creators::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Creators::Name).string().not_null())
                        .col(ColumnDef::new(Creators::Email).string())
                        .col(
                            ColumnDef::new(Creators::CommissionRate)
                                .double()
                                .not_null()
                                .default(0.0),
                        )
                        .col(
                            ColumnDef::new(Creators::CommissionPerItem)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Creators::BusinessType)
                                .string_len(16)
                                .not_null()
                                .default("individual"),
                        )
                        .col(
                            ColumnDef::new(Creators::WithholdingRequired)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Creators::BankName).string())
                        .col(ColumnDef::new(Creators::BranchName).string())
                        .col(ColumnDef::new(Creators::AccountType).string())
                        .col(ColumnDef::new(Creators::AccountNumber).string())
                        .col(ColumnDef::new(Creators::AccountHolder).string())
                        .col(
                            ColumnDef::new(Creators::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(created_at(Creators::CreatedAt))
                        .col(created_at(Creators::UpdatedAt))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Creators::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Creators {
        Table,
        Id,
        Name,
        Email,
        CommissionRate,
        CommissionPerItem,
        BusinessType,
        WithholdingRequired,
        BankName,
        BranchName,
        AccountType,
        AccountNumber,
        AccountHolder,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250301_000003_create_creator_contracts {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_creator_contracts"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CreatorContracts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CreatorContracts::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(CreatorContracts::CreatorId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CreatorContracts::Version).integer().not_null())
                        .col(
                            ColumnDef::new(CreatorContracts::Status)
                                .string_len(16)
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(CreatorContracts::Token)
                                .string_len(64)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(CreatorContracts::Delivery)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(ColumnDef::new(CreatorContracts::PreviousRate).double().not_null())
                        .col(
                            ColumnDef::new(CreatorContracts::PreviousPerItemFee)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CreatorContracts::NewRate).double().not_null())
                        .col(
                            ColumnDef::new(CreatorContracts::NewPerItemFee)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CreatorContracts::SentTo).string())
                        .col(created_at(CreatorContracts::CreatedAt))
                        .col(ColumnDef::new(CreatorContracts::SentAt).timestamp_with_time_zone())
                        .col(ColumnDef::new(CreatorContracts::AgreedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_creator_contracts_creator")
                                .from(CreatorContracts::Table, CreatorContracts::CreatorId)
                                .to(Creators::Table, Creators::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_creator_contracts_creator_version")
                        .table(CreatorContracts::Table)
                        .col(CreatorContracts::CreatorId)
                        .col(CreatorContracts::Version)
                        .unique()
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CreatorContracts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum CreatorContracts {
        Table,
        Id,
        CreatorId,
        Version,
        Status,
        Token,
        Delivery,
        PreviousRate,
        PreviousPerItemFee,
        NewRate,
        NewPerItemFee,
        SentTo,
        CreatedAt,
        SentAt,
        AgreedAt,
    }
}

mod m20250301_000004_create_sales {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000004_create_sales"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ServiceTransactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ServiceTransactions::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ServiceTransactions::CreatorId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ServiceTransactions::Amount)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ServiceTransactions::Status)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ServiceTransactions::CompletedAt)
                                .timestamp_with_time_zone(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_service_transactions_creator_completed")
                        .table(ServiceTransactions::Table)
                        .col(ServiceTransactions::CreatorId)
                        .col(ServiceTransactions::CompletedAt)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Orders::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Orders::Status).string_len(32).not_null())
                        .col(ColumnDef::new(Orders::PaidAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrderItems::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(OrderItems::OrderId).big_integer().not_null())
                        .col(ColumnDef::new(OrderItems::CreatorId).big_integer().not_null())
                        .col(ColumnDef::new(OrderItems::UnitPrice).big_integer().not_null())
                        .col(
                            ColumnDef::new(OrderItems::Quantity)
                                .big_integer()
                                .not_null()
                                .default(1),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_items_order")
                                .from(OrderItems::Table, OrderItems::OrderId)
                                .to(Orders::Table, Orders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_order_items_creator")
                        .table(OrderItems::Table)
                        .col(OrderItems::CreatorId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ServiceTransactions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ServiceTransactions {
        Table,
        Id,
        CreatorId,
        Amount,
        Status,
        CompletedAt,
    }

    #[derive(DeriveIden)]
    enum Orders {
        Table,
        Id,
        Status,
        PaidAt,
    }

    #[derive(DeriveIden)]
    enum OrderItems {
        Table,
        Id,
        OrderId,
        CreatorId,
        UnitPrice,
        Quantity,
    }
}

mod m20250301_000005_create_payment_notices {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000005_create_payment_notices"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let amount = |col: PaymentNotices| {
                ColumnDef::new(col)
                    .big_integer()
                    .not_null()
                    .default(0)
                    .to_owned()
            };

            manager
                .create_table(
                    Table::create()
                        .table(PaymentNotices::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PaymentNotices::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(PaymentNotices::CreatorId).big_integer().not_null())
                        .col(ColumnDef::new(PaymentNotices::Period).string_len(7).not_null())
                        .col(amount(PaymentNotices::GrossSales))
                        .col(amount(PaymentNotices::ItemCount))
                        .col(
                            ColumnDef::new(PaymentNotices::CommissionRate)
                                .double()
                                .not_null(),
                        )
                        .col(amount(PaymentNotices::CommissionPerItem))
                        .col(amount(PaymentNotices::CommissionByRate))
                        .col(amount(PaymentNotices::CommissionByItem))
                        .col(amount(PaymentNotices::TotalCommission))
                        .col(amount(PaymentNotices::WithholdingTax))
                        .col(amount(PaymentNotices::NetPayment))
                        .col(
                            ColumnDef::new(PaymentNotices::Status)
                                .string_len(16)
                                .not_null()
                                .default("issued"),
                        )
                        .col(ColumnDef::new(PaymentNotices::IssuedAt).timestamp_with_time_zone())
                        .col(ColumnDef::new(PaymentNotices::PaidAt).timestamp_with_time_zone())
                        .col(ColumnDef::new(PaymentNotices::ArchiveFileId).string())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_payment_notices_creator")
                                .from(PaymentNotices::Table, PaymentNotices::CreatorId)
                                .to(Creators::Table, Creators::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_payment_notices_creator_period")
                        .table(PaymentNotices::Table)
                        .col(PaymentNotices::CreatorId)
                        .col(PaymentNotices::Period)
                        .unique()
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PaymentNotices::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum PaymentNotices {
        Table,
        Id,
        CreatorId,
        Period,
        GrossSales,
        ItemCount,
        CommissionRate,
        CommissionPerItem,
        CommissionByRate,
        CommissionByItem,
        TotalCommission,
        WithholdingTax,
        NetPayment,
        Status,
        IssuedAt,
        PaidAt,
        ArchiveFileId,
    }
}

mod m20250301_000006_create_catalog_entries {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000006_create_catalog_entries"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CatalogEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CatalogEntries::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(CatalogEntries::Collection)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(ColumnDef::new(CatalogEntries::Title).string().not_null())
                        .col(ColumnDef::new(CatalogEntries::Body).text())
                        .col(ColumnDef::new(CatalogEntries::Tag).string())
                        .col(
                            ColumnDef::new(CatalogEntries::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(CatalogEntries::SortOrder)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(created_at(CatalogEntries::CreatedAt))
                        .col(created_at(CatalogEntries::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_catalog_entries_collection_order")
                        .table(CatalogEntries::Table)
                        .col(CatalogEntries::Collection)
                        .col(CatalogEntries::SortOrder)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CatalogEntries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum CatalogEntries {
        Table,
        Id,
        Collection,
        Title,
        Body,
        Tag,
        IsActive,
        SortOrder,
        CreatedAt,
        UpdatedAt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn migration_names_are_unique_and_ordered() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(sorted, names);
        assert_eq!(names[0], "m20250301_000001_create_site_settings");
    }
}
