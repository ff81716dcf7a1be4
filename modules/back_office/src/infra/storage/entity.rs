//! SeaORM entities for database tables

/// Site settings key/value table
pub mod site_setting {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "site_settings")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub key: String,

        #[sea_orm(column_type = "Text")]
        pub value: String,

        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Creators table
pub mod creator {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "creators")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub name: String,
        pub email: Option<String>,

        /// Live commission rate (percent)
        pub commission_rate: f64,

        /// Live per-item fee (yen)
        pub commission_per_item: i64,

        /// `individual` or `corporate`
        pub business_type: String,
        pub withholding_required: bool,

        pub bank_name: Option<String>,
        pub branch_name: Option<String>,
        pub account_type: Option<String>,
        pub account_number: Option<String>,
        pub account_holder: Option<String>,

        pub is_active: bool,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::creator_contract::Entity")]
        Contracts,
    }

    impl Related<super::creator_contract::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Contracts.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Versioned commission contracts
pub mod creator_contract {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "creator_contracts")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub creator_id: i64,

        /// Monotonic per creator (unique with creator_id)
        pub version: i32,

        /// `pending` or `agreed`
        pub status: String,

        #[sea_orm(unique)]
        pub token: String,

        /// `link` or `email`
        pub delivery: String,

        pub previous_rate: f64,
        pub previous_per_item_fee: i64,
        pub new_rate: f64,
        pub new_per_item_fee: i64,

        pub sent_to: Option<String>,
        pub created_at: DateTimeUtc,
        pub sent_at: Option<DateTimeUtc>,
        pub agreed_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::creator::Entity",
            from = "Column::CreatorId",
            to = "super::creator::Column::Id"
        )]
        Creator,
    }

    impl Related<super::creator::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Creator.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Service sales, written by the storefront
pub mod service_transaction {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "service_transactions")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub creator_id: i64,
        pub amount: i64,

        /// Only `completed` transactions count as sales
        pub status: String,
        pub completed_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Product orders, written by the storefront
pub mod order {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "orders")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,

        /// Only items of `paid` orders count as sales
        pub status: String,
        pub paid_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::order_item::Entity")]
        Items,
    }

    impl Related<super::order_item::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Items.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Order lines, one creator per line
pub mod order_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "order_items")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub order_id: i64,
        pub creator_id: i64,
        pub unit_price: i64,
        pub quantity: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::order::Entity",
            from = "Column::OrderId",
            to = "super::order::Column::Id"
        )]
        Order,
    }

    impl Related<super::order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Order.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Issued payment notices
pub mod payment_notice {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "payment_notices")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub creator_id: i64,

        /// `YYYY-MM` (unique with creator_id)
        pub period: String,

        pub gross_sales: i64,
        pub item_count: i64,
        pub commission_rate: f64,
        pub commission_per_item: i64,
        pub commission_by_rate: i64,
        pub commission_by_item: i64,
        pub total_commission: i64,
        pub withholding_tax: i64,
        pub net_payment: i64,

        /// `issued` or `paid`
        pub status: String,
        pub issued_at: Option<DateTimeUtc>,
        pub paid_at: Option<DateTimeUtc>,
        pub archive_file_id: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::creator::Entity",
            from = "Column::CreatorId",
            to = "super::creator::Column::Id"
        )]
        Creator,
    }

    impl Related<super::creator::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Creator.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Entries of all ordered content collections, tagged by collection
pub mod catalog_entry {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "catalog_entries")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub collection: String,
        pub title: String,

        #[sea_orm(column_type = "Text", nullable)]
        pub body: Option<String>,

        pub tag: Option<String>,
        pub is_active: bool,
        pub sort_order: i32,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
