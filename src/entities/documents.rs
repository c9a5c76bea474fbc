use sea_orm::entity::prelude::*;

/// A single schemaless document. `body` holds the JSON object, the id lives
/// only in the `id` column and never inside the body.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    /// 24-character hex object id
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub collection: String,

    #[sea_orm(column_type = "Text")]
    pub body: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
