use sea_orm_migration::prelude::*;

mod m20250301_create_documents;
mod m20250302_unique_document_fields;

/// A partial unique index over one top-level field of one collection.
#[derive(Debug, Clone, Copy)]
pub struct UniqueIndex {
    pub name: &'static str,
    pub collection: &'static str,
    pub field: &'static str,
}

pub const UNIQUE_INDEXES: &[UniqueIndex] = &[
    UniqueIndex {
        name: "idx_users_username",
        collection: "users",
        field: "username",
    },
    UniqueIndex {
        name: "idx_users_email",
        collection: "users",
        field: "email",
    },
    UniqueIndex {
        name: "idx_user_settings_user_id",
        collection: "user_settings",
        field: "user_id",
    },
];

/// Looks up which unique index a constraint-violation message refers to.
#[must_use]
pub fn unique_index_for(message: &str) -> Option<&'static UniqueIndex> {
    UNIQUE_INDEXES.iter().find(|idx| message.contains(idx.name))
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_create_documents::Migration),
            Box::new(m20250302_unique_document_fields::Migration),
        ]
    }
}
