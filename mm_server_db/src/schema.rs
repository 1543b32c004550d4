//! Explicit schema descriptors.
//!
//! Every registered table lists its fields (logical name, column, storage
//! kind) and its associations to other tables. The SeaORM entities in
//! [`crate::entity`] are the executable side of the same mapping; the
//! registry is what gets checked against the live database after migration.

use std::collections::BTreeMap;

use sea_orm::DatabaseConnection;
use sea_orm_migration::SchemaManager;

use crate::error::DatabaseError;

/// Table identifiers shared with the client's server database.
pub mod tables {
    pub const CHANNEL: &str = "Channel";
    pub const DRAFT: &str = "Draft";
    pub const FILE: &str = "File";
    pub const POST: &str = "Post";
    pub const POSTS_IN_THREAD: &str = "PostsInThread";
    pub const POST_METADATA: &str = "PostMetadata";
    pub const REACTION: &str = "Reaction";
    pub const USER: &str = "User";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    /// Structured value serialized into a single column.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
    pub optional: bool,
}

impl FieldDescriptor {
    pub const fn optional(field: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self {
            field,
            column,
            kind,
            optional: true,
        }
    }

    pub const fn required(field: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self {
            field,
            column,
            kind,
            optional: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationKind {
    /// The foreign key lives on this table.
    BelongsTo { key: &'static str },
    /// The foreign key lives on the target table and points back here.
    HasMany { foreign_key: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Association {
    /// Accessor name on the record.
    pub name: &'static str,
    pub table: &'static str,
    pub kind: AssociationKind,
    pub mutable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub table: &'static str,
    pub fields: &'static [FieldDescriptor],
    pub associations: &'static [Association],
}

impl TableSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.field == name)
    }

    pub fn column(&self, column: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.column == column)
    }

    pub fn association(&self, name: &str) -> Option<&Association> {
        self.associations.iter().find(|a| a.name == name)
    }

    pub fn associations_to<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a Association> {
        self.associations.iter().filter(move |a| a.table == table)
    }
}

#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    tables: BTreeMap<&'static str, &'static TableSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every schema declared by this crate.
    pub fn server() -> Result<Self, DatabaseError> {
        let mut registry = Self::new();
        registry.register(&crate::entity::post::SCHEMA)?;
        Ok(registry)
    }

    pub fn register(&mut self, schema: &'static TableSchema) -> Result<(), DatabaseError> {
        if self.tables.contains_key(schema.table) {
            return Err(DatabaseError::DuplicateTable(schema.table));
        }
        self.tables.insert(schema.table, schema);
        Ok(())
    }

    pub fn get(&self, table: &str) -> Option<&'static TableSchema> {
        self.tables.get(table).copied()
    }

    pub fn tables(&self) -> impl Iterator<Item = &'static TableSchema> + '_ {
        self.tables.values().copied()
    }

    /// Checks that every registered table and column exists in `db`.
    pub async fn verify(&self, db: &DatabaseConnection) -> Result<(), DatabaseError> {
        let manager = SchemaManager::new(db);

        for schema in self.tables() {
            if !manager.has_table(schema.table).await? {
                return Err(DatabaseError::MissingTable(schema.table));
            }
            for field in schema.fields {
                if !manager.has_column(schema.table, field.column).await? {
                    return Err(DatabaseError::MissingColumn {
                        table: schema.table,
                        column: field.column,
                    });
                }
            }
            log::debug!(
                "schema {} verified ({} columns, {} associations)",
                schema.table,
                schema.fields.len(),
                schema.associations.len()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::post;
    use sea_orm::{IdenStatic, Iterable};

    #[test]
    fn test_server_registry_contains_post() {
        let registry = SchemaRegistry::server().unwrap();
        let schema = registry.get(tables::POST).unwrap();
        assert_eq!(schema.table, "Post");
        assert!(registry.get(tables::CHANNEL).is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register(&post::SCHEMA).unwrap();
        let result = registry.register(&post::SCHEMA);
        assert!(matches!(result, Err(DatabaseError::DuplicateTable("Post"))));
    }

    #[test]
    fn test_post_descriptor_matches_entity_columns() {
        let mut entity_columns: Vec<String> =
            post::Column::iter().map(|c| c.as_str().to_owned()).collect();
        let mut described: Vec<String> = post::SCHEMA
            .fields
            .iter()
            .map(|f| f.column.to_owned())
            .collect();
        entity_columns.sort_unstable();
        described.sort_unstable();
        assert_eq!(entity_columns, described);
    }

    #[test]
    fn test_post_field_lookup() {
        let id = post::SCHEMA.field("id").unwrap();
        assert!(!id.optional);

        let props = post::SCHEMA.field("props").unwrap();
        assert_eq!(props.column, "props");
        assert_eq!(props.kind, FieldKind::Json);

        let kind = post::SCHEMA.column("type").unwrap();
        assert_eq!(kind.field, "type");
        assert!(post::SCHEMA.field("title").is_none());
    }

    #[test]
    fn test_post_associations() {
        let schema = &post::SCHEMA;
        assert_eq!(schema.associations.len(), 7);

        let author = schema.association("author").unwrap();
        assert_eq!(author.table, tables::USER);
        assert_eq!(author.kind, AssociationKind::BelongsTo { key: "user_id" });
        assert!(!author.mutable);

        let drafts = schema.association("drafts").unwrap();
        assert_eq!(drafts.kind, AssociationKind::HasMany { foreign_key: "root_id" });

        for name in ["files", "posts_in_thread", "metadata", "reactions"] {
            let association = schema.association(name).unwrap();
            assert_eq!(
                association.kind,
                AssociationKind::HasMany { foreign_key: "post_id" },
                "{name}"
            );
        }

        assert_eq!(schema.associations_to(tables::CHANNEL).count(), 1);
    }
}
