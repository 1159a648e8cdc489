use crate::{Column, EntityWriter, Error, PrimaryKey, Table, TableMapping};
use sea_query::{ColumnSpec, TableCreateStatement};
use std::collections::HashSet;
use tracing::debug;

/// A table as written back by schema discovery
#[derive(Clone, Debug)]
pub struct SchemaTable {
    pub name: String,
    pub statement: TableCreateStatement,
}

impl SchemaTable {
    pub fn new<S: Into<String>>(name: S, statement: TableCreateStatement) -> Self {
        Self {
            name: name.into(),
            statement,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EntityTransformer;

impl EntityTransformer {
    /// Pick the mapped tables out of the discovered schema, in mapping order
    pub fn transform(
        schema_tables: Vec<SchemaTable>,
        mapping: &TableMapping,
    ) -> Result<EntityWriter, Error> {
        mapping.validate()?;
        let mut tables = Vec::with_capacity(mapping.len());
        let mut module_names = HashSet::new();
        for entry in mapping.iter() {
            let schema_table = schema_tables
                .iter()
                .find(|t| t.name == entry.table)
                .ok_or_else(|| Error::UnknownTable(entry.table.clone()))?;
            let table = Self::transform_table(schema_table, &entry.type_name)?;
            let module_name = table.get_module_name();
            if module_name == "prelude" || module_name == "mod" {
                return Err(Error::Mapping(format!(
                    "table `{}` would generate the reserved module `{module_name}`",
                    entry.table
                )));
            }
            if !module_names.insert(module_name.clone()) {
                return Err(Error::Mapping(format!(
                    "table `{}` collides with another table on module `{module_name}`",
                    entry.table
                )));
            }
            debug!(
                "Table `{}` mapped to `{}` with {} column(s)",
                table.table_name,
                table.type_name,
                table.columns.len()
            );
            tables.push(table);
        }
        Ok(EntityWriter { tables })
    }

    fn transform_table(schema_table: &SchemaTable, type_name: &str) -> Result<Table, Error> {
        let table_create = &schema_table.statement;
        let mut primary_keys: Vec<PrimaryKey> = Vec::new();
        let mut columns = Vec::new();
        for col_def in table_create.get_columns().iter() {
            if col_def.get_column_type().is_none() {
                return Err(Error::Transform(format!(
                    "column `{}` of table `{}` has no type",
                    col_def.get_column_name(),
                    schema_table.name
                )));
            }
            let primary_key = col_def
                .get_column_spec()
                .iter()
                .any(|spec| matches!(spec, ColumnSpec::PrimaryKey));
            if primary_key {
                primary_keys.push(PrimaryKey {
                    name: col_def.get_column_name(),
                });
            }
            columns.push(Column::from(col_def));
        }
        for index in table_create.get_indexes().iter() {
            let col_names = index.get_index_spec().get_column_names();
            if index.is_primary_key() {
                for name in col_names {
                    if !primary_keys.iter().any(|pk| pk.name == name) {
                        primary_keys.push(PrimaryKey { name });
                    }
                }
                continue;
            }
            if col_names.len() != 1 {
                continue;
            }
            if let Some(col) = columns.iter_mut().find(|col| col.name == col_names[0]) {
                if index.is_unique_key() {
                    col.unique = true;
                } else {
                    col.indexed = true;
                }
            }
        }
        Ok(Table {
            table_name: schema_table.name.clone(),
            type_name: type_name.to_owned(),
            columns,
            primary_keys,
        })
    }
}
