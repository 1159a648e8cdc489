use crate::{util::snake_ident_str, Error};
use std::collections::HashSet;

/// Names the generated entity module already defines, a mapped type may not shadow them
pub const RESERVED_TYPE_NAMES: [&str; 7] = [
    "Model",
    "Entity",
    "ActiveModel",
    "Column",
    "PrimaryKey",
    "Relation",
    "Query",
];

/// Names a model or query file refers to unqualified, from the SeaORM prelude, the query
/// imports and the std prelude
pub const SHADOWED_TYPE_NAMES: [&str; 24] = [
    "ActiveModelBehavior",
    "ActiveModelTrait",
    "ColumnTrait",
    "ColumnType",
    "DatabaseConnection",
    "Date",
    "DateTime",
    "DateTimeWithTimeZone",
    "DbErr",
    "Decimal",
    "EntityTrait",
    "Json",
    "PaginatorTrait",
    "QueryFilter",
    "StringLen",
    "Time",
    "Uuid",
    "Box",
    "Option",
    "Result",
    "String",
    "Vec",
    "From",
    "Default",
];

/// Methods of the query façade next to the per-table accessors
pub const RESERVED_ACCESSOR_NAMES: [&str; 2] = ["new", "db"];

/// A single `table -> type` pair
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableMap {
    pub table: String,
    pub type_name: String,
}

/// Ordered association between database tables and the Rust types generated for them.
///
/// The order of the pairs is the order of the generated files and of the
/// accessors on the query façade.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableMapping {
    entries: Vec<TableMap>,
}

impl TableMap {
    /// Every type the generated code declares for this pair: the model alias, the entity
    /// and active model aliases and the query helper
    pub fn derived_type_names(&self) -> [String; 4] {
        let type_name = &self.type_name;
        [
            type_name.clone(),
            format!("{type_name}Entity"),
            format!("{type_name}ActiveModel"),
            format!("{type_name}Query"),
        ]
    }

    /// Accessor of this table on the query façade
    pub fn accessor_name(&self) -> String {
        snake_ident_str(&self.type_name)
    }
}

impl TableMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `table -> type_name` pair
    pub fn map<T, N>(mut self, table: T, type_name: N) -> Self
    where
        T: Into<String>,
        N: Into<String>,
    {
        self.entries.push(TableMap {
            table: table.into(),
            type_name: type_name.into(),
        });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableMap> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.table.as_str())
    }

    pub fn contains_table(&self, table: &str) -> bool {
        self.entries.iter().any(|entry| entry.table == table)
    }

    pub fn type_name_of(&self, table: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.table == table)
            .map(|entry| entry.type_name.as_str())
    }

    /// Check every invariant that can be verified without a database
    pub fn validate(&self) -> Result<(), Error> {
        if self.entries.is_empty() {
            return Err(Error::Mapping("no table is mapped".to_owned()));
        }
        let mut tables = HashSet::new();
        let mut type_names = HashSet::new();
        let mut derived_names = HashSet::new();
        let mut accessors = HashSet::new();
        for entry in self.entries.iter() {
            let TableMap { table, type_name } = entry;
            if table.trim().is_empty() {
                return Err(Error::Mapping("table name must not be empty".to_owned()));
            }
            if !tables.insert(table.as_str()) {
                return Err(Error::Mapping(format!("table `{table}` is mapped twice")));
            }
            if syn::parse_str::<syn::Ident>(type_name).is_err() {
                return Err(Error::Mapping(format!(
                    "`{type_name}` is not a valid Rust identifier"
                )));
            }
            if !type_name.starts_with(|c: char| c.is_ascii_uppercase()) {
                return Err(Error::Mapping(format!(
                    "type name `{type_name}` must start with an uppercase letter"
                )));
            }
            if !type_names.insert(type_name.as_str()) {
                return Err(Error::Mapping(format!(
                    "type name `{type_name}` is used by more than one table"
                )));
            }
            for name in entry.derived_type_names() {
                if RESERVED_TYPE_NAMES.contains(&name.as_str()) {
                    return Err(Error::Mapping(format!(
                        "`{name}` is reserved by the generated entity module"
                    )));
                }
                if SHADOWED_TYPE_NAMES.contains(&name.as_str()) {
                    return Err(Error::Mapping(format!(
                        "`{name}` would shadow a type the generated code uses"
                    )));
                }
                if !derived_names.insert(name.clone()) {
                    return Err(Error::Mapping(format!(
                        "type name `{type_name}` generates `{name}`, which another mapped type also generates"
                    )));
                }
            }
            let accessor = entry.accessor_name();
            if RESERVED_ACCESSOR_NAMES.contains(&accessor.as_str()) {
                return Err(Error::Mapping(format!(
                    "type name `{type_name}` generates the accessor `{accessor}`, which the query facade already defines"
                )));
            }
            if !accessors.insert(accessor.clone()) {
                return Err(Error::Mapping(format!(
                    "type name `{type_name}` generates the accessor `{accessor}`, which another mapped type also generates"
                )));
            }
        }
        Ok(())
    }
}

impl<T, N> FromIterator<(T, N)> for TableMapping
where
    T: Into<String>,
    N: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (T, N)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |mapping, (table, type_name)| {
                mapping.map(table, type_name)
            })
    }
}
