//! Query façade. Generated by dalgen-codegen 0.1.0, do not edit.

pub mod user;

use sea_orm::DatabaseConnection;

#[derive(Debug)]
pub struct Query {
    db: DatabaseConnection,
}

pub fn use_db(db: DatabaseConnection) -> Query {
    Query::new(db)
}

impl Query {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn user(&self) -> user::UserQuery<'_> {
        user::UserQuery::new(&self.db)
    }
}

impl From<DatabaseConnection> for Query {
    fn from(db: DatabaseConnection) -> Self {
        Self::new(db)
    }
}
