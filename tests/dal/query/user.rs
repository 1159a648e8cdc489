//! Query helpers of table `user`. Generated by dalgen-codegen 0.1.0, do not edit.

use super::super::model::user::{self, User, UserActiveModel, UserEntity};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, QueryFilter, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait,
};

#[derive(Clone, Copy, Debug)]
pub struct UserQuery<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserQuery<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn table_name(&self) -> &'static str {
        user::TABLE_NAME
    }

    pub async fn find_all(&self) -> Result<Vec<User>, DbErr> {
        UserEntity::find().all(self.db).await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        UserEntity::find().count(self.db).await
    }

    pub async fn create(&self, model: UserActiveModel) -> Result<User, DbErr> {
        model.insert(self.db).await
    }

    pub async fn update(&self, model: UserActiveModel) -> Result<User, DbErr> {
        model.update(self.db).await
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<User>, DbErr> {
        UserEntity::find_by_id(id).one(self.db).await
    }

    pub async fn delete_by_id(&self, id: u64) -> Result<u64, DbErr> {
        let res = UserEntity::delete_by_id(id).exec(self.db).await?;
        Ok(res.rows_affected)
    }

    pub async fn find_by_email(&self, email: String) -> Result<Option<User>, DbErr> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_user_query_find_all() -> Result<(), DbErr> {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([Vec::<User>::new()])
            .into_connection();
        let query = UserQuery::new(&db);
        assert_eq!(query.table_name(), "user");
        assert!(query.find_all().await?.is_empty());
        Ok(())
    }
}
