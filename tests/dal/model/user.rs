//! `SeaORM` Entity of table `user`. Generated by dalgen-codegen 0.1.0, do not edit.

use sea_orm::entity::prelude::*;

pub const TABLE_NAME: &str = "user";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "BigUnsigned")]
    pub id: u64,
    #[sea_orm(column_type = "String(StringLen::N(128))", unique)]
    pub email: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub nick_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub type User = Model;
pub type UserEntity = Entity;
pub type UserActiveModel = ActiveModel;
