//! Customer entity for database

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::Customer;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    /// Backed by a unique index
    #[sea_orm(unique)]
    pub email: String,

    pub address: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Customer {
    fn from(model: Model) -> Self {
        Customer::new(model.id, model.name, model.email, model.address)
    }
}
