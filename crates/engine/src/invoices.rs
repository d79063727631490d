//! Pending invoices.

use sea_orm::entity::prelude::*;

/// Status value of an invoice that has not been paid yet.
pub const PENDING: &str = "pending";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invoice {
    pub id: String,
    pub amount: i64,
    pub due_date: String,
    pub linked_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub file_id: String,
    pub amount: i64,
    pub due_date: String,
    pub linked_name: Option<String>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Invoice {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            amount: value.amount,
            due_date: value.due_date,
            linked_name: value.linked_name,
        }
    }
}
