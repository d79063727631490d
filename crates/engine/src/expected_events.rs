//! Generic expected events: one-off amounts the user anticipates (a tax
//! refund, a bonus, a deposit coming back) that are not tied to a contract
//! or an invoice.

use sea_orm::entity::prelude::*;

/// Status value of an expected event that has not happened yet.
pub const PENDING: &str = "pending";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpectedEvent {
    pub id: String,
    /// Missing amounts are forecast as zero.
    pub expected_amount: Option<i64>,
    pub expected_date: String,
    /// Free-form kind of the expectation, shown in the event description.
    pub source_type: String,
    pub source_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expected_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub file_id: String,
    pub expected_amount: Option<i64>,
    pub expected_date: String,
    pub source_type: String,
    pub source_id: Option<String>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ExpectedEvent {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            expected_amount: value.expected_amount,
            expected_date: value.expected_date,
            source_type: value.source_type,
            source_id: value.source_id,
        }
    }
}
