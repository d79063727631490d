//! Recurring contracts (rent, subscriptions, salaries...).

use chrono::{Days, Months, NaiveDate};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status value of a contract that still produces payments.
pub const ACTIVE: &str = "active";

/// How often a contract repeats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    /// Date of the `n`-th occurrence counted from `anchor` (occurrence 0).
    ///
    /// Month based frequencies are computed from the anchor rather than from
    /// the previous occurrence and clamp to the last day of shorter months,
    /// so a contract due on the 31st stays on the 31st whenever the month
    /// has one.
    pub fn occurrence(self, anchor: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self {
            Self::Weekly => anchor.checked_add_days(Days::new(7 * u64::from(n))),
            Self::Monthly => anchor.checked_add_months(Months::new(n)),
            Self::Quarterly => anchor.checked_add_months(Months::new(n.checked_mul(3)?)),
            Self::Yearly => anchor.checked_add_months(Months::new(n.checked_mul(12)?)),
        }
    }
}

impl TryFrom<&str> for Frequency {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            other => Err(format!("unknown frequency: {other}")),
        }
    }
}

/// An active contract as read from the store.
///
/// Dates and frequency are kept as the raw stored text: the expander decides
/// what to do with values it cannot parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contract {
    pub id: String,
    pub name: String,
    pub amount: i64,
    pub next_payment_date: Option<String>,
    pub frequency: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub file_id: String,
    pub name: String,
    pub amount: i64,
    pub next_payment_date: Option<String>,
    pub frequency: Option<String>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Contract {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            amount: value.amount,
            next_payment_date: value.next_payment_date,
            frequency: value.frequency,
        }
    }
}
