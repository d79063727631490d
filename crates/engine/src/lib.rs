//! Cash-flow forecasting engine.
//!
//! The engine turns the obligations of a budget file (recurring contracts,
//! pending invoices and expected events) into dated [`ForecastEvent`]s,
//! simulates the account balance day by day and compares alternate
//! "what-if" timelines built from [`ScenarioMutation`]s.
//!
//! The pure building blocks ([`expand`], [`simulate`], [`apply_mutations`],
//! [`compare`]) do no I/O. [`Engine`] wires them to the database.

use chrono::{Local, NaiveDate};
use sea_orm::DatabaseConnection;

pub use contracts::{Contract, Frequency};
pub use error::EngineError;
pub use events::{ForecastEvent, SourceType};
pub use expander::{Obligations, expand};
pub use expected_events::ExpectedEvent;
pub use invoices::Invoice;
pub use ops::ScenarioOutcome;
pub use scenario::{MonthlyDelta, ScenarioDelta, ScenarioMutation, apply_mutations, compare};
pub use simulator::{
    BalancePoint, DailyBalance, ForecastResult, MonthlyNet, SAFE_TO_SPEND_DAYS, simulate,
};

pub mod contracts;
mod error;
mod events;
mod expander;
pub mod expected_events;
pub mod invoices;
mod ops;
mod scenario;
mod simulator;

type ResultEngine<T> = Result<T, EngineError>;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    today: Option<NaiveDate>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The date forecasts start from.
    ///
    /// Uses the local calendar date unless the builder pinned one.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    today: Option<NaiveDate>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Pin "today" instead of reading the system clock.
    pub fn today(mut self, today: NaiveDate) -> EngineBuilder {
        self.today = Some(today);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            today: self.today,
        })
    }
}
