pub use sea_orm_migration::prelude::*;

mod m20260301_090000_contracts;
mod m20260301_090100_invoices;
mod m20260301_090200_expected_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_090000_contracts::Migration),
            Box::new(m20260301_090100_invoices::Migration),
            Box::new(m20260301_090200_expected_events::Migration),
        ]
    }
}
