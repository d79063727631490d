use chrono::NaiveDate;
use sea_orm::{QueryFilter, QueryOrder, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    Engine, EngineError, ForecastEvent, ForecastResult, Obligations, ResultEngine, ScenarioDelta,
    ScenarioMutation, apply_mutations, compare, contracts, expand, expected_events, invoices,
    simulate,
};

/// Baseline and scenario forecasts of the same file, with their diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub baseline: ForecastResult,
    pub scenario: ForecastResult,
    pub delta: ScenarioDelta,
}

impl Engine {
    /// Read the active contracts, pending invoices and pending expected
    /// events of a budget file.
    pub async fn obligations(&self, file_id: &str) -> ResultEngine<Obligations> {
        if file_id.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "file id must not be empty".to_string(),
            ));
        }

        let contracts = contracts::Entity::find()
            .filter(contracts::Column::FileId.eq(file_id))
            .filter(contracts::Column::Status.eq(contracts::ACTIVE))
            .order_by_asc(contracts::Column::Id)
            .all(&self.database)
            .await?;
        let invoices = invoices::Entity::find()
            .filter(invoices::Column::FileId.eq(file_id))
            .filter(invoices::Column::Status.eq(invoices::PENDING))
            .order_by_asc(invoices::Column::Id)
            .all(&self.database)
            .await?;
        let expected_events = expected_events::Entity::find()
            .filter(expected_events::Column::FileId.eq(file_id))
            .filter(expected_events::Column::Status.eq(expected_events::PENDING))
            .order_by_asc(expected_events::Column::Id)
            .all(&self.database)
            .await?;

        Ok(Obligations {
            contracts: contracts.into_iter().map(Into::into).collect(),
            invoices: invoices.into_iter().map(Into::into).collect(),
            expected_events: expected_events.into_iter().map(Into::into).collect(),
        })
    }

    /// Dated events of a file between today and `today + horizon_days`.
    pub async fn expand(&self, file_id: &str, horizon_days: u32) -> ResultEngine<Vec<ForecastEvent>> {
        self.expand_from(file_id, horizon_days, self.today()).await
    }

    async fn expand_from(
        &self,
        file_id: &str,
        horizon_days: u32,
        today: NaiveDate,
    ) -> ResultEngine<Vec<ForecastEvent>> {
        let obligations = self.obligations(file_id).await?;
        let events = expand(&obligations, today, horizon_days);
        tracing::debug!(
            "expanded file {file_id}: {} contracts, {} invoices, {} expected events -> {} events over {horizon_days} days",
            obligations.contracts.len(),
            obligations.invoices.len(),
            obligations.expected_events.len(),
            events.len()
        );
        Ok(events)
    }

    /// Forecast the balance of a file with no hypothetical changes.
    pub async fn baseline(
        &self,
        file_id: &str,
        horizon_days: u32,
        starting_balance: i64,
    ) -> ResultEngine<ForecastResult> {
        let today = self.today();
        let events = self.expand_from(file_id, horizon_days, today).await?;
        Ok(simulate(starting_balance, &events, horizon_days, today))
    }

    /// Forecast a file twice, without and with `mutations`, and diff the two
    /// results.
    pub async fn scenario(
        &self,
        file_id: &str,
        horizon_days: u32,
        starting_balance: i64,
        mutations: &[ScenarioMutation],
    ) -> ResultEngine<ScenarioOutcome> {
        let today = self.today();
        let events = self.expand_from(file_id, horizon_days, today).await?;
        let scenario_events = apply_mutations(&events, mutations);
        tracing::debug!(
            "scenario for file {file_id}: {} mutations, {} -> {} events",
            mutations.len(),
            events.len(),
            scenario_events.len()
        );

        let baseline = simulate(starting_balance, &events, horizon_days, today);
        let scenario = simulate(starting_balance, &scenario_events, horizon_days, today);
        let delta = compare(&baseline, &scenario);

        Ok(ScenarioOutcome {
            baseline,
            scenario,
            delta,
        })
    }
}
