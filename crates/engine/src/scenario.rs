//! What-if analysis.
//!
//! A scenario is the baseline event list with a sequence of
//! [`ScenarioMutation`]s replayed over a copy of it. Two simulation results
//! are then diffed month by month with [`compare`].

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    BalancePoint, ForecastEvent, ForecastResult, SourceType, simulator::saturating_total,
};

/// A hypothetical change to the baseline events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ScenarioMutation {
    /// Remove every occurrence of a contract.
    CancelContract { contract_id: String },
    /// Change the amount of every occurrence of a contract.
    ModifyAmount { contract_id: String, new_amount: i64 },
    /// Inject a one-off event.
    AddEvent {
        date: NaiveDate,
        amount: i64,
        description: String,
    },
    /// Move an invoice to another due date.
    DelayInvoice { invoice_id: String, new_date: NaiveDate },
}

impl ScenarioMutation {
    fn apply(&self, mut events: Vec<ForecastEvent>) -> Vec<ForecastEvent> {
        match self {
            Self::CancelContract { contract_id } => {
                events.retain(|event| !event.is_from(SourceType::Contract, contract_id));
            }
            Self::ModifyAmount {
                contract_id,
                new_amount,
            } => events
                .iter_mut()
                .filter(|event| event.is_from(SourceType::Contract, contract_id))
                .for_each(|event| event.amount = *new_amount),
            Self::AddEvent {
                date,
                amount,
                description,
            } => events.push(ForecastEvent::new(
                *date,
                *amount,
                description.clone(),
                SourceType::Schedule,
                format!("scenario-{}", Uuid::new_v4()),
            )),
            Self::DelayInvoice {
                invoice_id,
                new_date,
            } => events
                .iter_mut()
                .filter(|event| event.is_from(SourceType::Invoice, invoice_id))
                .for_each(|event| event.date = *new_date),
        }
        events
    }
}

/// Replay `mutations` in order over a copy of `events` and return the new
/// timeline sorted by date. `events` itself is left untouched.
pub fn apply_mutations(
    events: &[ForecastEvent],
    mutations: &[ScenarioMutation],
) -> Vec<ForecastEvent> {
    let mut scenario = mutations
        .iter()
        .fold(events.to_vec(), |events, mutation| mutation.apply(events));
    scenario.sort_by_key(|event| event.date);
    scenario
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDelta {
    pub month: String,
    pub delta: i64,
}

/// Impact of a scenario compared to its baseline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDelta {
    pub baseline_worst_point: BalancePoint,
    pub scenario_worst_point: BalancePoint,
    /// Sum of all monthly deltas.
    pub total_delta: i64,
    pub monthly_delta: Vec<MonthlyDelta>,
}

/// Diff two forecasts month by month (`scenario - baseline`).
///
/// Only the worst points and the monthly net cash flow are read. A month
/// present in one result only counts as zero in the other. Deltas saturate
/// at the `i64` bounds.
pub fn compare(baseline: &ForecastResult, scenario: &ForecastResult) -> ScenarioDelta {
    let to_map = |result: &ForecastResult| -> BTreeMap<String, i64> {
        result
            .monthly_net_cashflow
            .iter()
            .map(|m| (m.month.clone(), m.net))
            .collect()
    };
    let baseline_months = to_map(baseline);
    let scenario_months = to_map(scenario);

    let months: BTreeSet<&String> = baseline_months.keys().chain(scenario_months.keys()).collect();
    let monthly_delta: Vec<MonthlyDelta> = months
        .into_iter()
        .map(|month| MonthlyDelta {
            month: month.clone(),
            delta: scenario_months
                .get(month)
                .copied()
                .unwrap_or(0)
                .saturating_sub(baseline_months.get(month).copied().unwrap_or(0)),
        })
        .collect();

    ScenarioDelta {
        baseline_worst_point: baseline.worst_point,
        scenario_worst_point: scenario.worst_point,
        total_delta: saturating_total(monthly_delta.iter().map(|m| m.delta)),
        monthly_delta,
    }
}
