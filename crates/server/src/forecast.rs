//! Forecast API endpoints

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use engine::{ForecastResult, ScenarioMutation, ScenarioOutcome};
use serde::{Deserialize, Serialize};

use crate::{ServerError, server::ServerState};

/// Horizon used when the request does not name one.
pub const DEFAULT_HORIZON_DAYS: u32 = 180;
/// Longest horizon served; longer requests are clamped.
pub const MAX_HORIZON_DAYS: u32 = 730;
/// Largest starting balance accepted, in absolute value (cents).
pub const MAX_STARTING_BALANCE: i64 = 10_000_000_000_000;
/// Largest amount a scenario mutation may carry, in absolute value (cents).
pub const MAX_MUTATION_AMOUNT: i64 = 10_000_000_000_000;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineQuery {
    pub file_id: String,
    pub horizon: Option<i64>,
    pub starting_balance: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRequest {
    pub file_id: String,
    pub horizon: Option<i64>,
    pub starting_balance: Option<i64>,
    pub mutations: Option<Vec<ScenarioMutation>>,
}

/// Validated forecast parameters shared by both endpoints.
#[derive(Debug, PartialEq, Eq)]
struct ForecastParams {
    horizon_days: u32,
    starting_balance: i64,
}

impl ForecastParams {
    fn parse(
        file_id: &str,
        horizon: Option<i64>,
        starting_balance: Option<i64>,
    ) -> Result<Self, ServerError> {
        if file_id.trim().is_empty() {
            return Err(ServerError::Generic("fileId is required".to_string()));
        }

        let starting_balance = starting_balance.unwrap_or(0);
        if !(-MAX_STARTING_BALANCE..=MAX_STARTING_BALANCE).contains(&starting_balance) {
            return Err(ServerError::Generic(format!(
                "startingBalance must be within ±{MAX_STARTING_BALANCE}"
            )));
        }

        Ok(Self {
            horizon_days: clamp_horizon(horizon),
            starting_balance,
        })
    }
}

fn validate_mutations(mutations: &[ScenarioMutation]) -> Result<(), ServerError> {
    if mutations.is_empty() {
        return Err(ServerError::Generic(
            "mutations must be a non-empty array".to_string(),
        ));
    }

    for (index, mutation) in mutations.iter().enumerate() {
        let (field, amount) = match mutation {
            ScenarioMutation::AddEvent { amount, .. } => ("amount", *amount),
            ScenarioMutation::ModifyAmount { new_amount, .. } => ("newAmount", *new_amount),
            ScenarioMutation::CancelContract { .. } | ScenarioMutation::DelayInvoice { .. } => {
                continue;
            }
        };
        if !(-MAX_MUTATION_AMOUNT..=MAX_MUTATION_AMOUNT).contains(&amount) {
            return Err(ServerError::Generic(format!(
                "mutations[{index}].{field} must be within ±{MAX_MUTATION_AMOUNT}"
            )));
        }
    }
    Ok(())
}

fn clamp_horizon(horizon: Option<i64>) -> u32 {
    match horizon {
        None => DEFAULT_HORIZON_DAYS,
        Some(days) => days.clamp(1, i64::from(MAX_HORIZON_DAYS)) as u32,
    }
}

/// Handle requests for the baseline forecast of a file
pub async fn baseline(
    State(state): State<ServerState>,
    query: Result<Query<BaselineQuery>, QueryRejection>,
) -> Result<Json<ForecastResult>, ServerError> {
    let Query(query) = query?;
    let params = ForecastParams::parse(&query.file_id, query.horizon, query.starting_balance)?;
    tracing::debug!(
        "baseline forecast for {} over {} days",
        query.file_id,
        params.horizon_days
    );

    let result = state
        .engine
        .baseline(&query.file_id, params.horizon_days, params.starting_balance)
        .await?;

    Ok(Json(result))
}

/// Handle requests comparing a what-if scenario with the baseline
pub async fn scenario(
    State(state): State<ServerState>,
    payload: Result<Json<ScenarioRequest>, JsonRejection>,
) -> Result<Json<ScenarioOutcome>, ServerError> {
    let Json(payload) = payload?;
    let params =
        ForecastParams::parse(&payload.file_id, payload.horizon, payload.starting_balance)?;
    let mutations = payload.mutations.unwrap_or_default();
    validate_mutations(&mutations)?;
    tracing::debug!(
        "scenario forecast for {} over {} days with {} mutations",
        payload.file_id,
        params.horizon_days,
        mutations.len()
    );

    let outcome = state
        .engine
        .scenario(
            &payload.file_id,
            params.horizon_days,
            params.starting_balance,
            &mutations,
        )
        .await?;

    Ok(Json(outcome))
}
