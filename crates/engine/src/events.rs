//! Dated cash movements.
//!
//! Every obligation the engine knows about (contracts, invoices, expected
//! events, synthetic scenario entries) is flattened into a [`ForecastEvent`]
//! before simulation, so the simulator never looks at where an amount came
//! from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Provenance tag of a [`ForecastEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Schedule,
    Contract,
    Invoice,
}

impl SourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Schedule => "schedule",
            Self::Contract => "contract",
            Self::Invoice => "invoice",
        }
    }
}

impl TryFrom<&str> for SourceType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "schedule" => Ok(Self::Schedule),
            "contract" => Ok(Self::Contract),
            "invoice" => Ok(Self::Invoice),
            other => Err(EngineError::InvalidInput(format!(
                "invalid source type: {other}"
            ))),
        }
    }
}

/// One dated cash movement.
///
/// Amounts are signed integer cents: positive values are inflows, negative
/// values are outflows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEvent {
    pub date: NaiveDate,
    pub amount: i64,
    pub description: String,
    pub source_type: SourceType,
    /// Identifier of the originating record, used to match scenario
    /// mutations.
    pub source_id: String,
}

impl ForecastEvent {
    pub fn new(
        date: NaiveDate,
        amount: i64,
        description: impl Into<String>,
        source_type: SourceType,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            description: description.into(),
            source_type,
            source_id: source_id.into(),
        }
    }

    /// Returns `true` when the event was generated from the given record.
    pub fn is_from(&self, source_type: SourceType, source_id: &str) -> bool {
        self.source_type == source_type && self.source_id == source_id
    }
}
