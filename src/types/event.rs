//! Pool initialization event data structures

use crate::error::{PipelineError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Kind of an early trade action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Buy,
    Sell,
    /// Any other action type; accepted but never counted
    #[serde(other)]
    Other,
}

/// A single trade action observed on the pool
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    /// Seconds, same clock as the pool init timestamp
    pub timestamp: f64,
}

impl Action {
    pub fn buy(timestamp: f64) -> Self {
        Self {
            kind: ActionKind::Buy,
            timestamp,
        }
    }

    pub fn sell(timestamp: f64) -> Self {
        Self {
            kind: ActionKind::Sell,
            timestamp,
        }
    }
}

/// Raw data captured when a liquidity pool is initialized
#[derive(Debug, Clone, PartialEq)]
pub struct PoolEvent {
    /// Liquidity supplied at pool creation
    pub initial_lp: f64,

    /// LP tokens burned
    pub burned_amount: f64,

    /// Whether mint authority was relinquished
    pub mint_authority_burned: bool,

    /// Pool creation time in seconds
    pub init_timestamp: f64,

    /// Time the features are extracted at; falls back to `init_timestamp`
    pub extract_timestamp: Option<f64>,

    /// Early trade actions, in any order
    pub actions: Vec<Action>,
}

/// Wire shape of an event. Every field is optional here so that absent keys
/// surface as `MissingField` rather than a generic parse failure.
#[derive(Debug, Deserialize)]
struct RawPoolEvent {
    initial_lp: Option<f64>,
    burned_amount: Option<f64>,
    mint_authority_burned: Option<Value>,
    init_timestamp: Option<f64>,
    extract_timestamp: Option<f64>,
    actions: Option<Vec<RawAction>>,
}

#[derive(Debug, Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: Option<ActionKind>,
    timestamp: Option<f64>,
}

impl PoolEvent {
    /// Parse an event from a JSON document
    pub fn from_json_str(input: &str) -> Result<Self> {
        let raw: RawPoolEvent = serde_json::from_str(input)?;
        raw.try_into()
    }

    /// Build an event from an already parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawPoolEvent = serde_json::from_value(value)?;
        raw.try_into()
    }
}

impl TryFrom<RawPoolEvent> for PoolEvent {
    type Error = PipelineError;

    fn try_from(raw: RawPoolEvent) -> Result<Self> {
        let initial_lp = required(raw.initial_lp, "initial_lp")?;
        let burned_amount = required(raw.burned_amount, "burned_amount")?;
        let mint_authority_burned = truthy(
            required(raw.mint_authority_burned, "mint_authority_burned")?,
            "mint_authority_burned",
        )?;
        let init_timestamp = required(raw.init_timestamp, "init_timestamp")?;

        let actions = required(raw.actions, "actions")?
            .into_iter()
            .enumerate()
            .map(|(i, action)| {
                Ok(Action {
                    kind: required(action.kind, &format!("actions[{}].type", i))?,
                    timestamp: required(action.timestamp, &format!("actions[{}].timestamp", i))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            initial_lp,
            burned_amount,
            mint_authority_burned,
            init_timestamp,
            extract_timestamp: raw.extract_timestamp,
            actions,
        })
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| PipelineError::MissingField(field.to_string()))
}

/// Coerce a JSON boolean or number into a flag (non-zero numbers are true)
fn truthy(value: Value, field: &str) -> Result<bool> {
    match value {
        Value::Bool(flag) => Ok(flag),
        Value::Number(n) => Ok(n.as_f64().map(|v| v != 0.0).unwrap_or(false)),
        Value::Null => Err(PipelineError::MissingField(field.to_string())),
        other => Err(PipelineError::InvalidField {
            field: field.to_string(),
            reason: format!("expected a boolean or number, got {}", other),
        }),
    }
}
