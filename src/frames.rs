//! Action frames streamed by the engine while it resolves a turn.
//!
//! Only the parts the strategy reacts to are decoded: breaches and spawns.
//! Individual events are decoded one at a time so a single bad entry never
//! spoils the rest of the frame.

use crate::error::*;
use crate::location::*;
use crate::units::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize)]
struct RawFrame {
    #[serde(rename = "turnInfo", default)]
    turn_info: Vec<Value>,
    #[serde(default)]
    events: RawEvents,
}

#[derive(Deserialize, Default)]
struct RawEvents {
    #[serde(default)]
    breach: Vec<Value>,
    #[serde(default)]
    spawn: Vec<Value>,
}

/// A parsed frame. Spawn events stay raw until they are replayed.
#[derive(Clone, Debug, Default)]
pub struct ActionFrame {
    /// Turn being resolved, from `turnInfo[1]`.
    pub turn: Option<u32>,
    pub breaches: Vec<Value>,
    pub spawns: Vec<Value>,
}

pub fn parse_frame(text: &str) -> Result<ActionFrame> {
    let raw: RawFrame = serde_json::from_str(text).map_err(StrategyError::Frame)?;

    Ok(ActionFrame {
        turn: raw
            .turn_info
            .get(1)
            .and_then(Value::as_u64)
            .and_then(|t| u32::try_from(t).ok()),
        breaches: raw.events.breach,
        spawns: raw.events.spawn,
    })
}

/// What a frame contributed to the session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSummary {
    pub turn: Option<u32>,
    pub breaches_recorded: usize,
    pub spawns_queued: usize,
    pub malformed: usize,
}

fn malformed(kind: &'static str, reason: impl Into<String>) -> StrategyError {
    StrategyError::MalformedEvent {
        kind,
        reason: reason.into(),
    }
}

fn fields<'a>(kind: &'static str, value: &'a Value, min_len: usize) -> Result<&'a [Value]> {
    let fields = value
        .as_array()
        .ok_or_else(|| malformed(kind, "not an array"))?;
    if fields.len() < min_len {
        return Err(malformed(
            kind,
            format!("expected {} fields, found {}", min_len, fields.len()),
        ));
    }
    Ok(fields.as_slice())
}

fn location_field(kind: &'static str, value: &Value) -> Result<Location> {
    Location::deserialize(value).map_err(|err| malformed(kind, err.to_string()))
}

fn index_field(kind: &'static str, value: &Value, name: &str) -> Result<u64> {
    value
        .as_u64()
        .ok_or_else(|| malformed(kind, format!("{} is not an index", name)))
}

fn owner_field(kind: &'static str, value: &Value) -> Result<Owner> {
    let index = index_field(kind, value, "owner")?;
    Owner::from_frame_index(index).ok_or_else(|| malformed(kind, format!("unknown owner {}", index)))
}

/// `[[x, y], damage, unitType, unitId, owner]`; `owner` is whoever scored.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreachEvent {
    pub location: Location,
    pub damage: f64,
    pub unit_type: Option<UnitType>,
    pub owner: Owner,
}

impl BreachEvent {
    pub fn decode(value: &Value) -> Result<Self> {
        const KIND: &str = "breach";
        let fields = fields(KIND, value, 5)?;

        Ok(BreachEvent {
            location: location_field(KIND, &fields[0])?,
            damage: fields[1]
                .as_f64()
                .ok_or_else(|| malformed(KIND, "damage is not a number"))?,
            unit_type: UnitType::from_index(index_field(KIND, &fields[2], "unit type")?),
            owner: owner_field(KIND, &fields[4])?,
        })
    }
}

/// `[[x, y], unitType, unitId, owner, expiryCountdown]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnEvent {
    pub location: Location,
    /// Raw type index; removal and upgrade markers have no unit type.
    pub type_index: u64,
    pub owner: Owner,
    pub expires_in: u32,
}

impl SpawnEvent {
    pub fn decode(value: &Value) -> Result<Self> {
        const KIND: &str = "spawn";
        let fields = fields(KIND, value, 4)?;
        let countdown = fields
            .get(4)
            .ok_or_else(|| malformed(KIND, "missing expiry countdown"))?;

        Ok(SpawnEvent {
            location: location_field(KIND, &fields[0])?,
            type_index: index_field(KIND, &fields[1], "unit type")?,
            owner: owner_field(KIND, &fields[3])?,
            expires_in: countdown
                .as_u64()
                .and_then(|c| u32::try_from(c).ok())
                .ok_or_else(|| malformed(KIND, "expiry countdown is not a count"))?,
        })
    }

    pub fn unit_type(&self) -> Option<UnitType> {
        UnitType::from_index(self.type_index)
    }
}
