//! Simple test fixtures used across unit tests.

use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};
use talekeeper_domain::{Role, SessionInfo, SessionRef, Turn};

use crate::ports::outbound::ApiError;

/// 2025-05-01T12:00:00Z
const BASE_SECONDS: i64 = 1_746_100_800;

/// A fixed instant `minute` minutes past the fixture epoch.
pub fn at(minute: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(BASE_SECONDS, 0).unwrap_or_default() + Duration::minutes(minute)
}

/// Odd ids are user turns, even ids narrator turns; turn `n` happens at minute `n`.
pub fn turn(id: i64) -> Turn {
    let role = if id % 2 == 1 { Role::User } else { Role::Narrator };
    Turn::confirmed(id, role, format!("turn {}", id), at(id))
}

pub fn page(ids: RangeInclusive<i64>) -> Vec<Turn> {
    ids.map(turn).collect()
}

pub fn session_info(id: i64, name: &str) -> SessionInfo {
    SessionInfo {
        id: SessionRef::from(id),
        name: name.to_string(),
        start_prompt: format!("The tale of {} begins.", name),
        summary: None,
        created_at: at(0),
    }
}

pub fn api_request_failed(msg: &str) -> ApiError {
    ApiError::RequestFailed(msg.to_string())
}
