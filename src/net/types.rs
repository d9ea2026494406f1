//! Wire DTOs for the booking REST API.
//!
//! DESIGN
//! ======
//! Field names follow the backend's JSON exactly, which mixes camelCase
//! (`firstName`, `createdAt`) with the odd snake_case field (`teacher_id`).
//! Rust-side names are idiomatic and serde renames bridge the gap.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Calendar date format used on the wire and in form input.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// AUTH
// =============================================================================

/// Identity returned by `POST api/auth/login`.
///
/// Only `token`, `id` and `admin` are guaranteed; the remaining fields
/// default to empty when the backend omits them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInformation {
    pub token: String,
    /// Token scheme, normally `"Bearer"`.
    #[serde(rename = "type", default)]
    pub token_type: String,
    #[serde(rename = "id")]
    pub user_id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(rename = "admin", default)]
    pub is_admin: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Generic `{ "message": ... }` body used for acknowledgements and errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// DIRECTORY
// =============================================================================

/// A bookable yoga class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(serialize_with = "serialize_date", deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    #[serde(rename = "teacher_id")]
    pub teacher_id: u64,
    pub description: String,
    /// Ids of participating users.
    #[serde(default)]
    pub users: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Session {
    #[must_use]
    pub fn has_participant(&self, user_id: u64) -> bool {
        self.users.contains(&user_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Teacher {
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }
}

/// A registered account as returned by `GET api/user/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }
}

/// `"John"`, `"Doe"` -> `"John DOE"`.
#[must_use]
pub fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {}", last_name.to_uppercase())
}

// =============================================================================
// DATE CODEC
// =============================================================================

/// Parse a session date from either a bare `YYYY-MM-DD` or an RFC 3339
/// timestamp (the backend serializes `java.util.Date` as the latter).
/// A timestamp keeps the calendar day of its own offset.
///
/// # Errors
///
/// Returns the chrono parse error of the timestamp attempt when neither
/// form matches.
pub fn parse_session_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw).map(|ts| ts.date_naive())
}

fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(DATE_FORMAT))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_session_date(&raw).map_err(|e| D::Error::custom(format!("invalid session date {raw:?}: {e}")))
}
